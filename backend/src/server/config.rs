//! Inputs needed to start the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use characters::domain::ports::CharacterQuery;

#[cfg(feature = "metrics")]
use super::metrics::MetricsLayer;

/// Listener address plus the wired lookup port.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) characters: Arc<dyn CharacterQuery>,
    #[cfg(feature = "metrics")]
    pub(crate) metrics: MetricsLayer,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, characters: Arc<dyn CharacterQuery>) -> Self {
        Self {
            bind_addr,
            characters,
            #[cfg(feature = "metrics")]
            metrics: MetricsLayer::from_option(None),
        }
    }

    /// Record request metrics and serve them at `/metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(self, prometheus: actix_web_prom::PrometheusMetrics) -> Self {
        Self {
            metrics: MetricsLayer::from_option(Some(prometheus)),
            ..self
        }
    }
}
