//! Binds the HTTP listener and assembles the Actix application.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_character_query;

#[cfg(feature = "metrics")]
pub(crate) use metrics::make_metrics;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use characters::Trace;
use characters::inbound::http::configure;
use characters::inbound::http::health::HealthState;
use characters::inbound::http::state::HttpState;

#[cfg(debug_assertions)]
fn configure_docs(cfg: &mut web::ServiceConfig) {
    use characters::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
}

#[cfg(not(debug_assertions))]
fn configure_docs(_cfg: &mut web::ServiceConfig) {}

/// Bind `config.bind_addr` and return the running server.
///
/// `health_state` is marked ready once the socket is bound; the caller marks
/// it unhealthy after the returned [`Server`] resolves.
///
/// # Errors
/// Returns [`std::io::Error`] when the address cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        characters,
        #[cfg(feature = "metrics")]
        metrics,
    } = config;
    let http_state = web::Data::new(HttpState::new(characters));
    let app_health = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(app_health.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .configure(configure)
            .configure(configure_docs);

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
