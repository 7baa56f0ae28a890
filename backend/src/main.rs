//! Service entry-point: loads settings, wires adapters, and serves the API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use characters::inbound::http::health::HealthState;
use characters::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, build_character_query, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn load_settings() -> std::io::Result<AppSettings> {
    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    settings
        .validate()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(settings)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = load_settings()?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let characters = build_character_query(&settings).await?;

    let config = ServerConfig::new(bind_addr, characters);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::make_metrics()?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "character service listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
