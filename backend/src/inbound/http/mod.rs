//! HTTP adapter: handlers, error rendering and route registration.

pub mod characters;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;

/// Register the lookup route under `/api` and the probes at the root.
///
/// Callers provide [`state::HttpState`] and [`health::HealthState`] as app
/// data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use characters::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(characters::get_character))
        .service(health::ready)
        .service(health::live);
}
