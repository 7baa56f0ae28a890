//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::CharacterQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub characters: Arc<dyn CharacterQuery>,
}

impl HttpState {
    /// Construct state from the character lookup port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use characters::domain::CharacterLookupService;
    /// use characters::domain::ports::{DisabledCharacterCache, FixtureCharacterRepository};
    /// use characters::inbound::http::state::HttpState;
    ///
    /// let service = CharacterLookupService::new(
    ///     Arc::new(FixtureCharacterRepository),
    ///     Arc::new(DisabledCharacterCache),
    /// );
    /// let _state = HttpState::new(Arc::new(service));
    /// ```
    pub fn new(characters: Arc<dyn CharacterQuery>) -> Self {
        Self { characters }
    }
}
