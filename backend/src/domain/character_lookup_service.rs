//! Cache-then-store character lookup.
//!
//! This module implements the [`CharacterQuery`] driving port. A lookup
//! consults the cache first and only touches the record store on a miss.
//! Store results (including absence, when enabled) are written back so
//! repeated lookups for the same id are served without a store round trip.
//!
//! Cache failures never fail a request: they are logged and the lookup
//! continues as if the cache had missed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    CachedLookup, CharacterCache, CharacterCacheKey, CharacterQuery, CharacterRepository,
    CharacterRepositoryError,
};
use crate::domain::{Character, CharacterId, Error};

/// Client-facing message for store outages; adapter detail stays in the logs.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "character store unavailable";

/// Character lookup service implementing [`CharacterQuery`].
#[derive(Clone)]
pub struct CharacterLookupService {
    repository: Arc<dyn CharacterRepository>,
    cache: Arc<dyn CharacterCache>,
    cache_absent: bool,
}

impl CharacterLookupService {
    /// Create a service over the given store and cache.
    ///
    /// Absent lookups are cached by default; see
    /// [`CharacterLookupService::with_absent_caching`].
    pub fn new(repository: Arc<dyn CharacterRepository>, cache: Arc<dyn CharacterCache>) -> Self {
        Self {
            repository,
            cache,
            cache_absent: true,
        }
    }

    /// Toggle whether "no such character" results are written to the cache.
    #[must_use]
    pub fn with_absent_caching(mut self, enabled: bool) -> Self {
        self.cache_absent = enabled;
        self
    }

    fn map_repository_error(error: CharacterRepositoryError) -> Error {
        match error {
            CharacterRepositoryError::Connection { message } => {
                warn!(%message, "character store unreachable");
                Error::service_unavailable(STORE_UNAVAILABLE_MESSAGE)
            }
            CharacterRepositoryError::Query { message } => {
                Error::internal(format!("character store error: {message}"))
            }
            err @ CharacterRepositoryError::Integrity { .. } => {
                error!(error = %err, "character uniqueness violated");
                Error::internal(err.to_string())
            }
        }
    }

    async fn cached(&self, key: &CharacterCacheKey) -> Option<CachedLookup> {
        match self.cache.get(key).await {
            Ok(hit) => hit,
            Err(err) => {
                warn!(key = %key, error = %err, "character cache read failed; bypassing");
                None
            }
        }
    }

    async fn remember(&self, key: &CharacterCacheKey, found: Option<&Character>) {
        if found.is_none() && !self.cache_absent {
            return;
        }
        let entry = CachedLookup::from(found.cloned());
        if let Err(err) = self.cache.put(key, &entry).await {
            warn!(key = %key, error = %err, "character cache write failed");
        }
    }
}

#[async_trait]
impl CharacterQuery for CharacterLookupService {
    async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>, Error> {
        let key = CharacterCacheKey::for_character(id);

        if let Some(entry) = self.cached(&key).await {
            debug!(key = %key, "character cache hit");
            return Ok(entry.into_option());
        }
        debug!(key = %key, "character cache miss");

        let found = self
            .repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?;

        self.remember(&key, found.as_ref()).await;
        Ok(found)
    }
}

#[cfg(test)]
#[path = "character_lookup_service_tests.rs"]
mod tests;
