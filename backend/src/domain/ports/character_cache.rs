//! Port interface for memoising character lookups.
use async_trait::async_trait;

use crate::domain::Character;

use super::{CharacterCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum CharacterCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "character cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } => "character cache serialisation failed: {message}",
    }
}

/// A memoised lookup outcome.
///
/// Absence is a cacheable result in its own right, distinct from a cache
/// miss (which adapters report as `Ok(None)` from [`CharacterCache::get`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedLookup {
    /// The store held exactly this character.
    Present(Character),
    /// The store held no row for the id.
    Absent,
}

impl CachedLookup {
    /// Convert back into the lookup result it memoises.
    pub fn into_option(self) -> Option<Character> {
        match self {
            Self::Present(character) => Some(character),
            Self::Absent => None,
        }
    }
}

impl From<Option<Character>> for CachedLookup {
    fn from(value: Option<Character>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

/// Key-value store for lookup outcomes. Expiry and eviction belong to the
/// adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterCache: Send + Sync {
    /// Read a cached outcome; `Ok(None)` signals a miss.
    async fn get(
        &self,
        key: &CharacterCacheKey,
    ) -> Result<Option<CachedLookup>, CharacterCacheError>;

    /// Store an outcome under the supplied key.
    async fn put(
        &self,
        key: &CharacterCacheKey,
        entry: &CachedLookup,
    ) -> Result<(), CharacterCacheError>;
}

/// Cache that stores nothing; every read is a miss.
///
/// Used when caching is disabled by configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCharacterCache;

#[async_trait]
impl CharacterCache for DisabledCharacterCache {
    async fn get(
        &self,
        _key: &CharacterCacheKey,
    ) -> Result<Option<CachedLookup>, CharacterCacheError> {
        Ok(None)
    }

    async fn put(
        &self,
        _key: &CharacterCacheKey,
        _entry: &CachedLookup,
    ) -> Result<(), CharacterCacheError> {
        Ok(())
    }
}
