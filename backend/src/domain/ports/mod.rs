//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod character_cache;
mod character_query;
mod character_repository;

pub use cache_key::{CHARACTER_CACHE_REGION, CharacterCacheKey};
#[cfg(test)]
pub use character_cache::MockCharacterCache;
pub use character_cache::{
    CachedLookup, CharacterCache, CharacterCacheError, DisabledCharacterCache,
};
#[cfg(test)]
pub use character_query::MockCharacterQuery;
pub use character_query::CharacterQuery;
#[cfg(test)]
pub use character_repository::MockCharacterRepository;
pub use character_repository::{
    CharacterRepository, CharacterRepositoryError, FIXTURE_CHARACTER_ID,
    FixtureCharacterRepository, expect_at_most_one, fixture_character,
};
