//! Character cache adapters.
//!
//! Implementations of [`crate::domain::ports::CharacterCache`]:
//!
//! - [`RedisCharacterCache`]: shared cache using `bb8-redis`, with TTL jitter
//!   to spread expiry.
//! - [`InMemoryCharacterCache`]: bounded per-process LRU with a fixed TTL.
//!
//! The disabled backend is the domain's
//! [`crate::domain::ports::DisabledCharacterCache`].

mod in_memory_character_cache;
mod redis_character_cache;

pub use in_memory_character_cache::InMemoryCharacterCache;
pub use redis_character_cache::{RedisCharacterCache, RedisTtl};
