//! Bounded in-process character cache.
//!
//! An LRU map guarded by a mutex. Entries expire after a fixed TTL and are
//! dropped lazily on the next read of their key; the least recently used
//! entry is evicted once capacity is reached.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;

use crate::domain::ports::{CachedLookup, CharacterCache, CharacterCacheError, CharacterCacheKey};

#[derive(Debug, Clone)]
struct Entry {
    value: CachedLookup,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// Character cache held in process memory.
pub struct InMemoryCharacterCache {
    entries: Mutex<LruCache<CharacterCacheKey, Entry>>,
    ttl: Duration,
}

impl InMemoryCharacterCache {
    /// Create a cache holding at most `capacity` entries for `ttl` each.
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Number of entries currently held, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &CharacterCacheKey, now: Instant) -> Option<CachedLookup> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    fn store(&self, key: &CharacterCacheKey, value: &CachedLookup, now: Instant) {
        let entry = Entry {
            value: value.clone(),
            expires_at: now.checked_add(self.ttl),
        };
        self.entries.lock().put(key.clone(), entry);
    }
}

#[async_trait]
impl CharacterCache for InMemoryCharacterCache {
    async fn get(
        &self,
        key: &CharacterCacheKey,
    ) -> Result<Option<CachedLookup>, CharacterCacheError> {
        Ok(self.lookup(key, Instant::now()))
    }

    async fn put(
        &self,
        key: &CharacterCacheKey,
        entry: &CachedLookup,
    ) -> Result<(), CharacterCacheError> {
        self.store(key, entry, Instant::now());
        Ok(())
    }
}
