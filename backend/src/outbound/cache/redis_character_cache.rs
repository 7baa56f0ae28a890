//! Redis-backed character cache.
//!
//! Entries are stored with `SET key value EX ttl` under `characters::<id>`
//! keys. Values are the JSON form of the character, or `null` for a cached
//! absence. Each write extends the base TTL by a random jitter so entries
//! written together do not all expire at once.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::Character;
use crate::domain::ports::{CachedLookup, CharacterCache, CharacterCacheError, CharacterCacheKey};

/// Expiry policy for Redis entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedisTtl {
    base: Duration,
    jitter: Duration,
}

impl RedisTtl {
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// TTL in whole seconds for one write, never below one second.
    fn sample_secs<R: Rng>(&self, rng: &mut R) -> u64 {
        let base = self.base.as_secs();
        let jitter = self.jitter.as_secs();
        let extra = if jitter == 0 {
            0
        } else {
            rng.gen_range(0..=jitter)
        };
        base.saturating_add(extra).max(1)
    }
}

fn encode(entry: &CachedLookup) -> Result<String, CharacterCacheError> {
    let value: Option<&Character> = match entry {
        CachedLookup::Present(character) => Some(character),
        CachedLookup::Absent => None,
    };
    serde_json::to_string(&value).map_err(|err| CharacterCacheError::serialization(err.to_string()))
}

fn decode(raw: &str) -> Result<CachedLookup, CharacterCacheError> {
    serde_json::from_str::<Option<Character>>(raw)
        .map(CachedLookup::from)
        .map_err(|err| CharacterCacheError::serialization(err.to_string()))
}

/// Character cache backed by a pooled Redis connection.
pub struct RedisCharacterCache {
    pool: Pool<RedisConnectionManager>,
    ttl: RedisTtl,
    rng: Mutex<SmallRng>,
}

impl RedisCharacterCache {
    /// Build a pool for `redis_url`. Connections are opened on first use.
    ///
    /// A checkout waits at most `checkout_timeout`; after that the operation
    /// fails with [`CharacterCacheError::Backend`] so the lookup can bypass
    /// the cache instead of stalling.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterCacheError::Backend`] when the URL is invalid or the
    /// timeout is zero.
    pub fn connect(
        redis_url: &str,
        ttl: RedisTtl,
        checkout_timeout: Duration,
    ) -> Result<Self, CharacterCacheError> {
        if checkout_timeout.is_zero() {
            return Err(CharacterCacheError::backend("redis timeout must be non-zero"));
        }
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| CharacterCacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .connection_timeout(checkout_timeout)
            .build_unchecked(manager);
        Ok(Self::from_pool(pool, ttl))
    }

    pub fn from_pool(pool: Pool<RedisConnectionManager>, ttl: RedisTtl) -> Self {
        Self {
            pool,
            ttl,
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }
}

#[async_trait]
impl CharacterCache for RedisCharacterCache {
    async fn get(
        &self,
        key: &CharacterCacheKey,
    ) -> Result<Option<CachedLookup>, CharacterCacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CharacterCacheError::backend(err.to_string()))?;
        let raw: Option<String> = conn
            .get(key.as_str())
            .await
            .map_err(|err| CharacterCacheError::backend(err.to_string()))?;
        raw.as_deref().map(decode).transpose()
    }

    async fn put(
        &self,
        key: &CharacterCacheKey,
        entry: &CachedLookup,
    ) -> Result<(), CharacterCacheError> {
        let payload = encode(entry)?;
        let ttl_secs = self.ttl.sample_secs(&mut *self.rng.lock());
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CharacterCacheError::backend(err.to_string()))?;
        conn.set_ex::<_, _, ()>(key.as_str(), payload, ttl_secs)
            .await
            .map_err(|err| CharacterCacheError::backend(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CharacterDraft;
    use rstest::rstest;

    fn zorro() -> Character {
        Character::new(CharacterDraft {
            id: 1,
            first_name: "Diego".to_owned(),
            last_name: "de la Vega".to_owned(),
            nick_name: Some("Zorro".to_owned()),
        })
        .expect("valid character")
    }

    #[rstest]
    fn absence_is_encoded_as_json_null() {
        assert_eq!(encode(&CachedLookup::Absent).expect("encode"), "null");
        assert_eq!(decode("null").expect("decode"), CachedLookup::Absent);
    }

    #[rstest]
    fn present_entries_use_camel_case_json() {
        let raw = encode(&CachedLookup::Present(zorro())).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "firstName": "Diego",
                "lastName": "de la Vega",
                "nickName": "Zorro"
            })
        );
        assert_eq!(decode(&raw).expect("decode"), CachedLookup::Present(zorro()));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"id":1,"firstName":"","lastName":"x","nickName":null}"#)]
    fn corrupt_payloads_are_serialisation_errors(#[case] raw: &str) {
        assert!(matches!(
            decode(raw),
            Err(CharacterCacheError::Serialization { .. })
        ));
    }

    #[rstest]
    fn ttl_jitter_stays_within_bounds() {
        let ttl = RedisTtl::new(Duration::from_secs(600), Duration::from_secs(60));
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..256 {
            let secs = ttl.sample_secs(&mut rng);
            assert!((600..=660).contains(&secs), "ttl {secs} out of range");
        }
    }

    #[rstest]
    #[case(600, 600)]
    #[case(0, 1)]
    fn ttl_without_jitter_is_fixed(#[case] base: u64, #[case] expected: u64) {
        let ttl = RedisTtl::new(Duration::from_secs(base), Duration::ZERO);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(ttl.sample_secs(&mut rng), expected);
    }

    #[rstest]
    fn invalid_urls_are_backend_errors() {
        let result = RedisCharacterCache::connect(
            "not a url",
            RedisTtl::new(Duration::from_secs(60), Duration::ZERO),
            Duration::from_millis(100),
        );
        assert!(matches!(result, Err(CharacterCacheError::Backend { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_redis_fails_within_the_checkout_timeout() {
        let cache = RedisCharacterCache::connect(
            "redis://127.0.0.1:1/",
            RedisTtl::new(Duration::from_secs(60), Duration::ZERO),
            Duration::from_millis(200),
        )
        .expect("pool builds without connecting");
        let key = CharacterCacheKey::for_character(crate::domain::CharacterId::new(1));

        let outcome = tokio::time::timeout(Duration::from_secs(5), async {
            (cache.get(&key).await, cache.put(&key, &CachedLookup::Absent).await)
        })
        .await
        .expect("cache calls give up before the outer deadline");

        assert!(matches!(outcome.0, Err(CharacterCacheError::Backend { .. })));
        assert!(matches!(outcome.1, Err(CharacterCacheError::Backend { .. })));
    }
}
