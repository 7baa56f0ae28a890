//! Builders for the character lookup port from validated settings.

use std::sync::Arc;

use tracing::{info, warn};

use characters::domain::CharacterLookupService;
use characters::domain::ports::{
    CharacterCache, CharacterQuery, CharacterRepository, DisabledCharacterCache,
    FixtureCharacterRepository,
};
use characters::outbound::cache::{InMemoryCharacterCache, RedisCharacterCache, RedisTtl};
use characters::outbound::persistence::{
    DbPool, DieselCharacterRepository, PoolConfig, run_pending_migrations,
};
use characters::settings::{AppSettings, CacheSettings};

/// Build the record store adapter.
///
/// Uses the Diesel repository when a database URL is configured, otherwise
/// the fixture repository serving the seeded record.
async fn build_repository(settings: &AppSettings) -> std::io::Result<Arc<dyn CharacterRepository>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        warn!("no database URL configured; serving fixture characters");
        return Ok(Arc::new(FixtureCharacterRepository));
    };

    if settings.run_migrations {
        run_pending_migrations(database_url)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
    }

    let config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(Arc::new(DieselCharacterRepository::new(pool)))
}

/// Build the cache adapter selected by `cache`.
fn build_cache(cache: CacheSettings) -> std::io::Result<Arc<dyn CharacterCache>> {
    match cache {
        CacheSettings::Redis {
            url,
            ttl,
            jitter,
            timeout,
        } => {
            let redis = RedisCharacterCache::connect(&url, RedisTtl::new(ttl, jitter), timeout)
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            info!(
                backend = "redis",
                ttl_secs = ttl.as_secs(),
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "character cache ready"
            );
            Ok(Arc::new(redis))
        }
        CacheSettings::Memory { capacity, ttl } => {
            info!(
                backend = "memory",
                capacity = capacity.get(),
                ttl_secs = ttl.as_secs(),
                "character cache ready"
            );
            Ok(Arc::new(InMemoryCharacterCache::new(capacity, ttl)))
        }
        CacheSettings::Disabled => {
            info!(backend = "disabled", "character cache disabled");
            Ok(Arc::new(DisabledCharacterCache))
        }
    }
}

/// Assemble the cache-then-store lookup service.
///
/// # Errors
/// Returns [`std::io::Error`] when settings are invalid or an adapter cannot
/// connect.
pub async fn build_character_query(
    settings: &AppSettings,
) -> std::io::Result<Arc<dyn CharacterQuery>> {
    let cache_settings = settings
        .cache()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let repository = build_repository(settings).await?;
    let cache = build_cache(cache_settings)?;
    let service = CharacterLookupService::new(repository, cache)
        .with_absent_caching(settings.cache_absent_lookups);
    Ok(Arc::new(service))
}
