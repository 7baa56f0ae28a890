//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `CHARACTERS_*` environment variables or matching CLI
//! flags. Optional fields fall back to the defaults exposed by the accessor
//! methods; [`AppSettings::validate`] rejects unusable combinations before
//! any adapter is built.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_CACHE_TTL_JITTER_SECS: u64 = 60;
const DEFAULT_CACHE_CAPACITY: usize = 10_000;
const DEFAULT_REDIS_TIMEOUT_MS: u64 = 500;
/// Upper bound for the cache TTL and its jitter: 30 days.
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Errors raised when settings cannot be turned into a runnable service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("unknown cache backend {value:?}; expected redis, memory or disabled")]
    UnknownCacheBackend { value: String },
    #[error("cache backend redis requires CHARACTERS_REDIS_URL")]
    MissingRedisUrl,
    #[error("cache capacity must be greater than zero")]
    ZeroCacheCapacity,
    #[error("database pool size must be greater than zero")]
    ZeroPoolSize,
    #[error("redis timeout must be greater than zero")]
    ZeroRedisTimeout,
    #[error("{setting} of {secs}s exceeds the {max}s limit")]
    CacheTtlTooLong {
        setting: &'static str,
        secs: u64,
        max: u64,
    },
}

/// Where lookup outcomes are memoised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
    Disabled,
}

impl FromStr for CacheBackend {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            "disabled" | "none" => Ok(Self::Disabled),
            _ => Err(SettingsError::UnknownCacheBackend {
                value: s.to_owned(),
            }),
        }
    }
}

/// Validated cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSettings {
    Redis {
        url: String,
        ttl: Duration,
        jitter: Duration,
        timeout: Duration,
    },
    Memory {
        capacity: NonZeroUsize,
        ttl: Duration,
    },
    Disabled,
}

/// Configuration values for the character service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHARACTERS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the fixture repository is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations on startup.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Cache backend name: `redis`, `memory` or `disabled`.
    pub cache_backend: Option<String>,
    /// Redis URL, required for the redis backend.
    pub redis_url: Option<String>,
    /// Longest wait for a Redis connection before the cache is bypassed.
    pub redis_timeout_ms: Option<u64>,
    /// Entry lifetime in seconds.
    pub cache_ttl_secs: Option<u64>,
    /// Maximum random extension of the Redis TTL in seconds.
    pub cache_ttl_jitter_secs: Option<u64>,
    /// In-memory cache capacity.
    pub cache_capacity: Option<usize>,
    /// Cache "not found" results as well as hits.
    #[ortho_config(default = true)]
    pub cache_absent_lookups: bool,
}

impl AppSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Return the configured cache backend, defaulting to `memory`.
    pub fn cache_backend(&self) -> Result<CacheBackend, SettingsError> {
        self.cache_backend
            .as_deref()
            .map_or(Ok(CacheBackend::Memory), CacheBackend::from_str)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn cache_ttl_jitter(&self) -> Duration {
        Duration::from_secs(
            self.cache_ttl_jitter_secs
                .unwrap_or(DEFAULT_CACHE_TTL_JITTER_SECS),
        )
    }

    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms.unwrap_or(DEFAULT_REDIS_TIMEOUT_MS))
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    fn check_ttl_bounds(&self) -> Result<(), SettingsError> {
        let bounded = [
            ("cache_ttl_secs", self.cache_ttl()),
            ("cache_ttl_jitter_secs", self.cache_ttl_jitter()),
        ];
        for (setting, ttl) in bounded {
            let secs = ttl.as_secs();
            if secs > MAX_CACHE_TTL_SECS {
                return Err(SettingsError::CacheTtlTooLong {
                    setting,
                    secs,
                    max: MAX_CACHE_TTL_SECS,
                });
            }
        }
        Ok(())
    }

    /// Resolve the cache configuration, rejecting incomplete combinations
    /// and expiry values beyond [`MAX_CACHE_TTL_SECS`].
    pub fn cache(&self) -> Result<CacheSettings, SettingsError> {
        let backend = self.cache_backend()?;
        if backend != CacheBackend::Disabled {
            self.check_ttl_bounds()?;
        }
        match backend {
            CacheBackend::Redis => {
                let url = self
                    .redis_url
                    .clone()
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(SettingsError::MissingRedisUrl)?;
                let timeout = self.redis_timeout();
                if timeout.is_zero() {
                    return Err(SettingsError::ZeroRedisTimeout);
                }
                Ok(CacheSettings::Redis {
                    url,
                    ttl: self.cache_ttl(),
                    jitter: self.cache_ttl_jitter(),
                    timeout,
                })
            }
            CacheBackend::Memory => {
                let capacity = NonZeroUsize::new(self.cache_capacity())
                    .ok_or(SettingsError::ZeroCacheCapacity)?;
                Ok(CacheSettings::Memory {
                    capacity,
                    ttl: self.cache_ttl(),
                })
            }
            CacheBackend::Disabled => Ok(CacheSettings::Disabled),
        }
    }

    /// Check every derived value once so startup fails fast.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.bind_addr()?;
        self.cache()?;
        if self.db_max_connections() == 0 {
            return Err(SettingsError::ZeroPoolSize);
        }
        Ok(())
    }
}
