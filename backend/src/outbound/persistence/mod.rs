//! PostgreSQL record store.
//!
//! `diesel-async` over a `bb8` pool serves lookups; `diesel_migrations`
//! owns the schema. Row structs and the `table!` definition stay private to
//! this module, and failures leave it as
//! [`crate::domain::ports::CharacterRepositoryError`].
//!
//! # Example
//!
//! ```no_run
//! use characters::outbound::persistence::{DbPool, DieselCharacterRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), characters::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/characters")).await?;
//! let _repo = DieselCharacterRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_character_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_character_repository::DieselCharacterRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
