//! PostgreSQL-backed `CharacterRepository` implementation using Diesel ORM.
//!
//! Issues one parameterised equality query on `characters.id` and converts
//! rows through the validated domain constructor.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CharacterRepository, CharacterRepositoryError, expect_at_most_one};
use crate::domain::{Character, CharacterId};

use super::error_mapping::{diesel_error, pool_error};
use super::models::CharacterRow;
use super::pool::DbPool;
use super::schema::characters;

/// Diesel-backed implementation of the character repository port.
#[derive(Clone)]
pub struct DieselCharacterRepository {
    pool: DbPool,
}

impl DieselCharacterRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Collapse fetched rows into at most one validated character.
fn rows_to_character(
    id: CharacterId,
    rows: Vec<CharacterRow>,
) -> Result<Option<Character>, CharacterRepositoryError> {
    expect_at_most_one(id, rows)?
        .map(|row| {
            Character::try_from(row).map_err(|err| {
                CharacterRepositoryError::query(format!("invalid character row {id}: {err}"))
            })
        })
        .transpose()
}

#[async_trait]
impl CharacterRepository for DieselCharacterRepository {
    async fn find_by_id(
        &self,
        id: CharacterId,
    ) -> Result<Option<Character>, CharacterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        // No LIMIT: the row count is needed to report duplicate ids.
        let rows: Vec<CharacterRow> = characters::table
            .filter(characters::id.eq(id.get()))
            .select(CharacterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_character(id, rows)
    }
}
