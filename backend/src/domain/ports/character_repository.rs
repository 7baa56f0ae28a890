//! Driven port for reading characters from the record store.
//!
//! Implementations issue a single equality lookup on the primary key and
//! enforce the uniqueness invariant: more than one matching row is reported
//! as [`CharacterRepositoryError::Integrity`], never resolved silently.

use async_trait::async_trait;

use crate::domain::{Character, CharacterDraft, CharacterId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by character repository adapters.
    pub enum CharacterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "character repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "character repository query failed: {message}",
        /// More than one row matched an id that must be unique.
        Integrity { id: i64, count: usize } =>
            "character id {id} matched {count} rows; expected at most one",
    }
}

/// Port for looking up characters by primary key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Fetch the character with the given id.
    ///
    /// Returns `Ok(None)` when no row matches.
    async fn find_by_id(
        &self,
        id: CharacterId,
    ) -> Result<Option<Character>, CharacterRepositoryError>;
}

/// Collapse the rows matched by an id lookup into at most one value.
///
/// # Examples
/// ```
/// use characters::domain::CharacterId;
/// use characters::domain::ports::{expect_at_most_one, CharacterRepositoryError};
///
/// let id = CharacterId::new(3);
/// assert_eq!(expect_at_most_one(id, Vec::<u8>::new()), Ok(None));
/// assert_eq!(expect_at_most_one(id, vec![7_u8]), Ok(Some(7)));
/// assert_eq!(
///     expect_at_most_one(id, vec![7_u8, 8]),
///     Err(CharacterRepositoryError::integrity(3_i64, 2_usize))
/// );
/// ```
pub fn expect_at_most_one<T>(
    id: CharacterId,
    rows: Vec<T>,
) -> Result<Option<T>, CharacterRepositoryError> {
    let count = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), count) {
        (None, _) => Ok(None),
        (Some(row), 1) => Ok(Some(row)),
        (Some(_), _) => Err(CharacterRepositoryError::integrity(id.get(), count)),
    }
}

/// Identifier of the record served by [`FixtureCharacterRepository`].
pub const FIXTURE_CHARACTER_ID: i64 = 1;

/// Build the seeded record served when no database is configured.
pub fn fixture_character() -> Result<Character, CharacterRepositoryError> {
    Character::new(CharacterDraft {
        id: FIXTURE_CHARACTER_ID,
        first_name: "Diego".to_owned(),
        last_name: "de la Vega".to_owned(),
        nick_name: Some("Zorro".to_owned()),
    })
    .map_err(|err| CharacterRepositoryError::query(format!("invalid fixture character: {err}")))
}

/// In-memory repository holding the seeded Zorro record.
///
/// Backs the HTTP endpoint when the service runs without a database URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCharacterRepository;

#[async_trait]
impl CharacterRepository for FixtureCharacterRepository {
    async fn find_by_id(
        &self,
        id: CharacterId,
    ) -> Result<Option<Character>, CharacterRepositoryError> {
        if id.get() == FIXTURE_CHARACTER_ID {
            fixture_character().map(Some)
        } else {
            Ok(None)
        }
    }
}
