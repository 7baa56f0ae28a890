//! Character data model.
//!
//! Characters are read-only from this service's perspective: rows are
//! created by migrations or external writers and only ever loaded here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing a [`Character`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterValidationError {
    /// The raw identifier is not a base-10 signed integer.
    #[error("character id must be an integer")]
    InvalidId,
    /// First name is blank once trimmed.
    #[error("first name must not be empty")]
    EmptyFirstName,
    /// Last name is blank once trimmed.
    #[error("last name must not be empty")]
    EmptyLastName,
}

/// Integer primary key of a character.
///
/// Any integer is a valid lookup key; ids with no stored row simply resolve
/// to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(i64);

impl CharacterId {
    /// Wrap a raw integer identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CharacterId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for CharacterId {
    type Err = CharacterValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| CharacterValidationError::InvalidId)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated character fields, as read from storage or a cache payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub nick_name: Option<String>,
}

/// A named character.
///
/// ## Invariants
/// - `first_name` and `last_name` are non-empty once trimmed.
/// - `nick_name` is either absent or carried verbatim.
///
/// # Examples
/// ```
/// use characters::domain::{Character, CharacterDraft};
///
/// let zorro = Character::new(CharacterDraft {
///     id: 1,
///     first_name: "Diego".into(),
///     last_name: "de la Vega".into(),
///     nick_name: Some("Zorro".into()),
/// })
/// .expect("valid character");
/// assert_eq!(zorro.nick_name(), Some("Zorro"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CharacterDraft", into = "CharacterDraft")]
pub struct Character {
    id: CharacterId,
    first_name: String,
    last_name: String,
    nick_name: Option<String>,
}

impl Character {
    /// Validate a draft and build the character.
    pub fn new(draft: CharacterDraft) -> Result<Self, CharacterValidationError> {
        let CharacterDraft {
            id,
            first_name,
            last_name,
            nick_name,
        } = draft;

        if first_name.trim().is_empty() {
            return Err(CharacterValidationError::EmptyFirstName);
        }
        if last_name.trim().is_empty() {
            return Err(CharacterValidationError::EmptyLastName);
        }

        Ok(Self {
            id: CharacterId(id),
            first_name,
            last_name,
            nick_name,
        })
    }

    /// Primary key.
    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    pub fn nick_name(&self) -> Option<&str> {
        self.nick_name.as_deref()
    }
}

impl From<Character> for CharacterDraft {
    fn from(value: Character) -> Self {
        Self {
            id: value.id.get(),
            first_name: value.first_name,
            last_name: value.last_name,
            nick_name: value.nick_name,
        }
    }
}

impl TryFrom<CharacterDraft> for Character {
    type Error = CharacterValidationError;

    fn try_from(value: CharacterDraft) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    //! Validation and serialisation coverage for characters.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn zorro_draft() -> CharacterDraft {
        CharacterDraft {
            id: 1,
            first_name: "Diego".to_owned(),
            last_name: "de la Vega".to_owned(),
            nick_name: Some("Zorro".to_owned()),
        }
    }

    #[rstest]
    fn new_accepts_complete_draft(zorro_draft: CharacterDraft) {
        let character = Character::new(zorro_draft).expect("valid character");
        assert_eq!(character.id(), CharacterId::new(1));
        assert_eq!(character.first_name(), "Diego");
        assert_eq!(character.last_name(), "de la Vega");
        assert_eq!(character.nick_name(), Some("Zorro"));
    }

    #[rstest]
    fn new_accepts_missing_nick_name(mut zorro_draft: CharacterDraft) {
        zorro_draft.nick_name = None;
        let character = Character::new(zorro_draft).expect("valid character");
        assert!(character.nick_name().is_none());
    }

    #[rstest]
    #[case("", "de la Vega", CharacterValidationError::EmptyFirstName)]
    #[case("  ", "de la Vega", CharacterValidationError::EmptyFirstName)]
    #[case("Diego", "", CharacterValidationError::EmptyLastName)]
    fn new_rejects_blank_names(
        mut zorro_draft: CharacterDraft,
        #[case] first_name: &str,
        #[case] last_name: &str,
        #[case] expected: CharacterValidationError,
    ) {
        zorro_draft.first_name = first_name.to_owned();
        zorro_draft.last_name = last_name.to_owned();
        let err = Character::new(zorro_draft).expect_err("blank names rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("-7", Some(-7))]
    #[case("987654321", Some(987_654_321))]
    #[case("abc", None)]
    #[case("1.5", None)]
    #[case("", None)]
    #[case("99999999999999999999", None)]
    fn character_id_parses_integers_only(#[case] raw: &str, #[case] expected: Option<i64>) {
        let parsed = raw.parse::<CharacterId>().ok().map(CharacterId::get);
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn serde_uses_camel_case_fields(zorro_draft: CharacterDraft) {
        let character = Character::new(zorro_draft).expect("valid character");
        let value = serde_json::to_value(&character).expect("serialise character");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "firstName": "Diego",
                "lastName": "de la Vega",
                "nickName": "Zorro"
            })
        );
    }

    #[rstest]
    fn deserialisation_revalidates_payload() {
        let payload = json!({
            "id": 2,
            "firstName": " ",
            "lastName": "Nobody",
            "nickName": null
        });
        let result: Result<Character, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }
}
