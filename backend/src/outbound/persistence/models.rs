//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{Character, CharacterDraft, CharacterValidationError};

use super::schema::characters;

/// Row struct for reading from the characters table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = characters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CharacterRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub nick_name: Option<String>,
}

impl TryFrom<CharacterRow> for Character {
    type Error = CharacterValidationError;

    fn try_from(row: CharacterRow) -> Result<Self, Self::Error> {
        Character::new(CharacterDraft {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            nick_name: row.nick_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(first_name: &str, nick_name: Option<&str>) -> CharacterRow {
        CharacterRow {
            id: 1,
            first_name: first_name.to_owned(),
            last_name: "de la Vega".to_owned(),
            nick_name: nick_name.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(Some("Zorro"))]
    #[case(None)]
    fn rows_map_field_for_field(#[case] nick_name: Option<&str>) {
        let character = Character::try_from(row("Diego", nick_name)).expect("valid row");
        assert_eq!(character.id().get(), 1);
        assert_eq!(character.first_name(), "Diego");
        assert_eq!(character.last_name(), "de la Vega");
        assert_eq!(character.nick_name(), nick_name);
    }

    #[rstest]
    fn blank_names_fail_conversion() {
        assert_eq!(
            Character::try_from(row("  ", None)),
            Err(CharacterValidationError::EmptyFirstName)
        );
    }
}
