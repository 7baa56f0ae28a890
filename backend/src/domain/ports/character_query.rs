//! Driving port for character reads.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch characters
//! without importing persistence or cache concerns. Production backs it with
//! [`crate::domain::CharacterLookupService`]; tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Character, CharacterId, Error};

/// Domain use-case port for reading one character.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterQuery: Send + Sync {
    /// Return the character with the given id, or `None` when absent.
    async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>, Error>;
}
