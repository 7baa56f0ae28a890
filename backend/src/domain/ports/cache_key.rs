//! Domain cache key type shared by character cache adapters.
use crate::domain::CharacterId;

/// Cache region holding character lookups.
pub const CHARACTER_CACHE_REGION: &str = "characters";

/// Cache key addressing one id inside a named cache region.
///
/// Keys render as `<region>::<id>`, so every adapter shares one keyspace
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterCacheKey(String);

impl CharacterCacheKey {
    /// Build the key for a character id in the default region.
    ///
    /// # Examples
    /// ```
    /// use characters::domain::CharacterId;
    /// use characters::domain::ports::CharacterCacheKey;
    ///
    /// let key = CharacterCacheKey::for_character(CharacterId::new(1));
    /// assert_eq!(key.as_str(), "characters::1");
    /// ```
    pub fn for_character(id: CharacterId) -> Self {
        Self(format!("{CHARACTER_CACHE_REGION}::{id}"))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CharacterCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CharacterCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
