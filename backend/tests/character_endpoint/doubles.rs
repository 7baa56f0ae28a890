//! Record store double counting every lookup it serves.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use characters::domain::ports::{
    CharacterRepository, CharacterRepositoryError, expect_at_most_one,
};
use characters::domain::{Character, CharacterDraft, CharacterId};

#[derive(Default)]
struct StoreState {
    rows: HashMap<i64, Vec<Character>>,
    failure: Option<CharacterRepositoryError>,
}

/// In-memory table that may hold duplicate ids, unlike the real schema.
#[derive(Clone, Default)]
pub(crate) struct CountingCharacterRepository {
    state: Arc<Mutex<StoreState>>,
    calls: Arc<AtomicUsize>,
}

impl CountingCharacterRepository {
    pub(crate) fn insert(&self, character: Character) {
        let mut state = self.state.lock().expect("store state lock");
        state
            .rows
            .entry(character.id().get())
            .or_default()
            .push(character);
    }

    pub(crate) fn fail_with(&self, failure: CharacterRepositoryError) {
        self.state.lock().expect("store state lock").failure = Some(failure);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CharacterRepository for CountingCharacterRepository {
    async fn find_by_id(
        &self,
        id: CharacterId,
    ) -> Result<Option<Character>, CharacterRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().expect("store state lock");
        if let Some(failure) = state.failure.clone() {
            return Err(failure);
        }
        let rows = state.rows.get(&id.get()).cloned().unwrap_or_default();
        expect_at_most_one(id, rows)
    }
}

pub(crate) fn character(id: i64, first: &str, last: &str, nick: Option<&str>) -> Character {
    Character::new(CharacterDraft {
        id,
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        nick_name: nick.map(str::to_owned),
    })
    .expect("valid character")
}
