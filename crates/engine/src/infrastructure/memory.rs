//! In-memory repositories backed by `DashMap`.
//!
//! Used by the runner and as the default adapter in tests. Every read hands
//! out a clone, so callers never hold a shard lock across an await.

use async_trait::async_trait;
use dashmap::DashMap;
use spirit77_domain::{CharacterId, CharacterState, Item, ItemId, StateDelta};

use crate::infrastructure::ports::{CharacterRepo, ItemRepo, RepoError};

#[derive(Default)]
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, CharacterState>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_characters(characters: impl IntoIterator<Item = CharacterState>) -> Self {
        let repo = Self::new();
        for character in characters {
            repo.characters.insert(character.id(), character);
        }
        repo
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterState>, RepoError> {
        Ok(self.characters.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, character: &CharacterState) -> Result<(), RepoError> {
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.characters
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Character", id))
    }

    async fn apply_delta(&self, id: CharacterId, delta: &StateDelta) -> Result<(), RepoError> {
        let mut entry = self
            .characters
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Character", id))?;
        entry.value_mut().apply_delta(delta);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CharacterState>, RepoError> {
        let mut characters: Vec<CharacterState> = self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        characters.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(characters)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CharacterState>, RepoError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|c| c.name().to_lowercase() == wanted))
    }
}

#[derive(Default)]
pub struct InMemoryItemRepo {
    items: DashMap<ItemId, Item>,
}

impl InMemoryItemRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let repo = Self::new();
        for item in items {
            repo.items.insert(item.id, item);
        }
        repo
    }
}

#[async_trait]
impl ItemRepo for InMemoryItemRepo {
    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepoError> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, item: &Item) -> Result<(), RepoError> {
        self.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete(&self, id: ItemId) -> Result<(), RepoError> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Item", id))
    }

    async fn list(&self) -> Result<Vec<Item>, RepoError> {
        let mut items: Vec<Item> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn list_owned_by(&self, owner: CharacterId) -> Result<Vec<Item>, RepoError> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|entry| entry.value().owner == Some(owner))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}
