//! Repository port traits for character and item storage.

use async_trait::async_trait;
use spirit77_domain::{CharacterId, CharacterState, Item, ItemId, StateDelta};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterState>, RepoError>;
    async fn save(&self, character: &CharacterState) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;

    /// Apply a roll's state change to the stored character as it is now,
    /// leaving every other field untouched.
    async fn apply_delta(&self, id: CharacterId, delta: &StateDelta) -> Result<(), RepoError>;

    // Queries
    async fn list(&self) -> Result<Vec<CharacterState>, RepoError>;
    /// Case-insensitive name lookup. The first match wins.
    async fn find_by_name(&self, name: &str) -> Result<Option<CharacterState>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepoError>;
    async fn save(&self, item: &Item) -> Result<(), RepoError>;
    async fn delete(&self, id: ItemId) -> Result<(), RepoError>;

    // Queries
    async fn list(&self) -> Result<Vec<Item>, RepoError>;
    async fn list_owned_by(&self, owner: CharacterId) -> Result<Vec<Item>, RepoError>;
}
