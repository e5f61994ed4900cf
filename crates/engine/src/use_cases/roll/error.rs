//! Roll use case errors.

use spirit77_domain::{CharacterId, DomainError, ItemId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum RollError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("No item named '{name}' on this character")]
    ItemNamedNotFound { name: String },
    #[error("{name} is not a move")]
    NotAMove { name: String },
    #[error("Item {item} is not owned by character {character}")]
    NotOwned { item: ItemId, character: CharacterId },
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
