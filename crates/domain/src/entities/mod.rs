//! Entities - objects with identity that the host persists

mod character;
mod item;
mod move_definition;

pub use character::{CharacterKind, CharacterState};
pub use item::{Item, ItemKind};
pub use move_definition::{
    normalize_move, FailureOutcome, MoveDefinition, MoveType, ThresholdOutcome,
};
