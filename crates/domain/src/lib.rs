//! Spirit of '77 rules engine.
//!
//! Characters, moves and the dice-roll resolver, independent of any host.
//! Dice are thrown through an injected `FnMut(min, max) -> i32`, so every
//! rule here is deterministic under test.

pub mod entities;
pub mod error;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use entities::{
    normalize_move, CharacterKind, CharacterState, FailureOutcome, Item, ItemKind, MoveDefinition,
    MoveType, ThresholdOutcome,
};
pub use error::DomainError;
pub use ids::{CharacterId, ItemId};
pub use rules::{
    derive_effective_data, ComputedRoll, DerivedStat, DerivedState, MoveRoll, RollOutcome,
    RollResolver, RulesConfig, StateDelta, Vocabulary,
};
pub use value_objects::{
    DiceFormula, DicePool, FormulaRoll, Harm, HarmLevel, KeepRule, PoolRoll, ResultTier, RollTag,
    Scar, Stat, StatScore, TemporaryModifiers, Thresholds,
};
