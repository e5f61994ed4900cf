//! Value objects - Immutable objects defined by their attributes

mod dice;
mod harm;
mod modifiers;
mod outcome;
mod scar;
mod stat;

#[cfg(test)]
pub(crate) use dice::test_support;

pub use dice::{DiceFormula, DicePool, FormulaRoll, KeepRule, PoolRoll, D6};
pub use harm::{Harm, HarmLevel, DEFAULT_SOMETHING_LESS_AT};
pub use modifiers::TemporaryModifiers;
pub use outcome::{
    ResultTier, RollTag, Thresholds, DEFAULT_PARTIAL_THRESHOLD, DEFAULT_SUCCESS_THRESHOLD,
};
pub use scar::{Scar, SCAR_PENALTY};
pub use stat::{Stat, StatScore};
