//! Game rules: roll resolution, derived data, configuration and vocabularies.

mod config;
mod derive;
mod resolver;
mod vocabulary;

pub use config::RulesConfig;
pub use derive::{derive_effective_data, DerivedStat, DerivedState};
pub use resolver::{ComputedRoll, MoveRoll, RollOutcome, RollResolver, StateDelta};
pub use vocabulary::{
    Vocabulary, THANG_TYPES, VEHICLE_TRAITS, VEHICLE_TYPES, WEAPON_RANGES, WEAPON_TRAITS,
};
