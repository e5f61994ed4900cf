//! Use cases - user story orchestration.
//!
//! Each use case holds the ports it needs and exposes an async `execute`
//! (or a small set of named operations).

pub mod character;
pub mod roll;

pub use character::{
    AdjustHarm, CharacterError, CharacterUseCases, DescribeCharacter, HarmReport, ManageScars,
    SetModifiers,
};
pub use roll::{RollError, RollItem, RollMove, RollRecord, RollResult, RollStat, RollUseCases};
