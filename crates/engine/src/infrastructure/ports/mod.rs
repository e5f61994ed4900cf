//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - Character and item storage (in-memory today, a host database tomorrow)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{CharacterRepo, ItemRepo};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use repos::{MockCharacterRepo, MockItemRepo};
