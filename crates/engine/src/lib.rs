//! Spirit77 Engine library.
//!
//! Wires the rules engine to storage, dice and time through ports, and
//! exposes roll and character use cases for a host to call.

pub mod app;
pub mod cli;
pub mod infrastructure;
pub mod use_cases;
