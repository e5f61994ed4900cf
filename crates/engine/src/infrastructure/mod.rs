//! Infrastructure: ports and the adapters that implement them.

pub mod clock;
pub mod config;
pub mod memory;
pub mod ports;
pub mod snapshot;
