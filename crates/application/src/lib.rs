//! Application layer - Provider lifecycle and fixture orchestration
//!
//! Defines the ports through which database drivers, container engines and
//! the process environment are reached, and the services that turn them into
//! ready-to-use test fixtures.

pub mod error;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod testing;

pub use error::FixtureError;
pub use ports::*;
pub use services::*;
