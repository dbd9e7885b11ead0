//! Domain layer for the database fixture workspace
//!
//! Contains the value types shared by every provider: provider names and the
//! environment keys derived from them, connection states, driver parameters,
//! and the provider lifecycle state machine. This layer has no I/O.

pub mod errors;
pub mod lifecycle;
pub mod value_objects;

pub use errors::DomainError;
pub use lifecycle::{InitOutcome, NON_PARALLEL, ProviderState};
pub use value_objects::*;
