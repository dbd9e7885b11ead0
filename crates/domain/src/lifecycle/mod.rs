//! Provider lifecycle types

mod init_outcome;
mod provider_state;

pub use init_outcome::InitOutcome;
pub use provider_state::ProviderState;

/// Grouping tag for suites that share a mutable external resource (for
/// example a fixed table name) and must not run in parallel with each other
pub const NON_PARALLEL: &str = "NonParallel";
