//! Adapters for process-level collaborators

mod environment;

pub use environment::{InMemoryEnvironment, ProcessEnvironment};
