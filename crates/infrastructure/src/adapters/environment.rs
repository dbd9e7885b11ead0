//! Environment adapters
//!
//! [`ProcessEnvironment`] reads the real process environment and is what
//! suites use. [`InMemoryEnvironment`] holds a fixed set of variables for
//! composing providers in unit tests without touching process state.

use std::collections::HashMap;
use std::env;

use application::ports::EnvironmentPort;
use tracing::{debug, warn};

/// Environment backed by the process environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Create a new process environment adapter
    pub const fn new() -> Self {
        Self
    }
}

impl EnvironmentPort for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => {
                debug!(key, "Environment variable read");
                Some(value)
            },
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                warn!(key, "Ignoring environment variable with invalid UTF-8");
                None
            },
        }
    }
}

/// Environment backed by an in-memory map
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnvironment {
    vars: HashMap<String, String>,
}

impl InMemoryEnvironment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any previous value
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentPort for InMemoryEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
