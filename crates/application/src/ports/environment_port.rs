//! Process environment port

#[cfg(test)]
use mockall::automock;

/// Read-only view of environment variables
#[cfg_attr(test, automock)]
pub trait EnvironmentPort: Send + Sync {
    /// Value of `key`, or `None` when unset
    fn var(&self, key: &str) -> Option<String>;
}
