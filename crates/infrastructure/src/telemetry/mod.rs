//! Test tracing setup
//!
//! Suites call [`init_test_tracing`] at the top of each test. The first call
//! installs a console subscriber; later calls, and calls after another
//! subscriber was installed, do nothing.

#[cfg(test)]
pub(crate) mod capture;

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the test subscriber, honoring `RUST_LOG` before `default_filter`
///
/// Returns `true` if this call installed the subscriber.
pub fn init_test_tracing(default_filter: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_target(true);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if installed {
        debug!("Test tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_call_is_a_no_op() {
        init_test_tracing("debug");
        assert!(!init_test_tracing("debug"));
    }
}
