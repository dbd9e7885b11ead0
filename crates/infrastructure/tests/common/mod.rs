//! Shared setup for container-backed integration suites

#![allow(dead_code, clippy::expect_used)]

use std::sync::Arc;

use application::ports::EnvironmentPort;
use infrastructure::{
    FixtureConfig, ProcessEnvironment, ensure_native_drivers_loaded, init_test_tracing,
};
use tokio::sync::{Mutex, MutexGuard};

static NON_PARALLEL_GROUP: Mutex<()> = Mutex::const_new(());

/// Configuration and process environment for one suite
pub fn setup() -> (FixtureConfig, Arc<dyn EnvironmentPort>) {
    let config = FixtureConfig::load().expect("fixture configuration should load");
    init_test_tracing(&config.log_filter);
    ensure_native_drivers_loaded();
    (config, Arc::new(ProcessEnvironment::new()))
}

/// Serialize suites tagged [`domain::NON_PARALLEL`]
///
/// They share fixed table names, so only one may run at a time.
pub async fn non_parallel() -> MutexGuard<'static, ()> {
    let guard = NON_PARALLEL_GROUP.lock().await;
    tracing::debug!(group = domain::NON_PARALLEL, "Entered serialized group");
    guard
}
