//! Process-wide driver registration
//!
//! sqlx's `Any` driver dispatches on the URL scheme and needs the concrete
//! drivers registered before the first connection. Registration happens once
//! per process through [`ensure_native_drivers_loaded`], called from a
//! suite's setup rather than implicitly on first use.

use std::sync::Once;

use application::ports::DriverError;
use tracing::info;

static REGISTERED: Once = Once::new();

/// Drivers made available to `sqlx::Any`
pub const ANY_DRIVERS: [&str; 2] = ["mysql", "postgres"];

/// Register the native drivers if this process has not done so yet
///
/// Returns `true` only for the call that performed the registration.
pub fn ensure_native_drivers_loaded() -> bool {
    let mut registered = false;
    REGISTERED.call_once(|| {
        sqlx::any::install_default_drivers();
        info!(drivers = ?ANY_DRIVERS, "Native database drivers registered");
        registered = true;
    });
    registered
}

/// Check that [`ensure_native_drivers_loaded`] has run in this process
pub fn require_native_drivers() -> Result<(), DriverError> {
    if REGISTERED.is_completed() {
        Ok(())
    } else {
        Err(DriverError::Connect(
            "native drivers are not registered; call ensure_native_drivers_loaded during setup"
                .to_string(),
        ))
    }
}
