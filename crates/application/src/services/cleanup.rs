//! Best-effort preparatory statements
//!
//! Suites commonly drop leftovers from earlier runs before creating their
//! schema. Those statements fail whenever the object is absent, which is the
//! normal case, so their errors must never fail the test.

use tracing::{debug, warn};

use crate::ports::{DbConnection, DriverError};

/// Execute `sql` and suppress any error
///
/// A missing object is expected and logged at debug level. Any other failure
/// is logged as a warning so it remains visible, but is still suppressed.
pub async fn best_effort(connection: &mut dyn DbConnection, sql: &str) {
    match connection.execute(sql).await {
        Ok(rows) => debug!(sql, rows, "Cleanup statement executed"),
        Err(DriverError::MissingObject(object)) => {
            debug!(sql, object = %object, "Cleanup target absent");
        },
        Err(e) => warn!(sql, error = %e, "Ignoring cleanup failure"),
    }
}
