//! Application services
//!
//! - `connection_factory`: open/closed connection creation with state checks
//! - `provider`: the provider and lifecycle traits shared by all backends
//! - `static_provider`: providers resolved purely from configuration
//! - `container_provider`: providers backed by a disposable container
//! - `fixture`: binds a provider's lifecycle to a test suite
//! - `test_base`: per-suite cached connection
//! - `cleanup`: best-effort preparatory statements

pub mod cleanup;
pub mod connection_factory;
pub mod container_provider;
pub mod fixture;
pub mod provider;
pub mod static_provider;
pub mod test_base;

pub use cleanup::best_effort;
pub use connection_factory::{closed_connection, create_parameter, open_connection, with_option};
pub use container_provider::ContainerProvider;
pub use fixture::{ProviderFixture, SuiteOutcome, report_inconclusive};
pub use provider::{AsyncLifetime, DatabaseProvider, resolve_connection_string};
pub use static_provider::StaticProvider;
pub use test_base::TestBase;
