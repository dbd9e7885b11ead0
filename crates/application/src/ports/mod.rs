//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod container_port;
mod driver_port;
mod environment_port;

#[cfg(test)]
pub use container_port::{MockContainerBuilder, MockDatabaseContainer};
pub use container_port::{ContainerBuilder, ContainerError, DatabaseContainer};
pub use driver_port::{ConnectionStringBuilder, DbConnection, DriverError, DriverFactory};
#[cfg(test)]
pub use environment_port::MockEnvironmentPort;
pub use environment_port::EnvironmentPort;
