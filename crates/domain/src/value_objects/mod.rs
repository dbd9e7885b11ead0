//! Value objects shared across providers

mod connection_state;
mod parameter;
mod provider_name;

pub use connection_state::ConnectionState;
pub use parameter::{DbParameter, ParameterValue};
pub use provider_name::{ENVIRONMENT_KEY_PREFIX, ProviderName};
