//! Provider name value object
//!
//! # Examples
//!
//! ```
//! use domain::ProviderName;
//!
//! let name = ProviderName::parse("MySql").unwrap();
//! assert_eq!(name.environment_variable(), "DapperTests_MySql_ConnectionString");
//!
//! assert!(ProviderName::parse("My Sql").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Prefix of every connection-string override variable
pub const ENVIRONMENT_KEY_PREFIX: &str = "DapperTests";

/// Name of a database backend
///
/// The name is embedded verbatim in the override key
/// `DapperTests_{name}_ConnectionString`, so it is restricted to ASCII
/// alphanumerics. Casing is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderName(String);

impl ProviderName {
    /// Parse a provider name
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::ProviderName;
    ///
    /// let name = ProviderName::parse("Postgresql").unwrap();
    /// assert_eq!(name.as_str(), "Postgresql");
    /// ```
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidProviderName(name));
        }
        Ok(Self(name))
    }

    /// The MySQL-family backend
    pub fn mysql() -> Self {
        Self("MySql".to_string())
    }

    /// The Postgres-family backend
    pub fn postgresql() -> Self {
        Self("Postgresql".to_string())
    }

    /// The SQL-Server-family backend
    pub fn sql_server() -> Self {
        Self("SqlServer".to_string())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Environment variable holding a connection-string override for this
    /// provider
    pub fn environment_variable(&self) -> String {
        format!("{ENVIRONMENT_KEY_PREFIX}_{}_ConnectionString", self.0)
    }

    /// Reason reported when the provider cannot be provisioned
    pub fn unavailable_reason(&self, message: impl fmt::Display) -> String {
        format!("{} is unavailable: {message}", self.0)
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProviderName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProviderName> for String {
    fn from(name: ProviderName) -> Self {
        name.0
    }
}

impl AsRef<str> for ProviderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_compose_expected_keys() {
        assert_eq!(
            ProviderName::mysql().environment_variable(),
            "DapperTests_MySql_ConnectionString"
        );
        assert_eq!(
            ProviderName::postgresql().environment_variable(),
            "DapperTests_Postgresql_ConnectionString"
        );
        assert_eq!(
            ProviderName::sql_server().environment_variable(),
            "DapperTests_SqlServer_ConnectionString"
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(
            ProviderName::parse(""),
            Err(DomainError::InvalidProviderName(_))
        ));
    }

    #[test]
    fn parse_rejects_separators() {
        assert!(ProviderName::parse("My_Sql").is_err());
        assert!(ProviderName::parse("my-sql").is_err());
        assert!(ProviderName::parse("my sql").is_err());
    }

    #[test]
    fn parse_preserves_case() {
        let name = ProviderName::parse("CockroachDb").unwrap();
        assert_eq!(name.to_string(), "CockroachDb");
    }

    #[test]
    fn unavailable_reason_is_prefixed_with_name() {
        let reason = ProviderName::mysql().unavailable_reason("engine not found");
        assert_eq!(reason, "MySql is unavailable: engine not found");
    }

    #[test]
    fn try_from_string_validates() {
        assert!(ProviderName::try_from("Oracle".to_string()).is_ok());
        assert!(ProviderName::try_from("Ora cle".to_string()).is_err());
    }
}
