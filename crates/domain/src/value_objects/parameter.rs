//! Driver parameter value objects

use serde::{Deserialize, Serialize};

/// A value bound to a driver parameter
///
/// `Null` is the canonical null sentinel every backend maps to its own
/// `NULL` representation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl ParameterValue {
    /// Normalize an optional value, mapping `None` to [`ParameterValue::Null`]
    pub fn from_option<T: Into<Self>>(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }

    /// Check if this is the null sentinel
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for ParameterValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// A named parameter produced by a driver factory
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DbParameter {
    /// Parameter name as it appears in SQL (without backend-specific sigil)
    pub name: String,
    /// Bound value
    pub value: ParameterValue,
}

impl DbParameter {
    /// Create a parameter with a name and value
    pub fn new(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
