//! Application-level values and their database storage classes.

use serde::{Deserialize, Serialize};

/// A scalar value carried through the expression tree until it is bound to
/// a placeholder.
///
/// Dates and datetimes are carried as ISO-8601 strings; the [`crate::types`]
/// registry is responsible for any further conversion when the value is
/// handed to a prepared statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// ISO date, `YYYY-MM-DD`.
    Date(String),
    /// ISO datetime, `YYYY-MM-DD HH:MM:SS`.
    DateTime(String),
    Json(serde_json::Value),
}

impl Value {
    /// The registered type name this value naturally maps to, or `None`
    /// for NULL (which carries no bind type of its own).
    ///
    /// Used by CASE result-type inference and by default binds when no
    /// explicit type hint was given.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some("boolean"),
            Value::Int(_) => Some("integer"),
            Value::Float(_) => Some("float"),
            Value::String(_) => Some("string"),
            Value::Date(_) => Some("date"),
            Value::DateTime(_) => Some("datetime"),
            Value::Json(_) => Some("json"),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

/// The parameter class the driver uses when binding a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageKind {
    Bool,
    Int,
    Float,
    Text,
    Binary,
    Null,
}
