//! Type handlers and the registry that casts values for binding.
//!
//! The registry is an explicit object constructed once and passed by
//! reference wherever casting is needed; there is no static global state, so
//! tests and multi-tenant callers can hold independent registries.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::value::{StorageKind, Value};

/// Converts an application value into its database representation and
/// reports the parameter class used when binding.
pub trait TypeHandler: fmt::Debug {
    /// Convert a value to what the driver should receive. NULL passes
    /// through all handlers unchanged.
    fn to_database(&self, value: Value) -> Result<Value>;

    /// The parameter class the driver binds this type with.
    fn storage_kind(&self) -> StorageKind;
}

/// A primitive type that coerces via the natural scalar conversions.
#[derive(Debug, Clone, Copy)]
struct BasicType {
    kind: StorageKind,
}

impl TypeHandler for BasicType {
    fn to_database(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let out = match self.kind {
            StorageKind::Int => match value {
                Value::Int(n) => Value::Int(n),
                Value::Float(f) => Value::Int(f as i64),
                Value::Bool(b) => Value::Int(b as i64),
                Value::String(s) => Value::Int(s.trim().parse::<i64>().map_err(|_| {
                    Error::InvalidArgument(format!("cannot cast `{s}` to integer"))
                })?),
                other => {
                    return Err(Error::InvalidArgument(format!(
                        "cannot cast {other:?} to integer"
                    )))
                }
            },
            StorageKind::Float => match value {
                Value::Float(f) => Value::Float(f),
                Value::Int(n) => Value::Float(n as f64),
                Value::String(s) => Value::Float(s.trim().parse::<f64>().map_err(|_| {
                    Error::InvalidArgument(format!("cannot cast `{s}` to float"))
                })?),
                other => {
                    return Err(Error::InvalidArgument(format!(
                        "cannot cast {other:?} to float"
                    )))
                }
            },
            StorageKind::Bool => match value {
                Value::Bool(b) => Value::Bool(b),
                Value::Int(n) => Value::Bool(n != 0),
                other => {
                    return Err(Error::InvalidArgument(format!(
                        "cannot cast {other:?} to boolean"
                    )))
                }
            },
            StorageKind::Text => match value {
                Value::String(s) => Value::String(s),
                Value::Int(n) => Value::String(n.to_string()),
                Value::Float(f) => {
                    let mut buffer = ryu::Buffer::new();
                    Value::String(buffer.format(f).to_string())
                }
                Value::Bool(b) => Value::String(b.to_string()),
                Value::Date(s) | Value::DateTime(s) => Value::String(s),
                Value::Json(j) => Value::String(j.to_string()),
                Value::Null => unreachable!(),
            },
            StorageKind::Binary | StorageKind::Null => value,
        };
        Ok(out)
    }

    fn storage_kind(&self) -> StorageKind {
        self.kind
    }
}

/// Dates and datetimes travel as ISO strings but tolerate being handed a
/// plain string as well.
#[derive(Debug, Clone, Copy)]
struct TemporalType {
    datetime: bool,
}

impl TypeHandler for TemporalType {
    fn to_database(&self, value: Value) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Date(s) | Value::DateTime(s) | Value::String(s) => Ok(if self.datetime {
                Value::DateTime(s)
            } else {
                Value::Date(s)
            }),
            other => Err(Error::InvalidArgument(format!(
                "cannot cast {other:?} to a temporal value"
            ))),
        }
    }

    fn storage_kind(&self) -> StorageKind {
        StorageKind::Text
    }
}

#[derive(Debug, Clone, Copy)]
struct JsonType;

impl TypeHandler for JsonType {
    fn to_database(&self, value: Value) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Json(j) => Ok(Value::String(j.to_string())),
            Value::String(s) => Ok(Value::String(s)),
            other => Err(Error::InvalidArgument(format!(
                "cannot cast {other:?} to json"
            ))),
        }
    }

    fn storage_kind(&self) -> StorageKind {
        StorageKind::Text
    }
}

/// Maps type names to handlers. One instance per process or connection.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    handlers: HashMap<String, Box<dyn TypeHandler>>,
}

impl TypeRegistry {
    /// An empty registry with no types at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in primitive types registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("integer", Box::new(BasicType { kind: StorageKind::Int }));
        registry.register("float", Box::new(BasicType { kind: StorageKind::Float }));
        registry.register("boolean", Box::new(BasicType { kind: StorageKind::Bool }));
        registry.register("string", Box::new(BasicType { kind: StorageKind::Text }));
        registry.register("binary", Box::new(BasicType { kind: StorageKind::Binary }));
        registry.register("date", Box::new(TemporalType { datetime: false }));
        registry.register("datetime", Box::new(TemporalType { datetime: true }));
        registry.register("json", Box::new(JsonType));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Box<dyn TypeHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    /// Look up a handler by name; unregistered names fail fast.
    pub fn build(&self, name: &str) -> Result<&dyn TypeHandler> {
        self.handlers
            .get(name)
            .map(|h| h.as_ref())
            .ok_or_else(|| Error::UnknownType(name.into()))
    }

    /// Convert a value through the named type, returning the converted
    /// value together with the storage kind the driver should bind with.
    pub fn cast(&self, value: Value, name: &str) -> Result<(Value, StorageKind)> {
        let handler = self.build(name)?;
        let converted = handler.to_database(value)?;
        let kind = if converted.is_null() {
            StorageKind::Null
        } else {
            handler.storage_kind()
        };
        Ok((converted, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_fails() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(
            registry.build("uuid").unwrap_err(),
            Error::UnknownType("uuid".into())
        );
    }

    #[test]
    fn test_integer_cast() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(
            registry.cast(Value::from("42"), "integer").unwrap(),
            (Value::Int(42), StorageKind::Int)
        );
        assert_eq!(
            registry.cast(Value::Bool(true), "integer").unwrap(),
            (Value::Int(1), StorageKind::Int)
        );
        assert!(registry.cast(Value::from("nope"), "integer").is_err());
    }

    #[test]
    fn test_null_passes_through_any_type() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(
            registry.cast(Value::Null, "integer").unwrap(),
            (Value::Null, StorageKind::Null)
        );
        assert_eq!(
            registry.cast(Value::Null, "datetime").unwrap(),
            (Value::Null, StorageKind::Null)
        );
    }

    #[test]
    fn test_string_cast_formats_floats() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(
            registry.cast(Value::Float(1.5), "string").unwrap(),
            (Value::String("1.5".into()), StorageKind::Text)
        );
    }

    #[test]
    fn test_custom_handler() {
        #[derive(Debug)]
        struct Csv;
        impl TypeHandler for Csv {
            fn to_database(&self, value: Value) -> Result<Value> {
                match value {
                    Value::String(s) => Ok(Value::String(s.to_uppercase())),
                    other => Ok(other),
                }
            }
            fn storage_kind(&self) -> StorageKind {
                StorageKind::Text
            }
        }

        let mut registry = TypeRegistry::with_defaults();
        registry.register("csv", Box::new(Csv));
        assert_eq!(
            registry.cast(Value::from("a,b"), "csv").unwrap(),
            (Value::String("A,B".into()), StorageKind::Text)
        );
    }
}
