//! Contracts for database drivers.
//!
//! This crate produces SQL and bindings; it never talks to a database.
//! These traits describe the collaborator a caller supplies to execute the
//! output. They are object-safe so a connection pool can hand out
//! `Box<dyn Driver>` without knowing the engine.

use crate::binder::BoundValue;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::CompiledStatement;
use crate::types::TypeRegistry;
use crate::value::{StorageKind, Value};

/// A prepared statement accepting bound parameters.
pub trait Statement {
    /// Bind one parameter by placeholder name (no leading `:`).
    fn bind(&mut self, placeholder: &str, value: Value, kind: StorageKind) -> Result<()>;

    /// Execute with everything bound so far.
    fn execute(&mut self) -> Result<()>;

    /// Rows affected by the last execution.
    fn row_count(&self) -> u64;
}

/// A database driver for one engine.
pub trait Driver {
    /// The dialect this driver compiles statements with.
    fn dialect(&self) -> Dialect;

    /// Prepare a SQL string for execution.
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement>>;

    /// Quote a value as an inline literal through the named type. Binding
    /// is always preferred; this exists for engines and tools that need
    /// literal SQL.
    fn quote(&self, value: Value, type_name: &str) -> Result<String>;

    fn begin(&mut self) -> Result<()>;
    fn commit(&mut self) -> Result<()>;
    fn rollback(&mut self) -> Result<()>;

    /// Savepoint hooks; the SQL text comes from the dialect templates.
    fn savepoint(&mut self, name: &str) -> Result<()>;
    fn release_savepoint(&mut self, name: &str) -> Result<()>;
    fn rollback_savepoint(&mut self, name: &str) -> Result<()>;

    /// The auto-generated id of the last inserted row, when the engine
    /// exposes one.
    fn last_insert_id(&mut self) -> Result<Option<i64>>;
}

impl CompiledStatement {
    /// Push every binding into a prepared statement, casting each value
    /// through the registry first.
    ///
    /// Bindings without an explicit type hint cast through the value's
    /// natural type; NULLs with no hint bind directly with
    /// [`StorageKind::Null`].
    pub fn bind_into(
        &self,
        statement: &mut dyn Statement,
        registry: &TypeRegistry,
    ) -> Result<()> {
        for BoundValue {
            placeholder,
            value,
            type_name,
        } in &self.bindings
        {
            let name = match type_name.as_deref() {
                Some(name) => Some(name),
                None => value.type_name(),
            };
            let (converted, kind) = match name {
                Some(name) => registry.cast(value.clone(), name)?,
                None => (Value::Null, StorageKind::Null),
            };
            statement.bind(placeholder, converted, kind)?;
        }
        Ok(())
    }
}
