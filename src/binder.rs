//! Placeholder allocation and value recording for one compiled statement.
//!
//! A [`ValueBinder`] lives for exactly one compile pass: it is created by the
//! top-level statement, threaded through the entire expression tree, and
//! yields the ordered binding list alongside the SQL text. Because SQL text
//! and bindings come out of the same traversal, they cannot drift apart.
//!
//! Placeholder names carry a scope-specific prefix (`:c0`, `:tuple0`,
//! `:se0`, `:param0`) but share a single monotonic counter, so two sibling
//! subexpressions can never emit the same placeholder no matter which node
//! kind produced it.

use crate::value::{StorageKind, Value};

/// The node kind that requested a placeholder; selects the name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindScope {
    /// General expressions: `:cN`.
    #[default]
    Common,
    /// Tuple comparisons: `:tupleN`.
    Tuple,
    /// Select-list literals: `:seN`.
    Select,
    /// Function arguments: `:paramN`.
    Param,
}

impl BindScope {
    fn prefix(self) -> &'static str {
        match self {
            BindScope::Common => "c",
            BindScope::Tuple => "tuple",
            BindScope::Select => "se",
            BindScope::Param => "param",
        }
    }
}

/// A recorded placeholder binding.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundValue {
    /// Placeholder name without the leading `:`.
    pub placeholder: String,
    pub value: Value,
    /// Explicit type hint; `None` means "infer from the value".
    pub type_name: Option<String>,
}

/// Allocates unique placeholders and records their values for one statement.
#[derive(Debug, Default)]
pub struct ValueBinder {
    bindings: Vec<BoundValue>,
    counter: usize,
}

impl ValueBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next unique placeholder name for this binder's lifetime,
    /// without the leading `:`. The counter never resets mid-compilation.
    pub fn placeholder(&mut self, scope: BindScope) -> String {
        let name = format!("{}{}", scope.prefix(), self.counter);
        self.counter += 1;
        name
    }

    /// Record a value for a previously allocated placeholder.
    pub fn bind(&mut self, placeholder: String, value: Value, type_name: Option<String>) {
        self.bindings.push(BoundValue {
            placeholder,
            value,
            type_name,
        });
    }

    /// Allocate a placeholder, bind the value, and return the SQL token
    /// text (`:cN`).
    pub fn bind_value(
        &mut self,
        scope: BindScope,
        value: Value,
        type_name: Option<String>,
    ) -> String {
        let name = self.placeholder(scope);
        let token = format!(":{name}");
        self.bind(name, value, type_name);
        token
    }

    pub fn bindings(&self) -> &[BoundValue] {
        &self.bindings
    }

    pub fn into_bindings(self) -> Vec<BoundValue> {
        self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
