//! # sqlforge
//!
//! A driver-agnostic SQL expression tree and query builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Builders (Query / Insert / Update / Delete)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [expression tree]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Expr (conditions, CASE, tuples, windows, CTEs, ...)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [single compile pass + ValueBinder]
//! ┌─────────────────────────────────────────────────────────┐
//! │              TokenStream ── dialect serialize            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │       CompiledStatement { sql, bindings } ── Driver      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! SQL text and the binding list always come from the same traversal, so
//! placeholders and values cannot drift apart. Values never appear inline
//! unless a `lit_*` constructor is used explicitly.

pub mod binder;
pub mod dialect;
pub mod dml;
pub mod driver;
pub mod error;
pub mod expr;
pub mod query;
pub mod test_utils;
pub mod token;
pub mod types;
pub mod value;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::binder::{BindScope, BoundValue, ValueBinder};
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::dml::{Delete, Insert, Update};
    pub use crate::error::{Error, Result};
    pub use crate::expr::case::CaseStatement;
    pub use crate::expr::conditions::{ConditionSet, Conjunction};
    pub use crate::expr::cte::{Cte, CteModifier, WithClause};
    pub use crate::expr::tuple::{TupleComparison, TupleOperator, TupleValues};
    pub use crate::expr::window::{WindowBuilder, WindowExt, WindowFrame, WindowOrderBy};
    pub use crate::expr::{
        // Constructors
        avg,
        bind,
        bind_collated,
        bind_typed,
        coalesce,
        col,
        col_collate,
        count,
        count_distinct,
        count_star,
        func,
        interval,
        lit_bool,
        lit_float,
        lit_int,
        lit_null,
        lit_str,
        max,
        min,
        star,
        sum,
        table_col,
        // Types
        BinaryOperator,
        Expr,
        ExprExt,
        Literal,
        UnaryOperator,
    };
    pub use crate::query::{
        CompiledStatement, DistinctOnPolicy, Join, JoinType, LimitOffset, OrderByExpr, Query,
        SelectExpr, TableRef,
    };
    pub use crate::token::{Token, TokenStream};
    pub use crate::types::{TypeHandler, TypeRegistry};
    pub use crate::value::{StorageKind, Value};
}

// Also export at crate root for convenience
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use expr::{col, count_star, lit_bool, lit_int, lit_str, sum, table_col, Expr, ExprExt};
pub use query::{CompiledStatement, OrderByExpr, Query, SelectExpr, TableRef};
pub use token::{Token, TokenStream};
pub use value::Value;
