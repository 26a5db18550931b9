//! Expression AST - the core of SQL expression building.
//!
//! This module provides a strongly-typed AST for SQL expressions with
//! exhaustive pattern matching enforced by the compiler. Compilation is a
//! single pass: [`Expr::to_tokens`] threads one [`ValueBinder`] through the
//! whole tree, so the SQL text and the recorded bindings come from the same
//! traversal and cannot drift apart.
//!
//! Application values flow through [`Expr::Value`] nodes, which emit a
//! placeholder and record the binding. Inline literals exist for the few
//! places SQL text wants a literal (`SELECT 1, 2`, frame offsets).

pub mod case;
pub mod conditions;
pub mod cte;
pub mod tuple;
pub mod window;

use crate::binder::{BindScope, ValueBinder};
use crate::dialect::{Dialect, SqlDialect};
use crate::error::Result;
use crate::token::{Token, TokenStream};
use crate::value::Value;

use case::CaseExpr;
use conditions::ConditionSet;
use tuple::TupleComparison;
use window::OverClause;

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled in `to_tokens()` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier with optional collation: `name` / `name COLLATE collation`.
    Identifier {
        name: String,
        collation: Option<String>,
    },

    /// A bound application value: emits a placeholder and records the
    /// binding. The scope picks the placeholder prefix.
    Value {
        value: Value,
        /// Explicit bind type; `None` infers from the value.
        type_name: Option<String>,
        scope: BindScope,
    },

    /// Any expression forced to a collation: `expr COLLATE collation`.
    /// Pairs with [`bind`] for collated string comparisons.
    Collate {
        expr: Box<Expr>,
        collation: String,
    },

    /// Date/time interval: `INTERVAL expr unit`.
    Interval {
        value: Box<Expr>,
        unit: String,
    },

    /// Inline literal rendered directly into the SQL text.
    Literal(Literal),

    /// Binary operation: left op right
    Binary {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// Unary operation: op expr
    Unary { op: UnaryOperator, expr: Box<Expr> },

    /// Function call: name(args...)
    Function {
        name: String,
        args: Vec<Expr>,
        distinct: bool,
    },

    /// IN list: expr IN (values...)
    In {
        expr: Box<Expr>,
        values: Vec<Expr>,
        negated: bool,
    },

    /// IS NULL / IS NOT NULL
    IsNull { expr: Box<Expr>, negated: bool },

    /// BETWEEN: expr BETWEEN low AND high
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// Nested boolean condition tree.
    ///
    /// A multi-part set is wrapped in parentheses; a single part emits
    /// bare; an empty set emits nothing at all.
    Conditions(ConditionSet),

    /// CASE statement, built through the typestate builder in [`case`].
    Case(CaseExpr),

    /// Tuple comparison: `(a, b) = (...)` / `(a, b) IN (...)`.
    Tuple(TupleComparison),

    /// Window function: function OVER (...).
    Window {
        function: Box<Expr>,
        over: OverClause,
    },

    /// Subquery: (SELECT ...)
    Subquery(Box<crate::query::Query>),

    /// Raw SQL expression passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Raw SQL is not sanitized
    /// and can lead to SQL injection vulnerabilities. For user-provided
    /// values, use [`Expr::Value`] which binds through a placeholder.
    Raw(String),
}

/// Inline literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    // Logical
    And,
    Or,
    // Arithmetic
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    // String
    Concat,
    Like,
    NotLike,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
}

// =============================================================================
// Expression to Tokens
// =============================================================================

impl Expr {
    /// Compile this expression to a token stream, recording every bound
    /// value in `binder`.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = TokenStream::new();

        match self {
            Expr::Identifier { name, collation } => {
                ts.push(Token::Ident(name.clone()));
                if let Some(collation) = collation {
                    ts.space()
                        .push(Token::Collate)
                        .space()
                        .push(Token::Raw(collation.clone()));
                }
            }

            Expr::Value {
                value,
                type_name,
                scope,
            } => {
                let type_name = type_name
                    .clone()
                    .or_else(|| value.type_name().map(String::from));
                let token = binder.bind_value(*scope, value.clone(), type_name);
                ts.push(Token::Placeholder(token));
            }

            Expr::Collate { expr, collation } => {
                ts.append(&expr.to_tokens(dialect, binder)?);
                ts.space()
                    .push(Token::Collate)
                    .space()
                    .push(Token::Raw(collation.clone()));
            }

            Expr::Interval { value, unit } => {
                ts.push(Token::Interval).space();
                ts.append(&value.to_tokens(dialect, binder)?);
                ts.space().push(Token::Raw(unit.clone()));
            }

            Expr::Literal(lit) => {
                ts.push(match lit {
                    Literal::Int(n) => Token::LitInt(*n),
                    Literal::Float(f) => Token::LitFloat(*f),
                    Literal::String(s) => Token::LitString(s.clone()),
                    Literal::Bool(b) => Token::LitBool(*b),
                    Literal::Null => Token::LitNull,
                });
            }

            Expr::Binary { left, op, right } => {
                // Dialects without the || operator get CONCAT(left, right)
                if *op == BinaryOperator::Concat && !dialect.supports_concat_operator() {
                    ts.push(Token::FunctionName("CONCAT".into()));
                    ts.lparen();
                    ts.append(&left.to_tokens(dialect, binder)?);
                    ts.comma().space();
                    ts.append(&right.to_tokens(dialect, binder)?);
                    ts.rparen();
                } else {
                    ts.append(&left.to_tokens(dialect, binder)?);
                    ts.space();
                    ts.push(binary_op_to_token(*op));
                    ts.space();
                    ts.append(&right.to_tokens(dialect, binder)?);
                }
            }

            Expr::Unary { op, expr } => {
                ts.push(match op {
                    UnaryOperator::Not => Token::Not,
                    UnaryOperator::Minus => Token::Minus,
                });
                ts.space();
                ts.append(&expr.to_tokens(dialect, binder)?);
            }

            Expr::Function {
                name,
                args,
                distinct,
            } => {
                ts.push(Token::FunctionName(name.clone()));
                ts.lparen();
                if *distinct {
                    ts.push(Token::Distinct).space();
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.append(&arg.to_tokens(dialect, binder)?);
                }
                ts.rparen();
            }

            Expr::In {
                expr,
                values,
                negated,
            } => {
                // "x IN ()" is invalid SQL; an empty list degenerates to a
                // constant: IN () is never true, NOT IN () always is.
                if values.is_empty() {
                    ts.push(Token::LitBool(*negated));
                } else {
                    ts.append(&expr.to_tokens(dialect, binder)?);
                    if *negated {
                        ts.space().push(Token::Not);
                    }
                    ts.space().push(Token::In).space().lparen();
                    for (i, val) in values.iter().enumerate() {
                        if i > 0 {
                            ts.comma();
                        }
                        ts.append(&val.to_tokens(dialect, binder)?);
                    }
                    ts.rparen();
                }
            }

            Expr::IsNull { expr, negated } => {
                ts.append(&expr.to_tokens(dialect, binder)?);
                ts.space();
                ts.push(if *negated {
                    Token::IsNotNull
                } else {
                    Token::IsNull
                });
            }

            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                ts.append(&expr.to_tokens(dialect, binder)?);
                if *negated {
                    ts.space().push(Token::Not);
                }
                ts.space().push(Token::Between).space();
                ts.append(&low.to_tokens(dialect, binder)?);
                ts.space().push(Token::And).space();
                ts.append(&high.to_tokens(dialect, binder)?);
            }

            Expr::Paren(inner) => {
                ts.lparen();
                ts.append(&inner.to_tokens(dialect, binder)?);
                ts.rparen();
            }

            Expr::Conditions(set) => {
                ts.append(&set.to_tokens(dialect, binder)?);
            }

            Expr::Case(case) => {
                ts.append(&case.to_tokens(dialect, binder)?);
            }

            Expr::Tuple(tuple) => {
                ts.append(&tuple.to_tokens(dialect, binder)?);
            }

            Expr::Window { function, over } => {
                ts.append(&function.to_tokens(dialect, binder)?);
                ts.space().push(Token::Over).space().lparen();
                ts.append(&over.to_tokens(dialect, binder)?);
                ts.rparen();
            }

            Expr::Subquery(query) => {
                ts.lparen();
                ts.append(&query.to_tokens(dialect, binder)?);
                ts.rparen();
            }

            Expr::Raw(sql) => {
                ts.push(Token::Raw(sql.clone()));
            }
        }

        Ok(ts)
    }

    /// Visit this expression and every owned child expression, depth-first.
    ///
    /// Values are leaves; subqueries are a boundary (their internals are
    /// compiled, not traversed, from here).
    pub fn traverse(&self, f: &mut dyn FnMut(&Expr)) {
        f(self);
        match self {
            Expr::Identifier { .. }
            | Expr::Value { .. }
            | Expr::Literal(_)
            | Expr::Subquery(_)
            | Expr::Raw(_) => {}

            Expr::Binary { left, right, .. } => {
                left.traverse(f);
                right.traverse(f);
            }
            Expr::Unary { expr, .. }
            | Expr::Paren(expr)
            | Expr::Collate { expr, .. }
            | Expr::Interval { value: expr, .. } => expr.traverse(f),
            Expr::Function { args, .. } => {
                for arg in args {
                    arg.traverse(f);
                }
            }
            Expr::In { expr, values, .. } => {
                expr.traverse(f);
                for v in values {
                    v.traverse(f);
                }
            }
            Expr::IsNull { expr, .. } => expr.traverse(f),
            Expr::Between {
                expr, low, high, ..
            } => {
                expr.traverse(f);
                low.traverse(f);
                high.traverse(f);
            }
            Expr::Conditions(set) => set.traverse(f),
            Expr::Case(case) => case.traverse(f),
            Expr::Tuple(tuple) => tuple.traverse(f),
            Expr::Window { function, over } => {
                function.traverse(f);
                over.traverse(f);
            }
        }
    }
}

fn binary_op_to_token(op: BinaryOperator) -> Token {
    match op {
        BinaryOperator::Eq => Token::Eq,
        BinaryOperator::Ne => Token::Ne,
        BinaryOperator::Lt => Token::Lt,
        BinaryOperator::Gt => Token::Gt,
        BinaryOperator::Lte => Token::Lte,
        BinaryOperator::Gte => Token::Gte,
        BinaryOperator::And => Token::And,
        BinaryOperator::Or => Token::Or,
        BinaryOperator::Plus => Token::Plus,
        BinaryOperator::Minus => Token::Minus,
        BinaryOperator::Mul => Token::Mul,
        BinaryOperator::Div => Token::Div,
        BinaryOperator::Mod => Token::Mod,
        BinaryOperator::Concat => Token::Concat,
        BinaryOperator::Like => Token::Like,
        BinaryOperator::NotLike => Token::NotLike,
    }
}

// =============================================================================
// Expression Constructors
// =============================================================================

/// Create an identifier reference.
pub fn col(name: &str) -> Expr {
    Expr::Identifier {
        name: name.into(),
        collation: None,
    }
}

/// Create an identifier with a COLLATE clause.
pub fn col_collate(name: &str, collation: &str) -> Expr {
    Expr::Identifier {
        name: name.into(),
        collation: Some(collation.into()),
    }
}

/// Create a qualified identifier reference (table.column).
pub fn table_col(table: &str, column: &str) -> Expr {
    col(&format!("{table}.{column}"))
}

/// Bind an application value: emits a placeholder, records the binding.
pub fn bind(value: impl Into<Value>) -> Expr {
    Expr::Value {
        value: value.into(),
        type_name: None,
        scope: BindScope::Common,
    }
}

/// Bind a value with an explicit type name.
pub fn bind_typed(value: impl Into<Value>, type_name: &str) -> Expr {
    Expr::Value {
        value: value.into(),
        type_name: Some(type_name.into()),
        scope: BindScope::Common,
    }
}

/// Bind a string value compared under an explicit collation:
/// `:c0 COLLATE utf8_general_ci`.
pub fn bind_collated(value: impl Into<Value>, collation: &str) -> Expr {
    Expr::Collate {
        expr: Box::new(bind(value)),
        collation: collation.into(),
    }
}

/// Date/time interval: `INTERVAL :c0 DAY`.
pub fn interval(value: impl Into<Expr>, unit: &str) -> Expr {
    Expr::Interval {
        value: Box::new(value.into()),
        unit: unit.into(),
    }
}

/// Create an inline integer literal.
pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

/// Create an inline float literal.
pub fn lit_float(f: f64) -> Expr {
    Expr::Literal(Literal::Float(f))
}

/// Create an inline string literal.
pub fn lit_str(s: &str) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

/// Create an inline boolean literal.
pub fn lit_bool(b: bool) -> Expr {
    Expr::Literal(Literal::Bool(b))
}

/// Create an inline NULL literal.
pub fn lit_null() -> Expr {
    Expr::Literal(Literal::Null)
}

/// Create a star (*) expression.
pub fn star() -> Expr {
    col("*")
}

fn function(name: &str, args: Vec<Expr>, distinct: bool) -> Expr {
    // Plain bound values inside a function call use the param scope.
    let args = args
        .into_iter()
        .map(|arg| match arg {
            Expr::Value {
                value,
                type_name,
                scope: BindScope::Common,
            } => Expr::Value {
                value,
                type_name,
                scope: BindScope::Param,
            },
            other => other,
        })
        .collect();
    Expr::Function {
        name: name.into(),
        args,
        distinct,
    }
}

/// Generic function call. Bound-value arguments use the `param` scope.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    function(name, args, false)
}

/// COUNT(expr)
pub fn count(expr: Expr) -> Expr {
    function("COUNT", vec![expr], false)
}

/// COUNT(*)
pub fn count_star() -> Expr {
    function("COUNT", vec![star()], false)
}

/// COUNT(DISTINCT expr)
pub fn count_distinct(expr: Expr) -> Expr {
    function("COUNT", vec![expr], true)
}

/// SUM(expr)
pub fn sum(expr: Expr) -> Expr {
    function("SUM", vec![expr], false)
}

/// AVG(expr)
pub fn avg(expr: Expr) -> Expr {
    function("AVG", vec![expr], false)
}

/// MIN(expr)
pub fn min(expr: Expr) -> Expr {
    function("MIN", vec![expr], false)
}

/// MAX(expr)
pub fn max(expr: Expr) -> Expr {
    function("MAX", vec![expr], false)
}

/// COALESCE(args...)
pub fn coalesce(args: Vec<Expr>) -> Expr {
    function("COALESCE", args, false)
}

/// ROW_NUMBER()
pub fn row_number() -> Expr {
    function("ROW_NUMBER", vec![], false)
}

/// RANK()
pub fn rank() -> Expr {
    function("RANK", vec![], false)
}

/// DENSE_RANK()
pub fn dense_rank() -> Expr {
    function("DENSE_RANK", vec![], false)
}

/// Raw SQL expression (pass-through, no parsing).
///
/// # Security Warning
///
/// **Never pass user input to this function.** The SQL is not sanitized
/// and can lead to SQL injection vulnerabilities. Use it sparingly for
/// dialect-specific syntax the builder does not cover.
pub fn raw_sql(sql: &str) -> Expr {
    Expr::Raw(sql.into())
}

// =============================================================================
// Expression Builder Trait
// =============================================================================

/// Extension trait for building expressions fluently.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    // Comparison operators
    fn eq(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Eq, other.into())
    }

    fn ne(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Ne, other.into())
    }

    fn gt(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Gt, other.into())
    }

    fn gte(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Gte, other.into())
    }

    fn lt(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Lt, other.into())
    }

    fn lte(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Lte, other.into())
    }

    // Logical operators
    fn and(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::And, other.into())
    }

    fn or(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Or, other.into())
    }

    fn not(self) -> Expr {
        Expr::Unary {
            op: UnaryOperator::Not,
            expr: Box::new(self.into_expr()),
        }
    }

    // Arithmetic operators
    fn add(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Plus, other.into())
    }

    fn sub(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Minus, other.into())
    }

    fn mul(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Mul, other.into())
    }

    fn div(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Div, other.into())
    }

    // String operators
    fn like(self, pattern: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Like, pattern.into())
    }

    fn not_like(self, pattern: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::NotLike, pattern.into())
    }

    fn concat(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Concat, other.into())
    }

    fn collate(self, collation: &str) -> Expr {
        Expr::Collate {
            expr: Box::new(self.into_expr()),
            collation: collation.into(),
        }
    }

    // NULL checks
    #[allow(clippy::wrong_self_convention)]
    fn is_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: false,
        }
    }

    #[allow(clippy::wrong_self_convention)]
    fn is_not_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self.into_expr()),
            negated: true,
        }
    }

    // IN operator
    fn in_list(self, values: Vec<Expr>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            values,
            negated: false,
        }
    }

    fn not_in_list(self, values: Vec<Expr>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            values,
            negated: true,
        }
    }

    // BETWEEN operator
    fn between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        Expr::Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: false,
        }
    }

    fn not_between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        Expr::Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: true,
        }
    }

    /// Alias this expression (for SELECT list).
    fn alias(self, name: &str) -> crate::query::SelectExpr {
        crate::query::SelectExpr {
            expr: self.into_expr(),
            alias: Some(name.into()),
        }
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

// =============================================================================
// Conversions
// =============================================================================

// Plain Rust values convert to bound placeholders, not inline literals;
// use the lit_* constructors when inline text is wanted.

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        bind(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        bind(n)
    }
}

impl From<f64> for Expr {
    fn from(f: f64) -> Self {
        bind(f)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        bind(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        bind(s)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        bind(b)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value {
            value,
            type_name: None,
            scope: BindScope::Common,
        }
    }
}

impl From<crate::query::Query> for Expr {
    fn from(query: crate::query::Query) -> Self {
        Expr::Subquery(Box::new(query))
    }
}

// =============================================================================
// Tests
// =============================================================================
