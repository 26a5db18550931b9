//! Tuple comparisons: `(a, b) = (1, 2)` and `(a, b) IN ((1, 2), (3, 4))`.
//!
//! Arity is validated at construction, so a compiled tuple comparison can
//! never emit mismatched columns and values. Multi-row operators (`IN`,
//! `NOT IN`) take a list of tuples; single-row operators take exactly one.
//!
//! Exact output shapes, spacing included:
//!
//! - `(field1, field2) = (:tuple0, :tuple1)`
//! - `(field1, field2) IN ((:tuple0,:tuple1), (:tuple2,:tuple3))`

use crate::binder::{BindScope, ValueBinder};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::token::{Token, TokenStream};
use crate::value::Value;

use super::Expr;

/// Operators a tuple comparison accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupleOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    In,
    NotIn,
}

impl TupleOperator {
    /// Whether the operator compares against a list of tuples.
    pub fn is_multi_row(self) -> bool {
        matches!(self, TupleOperator::In | TupleOperator::NotIn)
    }

    fn tokens(self) -> &'static [Token] {
        match self {
            TupleOperator::Eq => &[Token::Eq],
            TupleOperator::Ne => &[Token::Ne],
            TupleOperator::Lt => &[Token::Lt],
            TupleOperator::Gt => &[Token::Gt],
            TupleOperator::Lte => &[Token::Lte],
            TupleOperator::Gte => &[Token::Gte],
            TupleOperator::In => &[Token::In],
            TupleOperator::NotIn => &[Token::Not, Token::Space, Token::In],
        }
    }
}

/// The value side of a tuple comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum TupleValues {
    /// One tuple, for single-row operators.
    Row(Vec<Value>),
    /// A list of tuples, for IN / NOT IN.
    Rows(Vec<Vec<Value>>),
}

/// A multi-column comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleComparison {
    fields: Vec<Expr>,
    rows: Vec<Vec<Value>>,
    /// Per-field bind types; missing entries infer from the value.
    types: Vec<Option<String>>,
    op: TupleOperator,
}

impl TupleComparison {
    /// Build a tuple comparison, validating value shape and arity.
    pub fn new(
        fields: Vec<Expr>,
        values: TupleValues,
        types: Vec<Option<String>>,
        op: TupleOperator,
    ) -> Result<Self> {
        let rows = match (op.is_multi_row(), values) {
            (true, TupleValues::Rows(rows)) => rows,
            (true, TupleValues::Row(_)) => {
                return Err(Error::InvalidArgument(
                    "multi-tuple comparison requires a list of tuples, got a single tuple".into(),
                ))
            }
            (false, TupleValues::Row(row)) => vec![row],
            (false, TupleValues::Rows(_)) => {
                return Err(Error::InvalidArgument(
                    "single-tuple comparison requires a single tuple, got a list of tuples".into(),
                ))
            }
        };
        for row in &rows {
            if row.len() != fields.len() {
                return Err(Error::InvalidArgument(format!(
                    "tuple arity mismatch: {} fields but {} values",
                    fields.len(),
                    row.len()
                )));
            }
        }
        Ok(Self {
            fields,
            rows,
            types,
            op,
        })
    }

    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = TokenStream::new();

        // Field tuple: (f1, f2)
        ts.lparen();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.append(&field.to_tokens(dialect, binder)?);
        }
        ts.rparen();

        ts.space();
        ts.extend(self.op.tokens().iter().cloned());
        ts.space();

        if self.op.is_multi_row() {
            // ((:tuple0,:tuple1), (:tuple2,:tuple3)) - compact inside each
            // group, a space only between groups.
            ts.lparen();
            for (i, row) in self.rows.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.lparen();
                for (j, value) in row.iter().enumerate() {
                    if j > 0 {
                        ts.comma();
                    }
                    ts.push(self.bind_field(j, value, binder));
                }
                ts.rparen();
            }
            ts.rparen();
        } else {
            // (:tuple0, :tuple1)
            ts.lparen();
            for (j, value) in self.rows[0].iter().enumerate() {
                if j > 0 {
                    ts.comma().space();
                }
                ts.push(self.bind_field(j, value, binder));
            }
            ts.rparen();
        }

        Ok(ts)
    }

    fn bind_field(&self, index: usize, value: &Value, binder: &mut ValueBinder) -> Token {
        let type_name = self
            .types
            .get(index)
            .and_then(|t| t.clone())
            .or_else(|| value.type_name().map(String::from));
        let token = binder.bind_value(BindScope::Tuple, value.clone(), type_name);
        Token::Placeholder(token)
    }

    pub fn traverse(&self, f: &mut dyn FnMut(&Expr)) {
        for field in &self.fields {
            field.traverse(f);
        }
    }
}
