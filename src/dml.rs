//! DML statement builders - INSERT, UPDATE, DELETE.
//!
//! Data values always travel through the [`ValueBinder`] as placeholders;
//! only structure (table names, columns, computed SET expressions) appears
//! inline. Each builder compiles with the same single-pass contract as
//! [`Query`](crate::query::Query).

use crate::binder::{BindScope, ValueBinder};
use crate::dialect::{Dialect, SqlDialect};
use crate::error::{Error, Result};
use crate::expr::conditions::{ConditionSet, Conjunction};
use crate::expr::Expr;
use crate::query::{merge_condition, CompiledStatement, Query};
use crate::token::{Token, TokenStream};
use crate::value::Value;

// ============================================================================
// INSERT
// ============================================================================

/// INSERT statement.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "DML statements have no effect until compiled with compile() or to_sql()"]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub from_query: Option<Box<Query>>,
    pub returning: Vec<Expr>,
}

impl Insert {
    /// Create a new INSERT statement.
    pub fn into(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            from_query: None,
            returning: Vec::new(),
        }
    }

    /// Set the column list.
    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(|c| c.into()).collect();
        self
    }

    /// Append a row of values. Arity against the column list is checked at
    /// compile time.
    pub fn values(mut self, row: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.rows.push(row.into_iter().map(|v| v.into()).collect());
        self
    }

    /// INSERT INTO ... SELECT. Mutually exclusive with row values.
    pub fn from_query(mut self, query: Query) -> Self {
        self.from_query = Some(Box::new(query));
        self
    }

    /// Add RETURNING clause. Emitted only when the dialect supports it.
    pub fn returning(mut self, exprs: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        self.returning = exprs.into_iter().map(|e| e.into()).collect();
        self
    }

    /// Convert to token stream, binding row values through the caller's
    /// binder.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        if self.rows.is_empty() && self.from_query.is_none() {
            return Err(Error::InvalidState(
                "insert requires values or a source query".into(),
            ));
        }
        if !self.rows.is_empty() && self.from_query.is_some() {
            return Err(Error::InvalidState(
                "insert cannot mix values with a source query".into(),
            ));
        }

        let mut ts = TokenStream::new();
        ts.push(Token::Insert)
            .space()
            .push(Token::Into)
            .space()
            .push(Token::Ident(self.table.clone()));

        if !self.columns.is_empty() {
            ts.space().lparen();
            for (i, col) in self.columns.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.push(Token::Ident(col.clone()));
            }
            ts.rparen();
        }

        if let Some(query) = &self.from_query {
            ts.space();
            ts.append(&query.to_tokens(dialect, binder)?);
        } else {
            ts.space().push(Token::Values).space();
            for (i, row) in self.rows.iter().enumerate() {
                if !self.columns.is_empty() && row.len() != self.columns.len() {
                    return Err(Error::InvalidArgument(format!(
                        "insert row has {} values but {} columns were named",
                        row.len(),
                        self.columns.len()
                    )));
                }
                if i > 0 {
                    ts.comma().space();
                }
                ts.lparen();
                for (j, value) in row.iter().enumerate() {
                    if j > 0 {
                        ts.comma().space();
                    }
                    let type_name = value.type_name().map(str::to_string);
                    let placeholder =
                        binder.bind_value(BindScope::Common, value.clone(), type_name);
                    ts.push(Token::Placeholder(placeholder));
                }
                ts.rparen();
            }
        }

        if !self.returning.is_empty() && dialect.supports_returning() {
            ts.space().push(Token::Returning).space();
            for (i, expr) in self.returning.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&expr.to_tokens(dialect, binder)?);
            }
        }

        Ok(ts)
    }

    /// Compile to SQL text and bindings with a fresh binder.
    pub fn compile(&self, dialect: Dialect) -> Result<CompiledStatement> {
        let mut binder = ValueBinder::new();
        let sql = self.to_tokens(dialect, &mut binder)?.serialize(dialect);
        Ok(CompiledStatement {
            sql,
            bindings: binder.into_bindings(),
        })
    }

    /// Compile and return only the SQL text.
    pub fn to_sql(&self, dialect: Dialect) -> Result<String> {
        Ok(self.compile(dialect)?.sql)
    }
}

// ============================================================================
// UPDATE
// ============================================================================

/// UPDATE statement.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "DML statements have no effect until compiled with compile() or to_sql()"]
pub struct Update {
    pub table: String,
    pub set: Vec<(String, Expr)>,
    pub where_clause: ConditionSet,
    pub returning: Vec<Expr>,
}

impl Update {
    /// Create a new UPDATE statement.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Set a column. Plain values become bound placeholders through the
    /// usual `From` conversions; pass an expression for computed sets.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.set.push((column.into(), value.into()));
        self
    }

    /// Set multiple columns.
    pub fn set_many(
        mut self,
        assignments: impl IntoIterator<Item = (impl Into<String>, impl Into<Expr>)>,
    ) -> Self {
        self.set
            .extend(assignments.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// AND a condition into the WHERE root.
    pub fn filter(self, condition: impl Into<Expr>) -> Self {
        self.and_where(condition)
    }

    pub fn and_where(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.where_clause, Conjunction::And, condition.into());
        self
    }

    pub fn or_where(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.where_clause, Conjunction::Or, condition.into());
        self
    }

    /// Add RETURNING clause. Emitted only when the dialect supports it.
    pub fn returning(mut self, exprs: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        self.returning = exprs.into_iter().map(|e| e.into()).collect();
        self
    }

    /// Convert to token stream.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        if self.set.is_empty() {
            return Err(Error::InvalidState(
                "update requires at least one set assignment".into(),
            ));
        }

        let mut ts = TokenStream::new();
        ts.push(Token::Update)
            .space()
            .push(Token::Ident(self.table.clone()))
            .space()
            .push(Token::Set)
            .space();

        for (i, (col, expr)) in self.set.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Ident(col.clone()))
                .space()
                .push(Token::Eq)
                .space();
            ts.append(&expr.to_tokens(dialect, binder)?);
        }

        if !self.where_clause.is_empty() {
            ts.space().push(Token::Where).space();
            ts.append(&self.where_clause.to_tokens(dialect, binder)?);
        }

        if !self.returning.is_empty() && dialect.supports_returning() {
            ts.space().push(Token::Returning).space();
            for (i, expr) in self.returning.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&expr.to_tokens(dialect, binder)?);
            }
        }

        Ok(ts)
    }

    /// Compile to SQL text and bindings with a fresh binder.
    pub fn compile(&self, dialect: Dialect) -> Result<CompiledStatement> {
        let mut binder = ValueBinder::new();
        let sql = self.to_tokens(dialect, &mut binder)?.serialize(dialect);
        Ok(CompiledStatement {
            sql,
            bindings: binder.into_bindings(),
        })
    }

    /// Compile and return only the SQL text.
    pub fn to_sql(&self, dialect: Dialect) -> Result<String> {
        Ok(self.compile(dialect)?.sql)
    }
}

// ============================================================================
// DELETE
// ============================================================================

/// DELETE statement.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "DML statements have no effect until compiled with compile() or to_sql()"]
pub struct Delete {
    pub table: String,
    pub where_clause: ConditionSet,
    pub returning: Vec<Expr>,
}

impl Delete {
    /// Create a new DELETE statement.
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// AND a condition into the WHERE root.
    pub fn filter(self, condition: impl Into<Expr>) -> Self {
        self.and_where(condition)
    }

    pub fn and_where(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.where_clause, Conjunction::And, condition.into());
        self
    }

    pub fn or_where(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.where_clause, Conjunction::Or, condition.into());
        self
    }

    /// Add RETURNING clause. Emitted only when the dialect supports it.
    pub fn returning(mut self, exprs: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        self.returning = exprs.into_iter().map(|e| e.into()).collect();
        self
    }

    /// Convert to token stream.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Delete)
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident(self.table.clone()));

        if !self.where_clause.is_empty() {
            ts.space().push(Token::Where).space();
            ts.append(&self.where_clause.to_tokens(dialect, binder)?);
        }

        if !self.returning.is_empty() && dialect.supports_returning() {
            ts.space().push(Token::Returning).space();
            for (i, expr) in self.returning.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&expr.to_tokens(dialect, binder)?);
            }
        }

        Ok(ts)
    }

    /// Compile to SQL text and bindings with a fresh binder.
    pub fn compile(&self, dialect: Dialect) -> Result<CompiledStatement> {
        let mut binder = ValueBinder::new();
        let sql = self.to_tokens(dialect, &mut binder)?.serialize(dialect);
        Ok(CompiledStatement {
            sql,
            bindings: binder.into_bindings(),
        })
    }

    /// Compile and return only the SQL text.
    pub fn to_sql(&self, dialect: Dialect) -> Result<String> {
        Ok(self.compile(dialect)?.sql)
    }
}

// ============================================================================
// Tests
// ============================================================================
