//! Common table expressions and the WITH clause.
//!
//! A [`WithClause`] owns an ordered list of [`Cte`]s with unique names.
//! The RECURSIVE keyword is emitted once, when any contained CTE is
//! recursive (and the dialect takes the keyword at all). Field lists render
//! only for recursive CTEs: `cte1(field) AS (...)`. Non-recursive CTEs
//! never render their field list even when one was set.

use crate::binder::ValueBinder;
use crate::dialect::{Dialect, SqlDialect};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::token::{Token, TokenStream};

use super::Expr;

/// The body of a CTE: a full subquery or a raw SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum CteBody {
    Query(Box<Query>),
    /// Raw SQL, emitted verbatim.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input here.** Raw SQL is not sanitized.
    Raw(String),
}

impl From<Query> for CteBody {
    fn from(query: Query) -> Self {
        CteBody::Query(Box::new(query))
    }
}

/// A modifier rendered between `AS` and the body parens, such as
/// `MATERIALIZED`.
#[derive(Debug, Clone, PartialEq)]
pub enum CteModifier {
    Keyword(String),
    Expr(Expr),
}

impl From<&str> for CteModifier {
    fn from(keyword: &str) -> Self {
        CteModifier::Keyword(keyword.into())
    }
}

impl From<Expr> for CteModifier {
    fn from(expr: Expr) -> Self {
        CteModifier::Expr(expr)
    }
}

/// A single named common table expression.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct Cte {
    pub name: String,
    pub fields: Vec<String>,
    pub modifiers: Vec<CteModifier>,
    pub body: CteBody,
    pub recursive: bool,
}

impl Cte {
    pub fn new(name: &str, body: impl Into<CteBody>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
            modifiers: vec![],
            body: body.into(),
            recursive: false,
        }
    }

    /// CTE over a raw SQL body.
    pub fn raw(name: &str, sql: &str) -> Self {
        Self::new(name, CteBody::Raw(sql.into()))
    }

    pub fn fields(mut self, fields: Vec<&str>) -> Self {
        self.fields = fields.into_iter().map(String::from).collect();
        self
    }

    /// Append a modifier, kept in the order added.
    pub fn modifier(mut self, modifier: impl Into<CteModifier>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn materialized(self) -> Self {
        self.modifier("MATERIALIZED")
    }

    pub fn not_materialized(self) -> Self {
        self.modifier("NOT MATERIALIZED")
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Ident(self.name.clone()));

        if self.recursive && !self.fields.is_empty() {
            ts.lparen();
            for (i, field) in self.fields.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.push(Token::Ident(field.clone()));
            }
            ts.rparen();
        }

        ts.space().push(Token::As).space();
        for modifier in &self.modifiers {
            match modifier {
                CteModifier::Keyword(keyword) => {
                    ts.push(Token::Raw(keyword.clone()));
                }
                CteModifier::Expr(expr) => {
                    ts.append(&expr.to_tokens(dialect, binder)?);
                }
            }
            ts.space();
        }
        ts.lparen();
        match &self.body {
            CteBody::Query(query) => ts.append(&query.to_tokens(dialect, binder)?),
            CteBody::Raw(sql) => ts.push(Token::Raw(sql.clone())),
        };
        ts.rparen();
        Ok(ts)
    }
}

/// An ordered collection of CTEs with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct WithClause {
    ctes: Vec<Cte>,
}

impl WithClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a CTE. The name must not already be present.
    pub fn add(&mut self, cte: Cte) -> Result<()> {
        if self.ctes.iter().any(|existing| existing.name == cte.name) {
            return Err(Error::InvalidArgument(format!(
                "a common table expression named `{}` already exists",
                cte.name
            )));
        }
        self.ctes.push(cte);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.ctes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ctes.len()
    }

    pub fn ctes(&self) -> &[Cte] {
        &self.ctes
    }

    /// Compile the full `WITH ...` prefix.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        if self.ctes.is_empty() {
            return Err(Error::InvalidState(
                "with clause must contain at least one common table expression".into(),
            ));
        }

        let mut ts = TokenStream::new();
        ts.push(Token::With);
        if self.ctes.iter().any(|cte| cte.recursive) && dialect.emit_recursive_keyword() {
            ts.space().push(Token::Recursive);
        }
        ts.space();
        for (i, cte) in self.ctes.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.append(&cte.to_tokens(dialect, binder)?);
        }
        Ok(ts)
    }

    pub fn traverse(&self, f: &mut dyn FnMut(&Expr)) {
        let _ = f;
        // CTE bodies are queries or raw SQL, both compile boundaries; there
        // are no owned Expr children to visit here.
    }
}
