//! CASE statements.
//!
//! The builder is a typestate chain: [`CaseStatement`] starts the statement,
//! [`when`](CaseStatement::when) moves to a state whose only operation is
//! [`then`](WhenThen::then), and only a builder holding at least one complete
//! when/then pair offers [`end`](CaseReady::end). Out-of-order sequences
//! (`then` before `when`, a second `when` while one is open, `else` with a
//! dangling `when`) simply do not typecheck.
//!
//! Both CASE forms are supported:
//!
//! - valued:   `CASE :c0 WHEN :c1 THEN :c2 ELSE NULL END`
//! - searched: `CASE WHEN cond THEN val ELSE NULL END`
//!
//! The ELSE arm always renders, defaulting to a literal NULL.

use crate::binder::ValueBinder;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::token::{Token, TokenStream};
use crate::value::Value;

use super::{Expr, Literal};

// =============================================================================
// Compiled form
// =============================================================================

/// The data behind [`Expr::Case`]. Produced by [`CaseReady::end`].
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub operand: Option<Box<Expr>>,
    pub when_thens: Vec<(Expr, Expr)>,
    pub else_clause: Option<Box<Expr>>,
    /// Explicit result type set through the builder; overrides inference.
    pub declared_type: Option<String>,
}

impl CaseExpr {
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        if self.when_thens.is_empty() {
            return Err(Error::InvalidState(
                "case expression must have at least one when clause".into(),
            ));
        }

        let mut ts = TokenStream::new();
        ts.push(Token::Case);
        if let Some(operand) = &self.operand {
            ts.space().append(&operand.to_tokens(dialect, binder)?);
        }
        for (when, then) in &self.when_thens {
            if is_null_expr(when) {
                return Err(Error::InvalidArgument(
                    "NULL is not a valid when value for a case expression".into(),
                ));
            }
            ts.space().push(Token::When).space();
            ts.append(&when.to_tokens(dialect, binder)?);
            ts.space().push(Token::Then).space();
            ts.append(&then.to_tokens(dialect, binder)?);
        }
        ts.space().push(Token::Else).space();
        match &self.else_clause {
            Some(else_expr) => ts.append(&else_expr.to_tokens(dialect, binder)?),
            None => ts.push(Token::LitNull),
        };
        ts.space().push(Token::End);
        Ok(ts)
    }

    /// The result type of this expression.
    ///
    /// An explicit declared type wins. Otherwise the inferred kinds of all
    /// then/else branches are collected, null branches ignored; when the
    /// survivors agree that kind is the result, and any disagreement (or no
    /// survivor at all) degrades to the documented `"string"` fallback.
    pub fn return_type(&self) -> String {
        if let Some(declared) = &self.declared_type {
            return declared.clone();
        }
        let mut kinds: Vec<&str> = vec![];
        let branches = self
            .when_thens
            .iter()
            .map(|(_, then)| then)
            .chain(self.else_clause.iter().map(|e| e.as_ref()));
        for branch in branches {
            if let Some(kind) = branch_type(branch) {
                kinds.push(kind);
            }
        }
        match kinds.split_first() {
            Some((first, rest)) if rest.iter().all(|k| k == first) => (*first).into(),
            _ => "string".into(),
        }
    }

    pub fn traverse(&self, f: &mut dyn FnMut(&Expr)) {
        if let Some(operand) = &self.operand {
            operand.traverse(f);
        }
        for (when, then) in &self.when_thens {
            when.traverse(f);
            then.traverse(f);
        }
        if let Some(else_expr) = &self.else_clause {
            else_expr.traverse(f);
        }
    }
}

/// The natural type of a then/else branch, or `None` when the branch is a
/// null or an inlined SQL fragment carrying no bind type.
fn branch_type(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Value {
            value: Value::Null, ..
        } => None,
        Expr::Value {
            type_name: Some(name),
            ..
        } => Some(name),
        Expr::Value { value, .. } => value.type_name(),
        Expr::Literal(Literal::Int(_)) => Some("integer"),
        Expr::Literal(Literal::Float(_)) => Some("float"),
        Expr::Literal(Literal::String(_)) => Some("string"),
        Expr::Literal(Literal::Bool(_)) => Some("boolean"),
        Expr::Literal(Literal::Null) => None,
        _ => None,
    }
}

fn is_null_expr(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Value {
            value: Value::Null,
            ..
        } | Expr::Literal(Literal::Null)
    )
}

// =============================================================================
// Typestate builder
// =============================================================================

/// A freshly started CASE statement. Offers only [`when`](Self::when);
/// there is no way to end a CASE that has no when/then pair.
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until end() is called"]
pub struct CaseStatement {
    operand: Option<Expr>,
}

impl CaseStatement {
    /// Start a searched CASE: `CASE WHEN cond THEN ...`.
    pub fn new() -> Self {
        Self { operand: None }
    }

    /// Start a valued CASE: `CASE operand WHEN value THEN ...`.
    pub fn value(operand: impl Into<Expr>) -> Self {
        Self {
            operand: Some(operand.into()),
        }
    }

    /// Open a when clause. The returned builder only accepts `then`.
    pub fn when(self, when: impl Into<Expr>) -> WhenThen {
        WhenThen {
            case: CaseExpr {
                operand: self.operand.map(Box::new),
                when_thens: vec![],
                else_clause: None,
                declared_type: None,
            },
            open_when: when.into(),
        }
    }
}

impl Default for CaseStatement {
    fn default() -> Self {
        Self::new()
    }
}

/// A CASE with an open when clause. The only way forward is
/// [`then`](Self::then).
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until end() is called"]
pub struct WhenThen {
    case: CaseExpr,
    open_when: Expr,
}

impl WhenThen {
    /// Close the open when clause with its result value.
    pub fn then(mut self, value: impl Into<Expr>) -> CaseReady {
        self.case.when_thens.push((self.open_when, value.into()));
        CaseReady { case: self.case }
    }
}

/// A CASE holding at least one complete when/then pair.
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until end() is called"]
pub struct CaseReady {
    case: CaseExpr,
}

impl CaseReady {
    /// Open another when clause.
    pub fn when(self, when: impl Into<Expr>) -> WhenThen {
        WhenThen {
            case: self.case,
            open_when: when.into(),
        }
    }

    /// Set the ELSE arm. Without it the ELSE renders as a literal NULL.
    pub fn else_(mut self, value: impl Into<Expr>) -> Self {
        self.case.else_clause = Some(Box::new(value.into()));
        self
    }

    /// Declare the result type, overriding inference.
    pub fn return_type(mut self, name: &str) -> Self {
        self.case.declared_type = Some(name.into());
        self
    }

    /// Finish the builder.
    pub fn end(self) -> Expr {
        Expr::Case(self.case)
    }
}
