//! Boolean condition trees.
//!
//! A [`ConditionSet`] holds an ordered list of parts joined by a single
//! conjunction. Emission rules, which several tests pin down exactly:
//!
//! - zero parts compile to the empty string (no parens, no keywords);
//! - one part emits bare, without wrapping parentheses;
//! - two or more parts are joined by ` AND ` / ` OR ` and wrapped in
//!   parentheses, at the root as much as anywhere else.

use crate::binder::ValueBinder;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::token::{Token, TokenStream};
use crate::value::Value;

use super::case::{CaseReady, CaseStatement};
use super::{bind, col, Expr, ExprExt};

/// The boolean joiner between sibling parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    fn token(self) -> Token {
        match self {
            Conjunction::And => Token::And,
            Conjunction::Or => Token::Or,
        }
    }
}

/// An ordered list of condition expressions joined by one conjunction.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct ConditionSet {
    pub conjunction: Conjunction,
    parts: Vec<Expr>,
}

impl ConditionSet {
    pub fn new(conjunction: Conjunction) -> Self {
        Self {
            conjunction,
            parts: vec![],
        }
    }

    /// An AND-joined set.
    pub fn all() -> Self {
        Self::new(Conjunction::And)
    }

    /// An OR-joined set.
    pub fn any() -> Self {
        Self::new(Conjunction::Or)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn parts(&self) -> &[Expr] {
        &self.parts
    }

    /// Whether any part is itself an expression tree rather than a
    /// single comparison.
    pub fn has_nested_expression(&self) -> bool {
        self.parts.iter().any(|p| {
            matches!(
                p,
                Expr::Conditions(_) | Expr::Case(_) | Expr::Tuple(_) | Expr::Subquery(_)
            )
        })
    }

    /// Map over the direct parts. The callback may rewrite a part or
    /// drop it by returning `None`.
    pub fn iterate_parts(mut self, mut f: impl FnMut(Expr) -> Option<Expr>) -> Self {
        self.parts = self.parts.into_iter().filter_map(&mut f).collect();
        self
    }

    /// Add an already-built expression.
    pub fn add(mut self, expr: impl Into<Expr>) -> Self {
        self.parts.push(expr.into());
        self
    }

    /// Nest another condition set.
    pub fn nest(mut self, set: ConditionSet) -> Self {
        self.parts.push(Expr::Conditions(set));
        self
    }

    // =========================================================================
    // Comparison helpers
    // =========================================================================

    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(col(field).eq(bind(value)))
    }

    pub fn not_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(col(field).ne(bind(value)))
    }

    pub fn gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(col(field).gt(bind(value)))
    }

    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(col(field).lt(bind(value)))
    }

    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(col(field).gte(bind(value)))
    }

    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.add(col(field).lte(bind(value)))
    }

    pub fn like(self, field: &str, pattern: impl Into<Value>) -> Self {
        self.add(col(field).like(bind(pattern)))
    }

    pub fn not_like(self, field: &str, pattern: impl Into<Value>) -> Self {
        self.add(col(field).not_like(bind(pattern)))
    }

    pub fn in_list(self, field: &str, values: Vec<Value>) -> Self {
        self.add(col(field).in_list(values.into_iter().map(bind).collect()))
    }

    pub fn not_in(self, field: &str, values: Vec<Value>) -> Self {
        self.add(col(field).not_in_list(values.into_iter().map(bind).collect()))
    }

    pub fn is_null(self, field: &str) -> Self {
        self.add(col(field).is_null())
    }

    pub fn is_not_null(self, field: &str) -> Self {
        self.add(col(field).is_not_null())
    }

    /// `(field NOT IN (...) OR (field) IS NULL)` - NOT IN alone is never
    /// true when the column is NULL, so the null check is attached
    /// explicitly.
    pub fn not_in_or_null(self, field: &str, values: Vec<Value>) -> Self {
        let not_in = col(field).not_in_list(values.into_iter().map(bind).collect());
        let null_check = Expr::Paren(Box::new(col(field))).is_null();
        self.nest(ConditionSet::any().add(not_in).add(null_check))
    }

    /// Build a CASE expression and add it as a part. A `Some` operand
    /// gives the simple form (`CASE x WHEN ...`), `None` the searched
    /// form (`CASE WHEN cond ...`).
    pub fn case<F>(self, operand: Option<Expr>, build: F) -> Self
    where
        F: FnOnce(CaseStatement) -> CaseReady,
    {
        let start = match operand {
            Some(operand) => CaseStatement::value(operand),
            None => CaseStatement::new(),
        };
        self.add(build(start).end())
    }

    /// Condition from a field string with an optional trailing operator:
    /// `cond("age >=", 21)`. A bare field name means equality. Unknown
    /// operator suffixes are rejected rather than passed through.
    pub fn cond(self, field_with_op: &str, value: impl Into<Value>) -> Result<Self> {
        let trimmed = field_with_op.trim();
        let (field, op) = match trimmed.split_once(' ') {
            None => (trimmed, "="),
            Some((field, op)) => (field, op.trim()),
        };
        let value = bind(value);
        let expr = match op.to_uppercase().as_str() {
            "=" => col(field).eq(value),
            "!=" | "<>" => col(field).ne(value),
            ">" => col(field).gt(value),
            "<" => col(field).lt(value),
            ">=" => col(field).gte(value),
            "<=" => col(field).lte(value),
            "LIKE" => col(field).like(value),
            "NOT LIKE" => col(field).not_like(value),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unknown operator `{other}` in condition `{trimmed}`"
                )))
            }
        };
        Ok(self.add(expr))
    }

    // =========================================================================
    // Compilation
    // =========================================================================

    /// Compile the set. A lone clause emits bare; two or more clauses
    /// are joined by the conjunction and wrapped in parentheses, even
    /// at the root of a WHERE or HAVING.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut rendered = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            let part_ts = part.to_tokens(dialect, binder)?;
            if !part_ts.is_empty() {
                rendered.push(part_ts);
            }
        }
        let mut ts = TokenStream::new();
        let wrap = rendered.len() > 1;
        if wrap {
            ts.lparen();
        }
        for (i, part_ts) in rendered.iter().enumerate() {
            if i > 0 {
                ts.space().push(self.conjunction.token()).space();
            }
            ts.append(part_ts);
        }
        if wrap {
            ts.rparen();
        }
        Ok(ts)
    }

    /// Visit every part depth-first.
    pub fn traverse(&self, f: &mut dyn FnMut(&Expr)) {
        for part in &self.parts {
            part.traverse(f);
        }
    }
}

impl From<ConditionSet> for Expr {
    fn from(set: ConditionSet) -> Self {
        Expr::Conditions(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(set: &ConditionSet) -> (String, ValueBinder) {
        let mut binder = ValueBinder::new();
        let sql = set
            .to_tokens(Dialect::Ansi, &mut binder)
            .unwrap()
            .serialize(Dialect::Ansi);
        (sql, binder)
    }

    #[test]
    fn test_empty_set_compiles_to_empty_string() {
        let (sql, binder) = compile(&ConditionSet::all());
        assert_eq!(sql, "");
        assert!(binder.is_empty());
    }

    #[test]
    fn test_single_part_has_no_parens() {
        let set = ConditionSet::all().eq("name", "jose");
        let (sql, _) = compile(&set);
        assert_eq!(sql, "name = :c0");
    }

    #[test]
    fn test_multiple_parts_wrapped_even_at_root() {
        let set = ConditionSet::all().eq("a", 1).gt("b", 2);
        let (sql, binder) = compile(&set);
        assert_eq!(sql, "(a = :c0 AND b > :c1)");
        assert_eq!(binder.bindings().len(), 2);
    }

    #[test]
    fn test_nested_multi_part_set_is_wrapped() {
        let set = ConditionSet::all()
            .eq("a", 1)
            .nest(ConditionSet::any().eq("b", 2).eq("c", 3));
        let (sql, _) = compile(&set);
        assert_eq!(sql, "(a = :c0 AND (b = :c1 OR c = :c2))");
    }

    #[test]
    fn test_nested_single_part_set_is_bare() {
        let set = ConditionSet::all()
            .eq("a", 1)
            .nest(ConditionSet::any().eq("b", 2));
        let (sql, _) = compile(&set);
        assert_eq!(sql, "(a = :c0 AND b = :c1)");
    }

    #[test]
    fn test_nested_empty_set_emits_nothing() {
        let set = ConditionSet::all().nest(ConditionSet::any());
        let (sql, _) = compile(&set);
        assert_eq!(sql, "");
    }

    #[test]
    fn test_not_in_or_null_shape() {
        let set =
            ConditionSet::all().not_in_or_null("x", vec![Value::Int(1), Value::Int(2)]);
        let (sql, binder) = compile(&set);
        assert_eq!(sql, "(x NOT IN (:c0,:c1) OR (x) IS NULL)");
        assert_eq!(binder.bindings().len(), 2);

        let set = ConditionSet::all()
            .eq("a", 1)
            .not_in_or_null("x", vec![Value::Int(1), Value::Int(2)]);
        let (sql, _) = compile(&set);
        assert_eq!(sql, "(a = :c0 AND (x NOT IN (:c1,:c2) OR (x) IS NULL))");
    }

    #[test]
    fn test_cond_with_operator_suffix() {
        let set = ConditionSet::all().cond("age >=", 21).unwrap();
        let (sql, _) = compile(&set);
        assert_eq!(sql, "age >= :c0");

        let set = ConditionSet::all().cond("title", "x").unwrap();
        let (sql, _) = compile(&set);
        assert_eq!(sql, "title = :c0");

        let set = ConditionSet::all().cond("name not like", "%a%").unwrap();
        let (sql, _) = compile(&set);
        assert_eq!(sql, "name NOT LIKE :c0");
    }

    #[test]
    fn test_case_bound_into_tree() {
        let set = ConditionSet::all().eq("status", "done").case(None, |c| {
            c.when(col("total").gt(bind(100))).then(bind("large"))
        });
        let (sql, binder) = compile(&set);
        assert_eq!(
            sql,
            "(status = :c0 AND CASE WHEN total > :c1 THEN :c2 ELSE NULL END)"
        );
        assert_eq!(binder.bindings().len(), 3);

        let set = ConditionSet::all().case(Some(col("kind")), |c| {
            c.when(bind(1)).then(bind("a")).else_(bind("z"))
        });
        let (sql, _) = compile(&set);
        assert_eq!(sql, "CASE kind WHEN :c0 THEN :c1 ELSE :c2 END");
    }

    #[test]
    fn test_has_nested_expression() {
        let flat = ConditionSet::all().eq("a", 1).gt("b", 2);
        assert!(!flat.has_nested_expression());

        let nested = flat.nest(ConditionSet::any().eq("c", 3));
        assert!(nested.has_nested_expression());
    }

    #[test]
    fn test_iterate_parts_rewrites_and_drops() {
        let set = ConditionSet::all().eq("a", 1).eq("b", 2).eq("c", 3);
        let kept = set.iterate_parts(|part| {
            let keeps_b = part
                .to_tokens(Dialect::Ansi, &mut ValueBinder::new())
                .unwrap()
                .serialize(Dialect::Ansi)
                .starts_with("b ");
            if keeps_b {
                None
            } else {
                Some(part)
            }
        });
        assert_eq!(kept.len(), 2);
        let (sql, _) = compile(&kept);
        assert_eq!(sql, "(a = :c0 AND c = :c1)");
    }

    #[test]
    fn test_cond_rejects_unknown_operator() {
        let err = ConditionSet::all().cond("age SPACESHIP", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("SPACESHIP"));
    }
}
