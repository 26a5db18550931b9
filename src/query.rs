//! Query builder - construct SELECT statements with a fluent API.
//!
//! A [`Query`] accumulates clauses and compiles them in one pass:
//! [`Query::compile`] creates a single [`ValueBinder`], walks every clause
//! in fixed order, and returns the SQL text together with the ordered
//! bindings that same walk recorded. Nested subqueries and CTEs share the
//! outer binder, so placeholder numbering is globally unique across the
//! whole statement.

use crate::binder::{BindScope, BoundValue, ValueBinder};
use crate::dialect::{Dialect, SqlDialect};
use crate::error::Result;
use crate::expr::conditions::{ConditionSet, Conjunction};
use crate::expr::cte::{Cte, WithClause};
use crate::expr::window::{NullsOrder, SortDir};
use crate::expr::Expr;
use crate::token::{Token, TokenStream};
use crate::value::Value;

// =============================================================================
// Compiled output
// =============================================================================

/// The result of compiling a statement: SQL text plus the ordered bindings
/// produced by the same traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    pub sql: String,
    pub bindings: Vec<BoundValue>,
}

// =============================================================================
// Select Expression (column with optional alias)
// =============================================================================

/// A SELECT list item: expression with optional alias.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct SelectExpr {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectExpr {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = self.expr.to_tokens(dialect, binder)?;
        if let Some(alias) = &self.alias {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
        Ok(ts)
    }
}

impl From<Expr> for SelectExpr {
    fn from(expr: Expr) -> Self {
        SelectExpr::new(expr)
    }
}

// =============================================================================
// Table Reference
// =============================================================================

/// A table reference with optional alias.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct TableRef {
    pub table: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Ident(self.table.clone()));
        if let Some(alias) = &self.alias {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
        ts
    }
}

impl From<&str> for TableRef {
    fn from(table: &str) -> Self {
        TableRef::new(table)
    }
}

// =============================================================================
// Joins
// =============================================================================

/// Type of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: TableRef,
    pub on: Option<Expr>,
}

impl Join {
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = TokenStream::new();

        match self.join_type {
            JoinType::Inner => ts.push(Token::Inner),
            JoinType::Left => ts.push(Token::Left),
            JoinType::Right => ts.push(Token::Right),
            JoinType::Full => ts.push(Token::Full).space().push(Token::Outer),
            JoinType::Cross => ts.push(Token::Cross),
        };

        ts.space().push(Token::Join).space();
        ts.append(&self.table.to_tokens());

        if let Some(on) = &self.on {
            ts.space().push(Token::On).space();
            ts.append(&on.to_tokens(dialect, binder)?);
        }

        Ok(ts)
    }
}

// =============================================================================
// ORDER BY
// =============================================================================

/// An ORDER BY expression.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct OrderByExpr {
    pub expr: Expr,
    pub dir: Option<SortDir>,
    pub nulls: Option<NullsOrder>,
}

impl OrderByExpr {
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            dir: None,
            nulls: None,
        }
    }

    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            dir: Some(SortDir::Asc),
            nulls: None,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            dir: Some(SortDir::Desc),
            nulls: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }

    /// Dialects without NULLS FIRST/LAST support silently skip it.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = self.expr.to_tokens(dialect, binder)?;

        if let Some(dir) = &self.dir {
            ts.space().push(match dir {
                SortDir::Asc => Token::Asc,
                SortDir::Desc => Token::Desc,
            });
        }

        if let Some(nulls) = &self.nulls {
            if dialect.supports_nulls_ordering() {
                ts.space().push(match nulls {
                    NullsOrder::First => Token::NullsFirst,
                    NullsOrder::Last => Token::NullsLast,
                });
            }
        }

        Ok(ts)
    }
}

// =============================================================================
// LIMIT / OFFSET
// =============================================================================

/// LIMIT and OFFSET clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimitOffset {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl LimitOffset {
    /// Delegates to `SqlDialect::emit_limit_offset()` for the actual
    /// formatting.
    pub fn to_tokens(&self, dialect: Dialect) -> TokenStream {
        dialect.emit_limit_offset(self.limit, self.offset)
    }
}

// =============================================================================
// DISTINCT ON policy
// =============================================================================

/// How `distinct_on` compiles when the dialect question arises.
///
/// The reference system always degraded `DISTINCT ON` to a GROUP BY
/// simulation without consulting the driver; here the choice is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistinctOnPolicy {
    /// Emit `DISTINCT ON (cols)` when the dialect supports it, fall back
    /// to the GROUP BY simulation otherwise.
    #[default]
    Native,
    /// Always simulate with GROUP BY, regardless of dialect support.
    Portable,
}

// =============================================================================
// Query Builder
// =============================================================================

/// A SELECT query.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "Query has no effect until compiled with compile() or to_sql()"]
pub struct Query {
    pub with: WithClause,
    pub select: Vec<SelectExpr>,
    pub distinct: bool,
    pub distinct_on: Vec<Expr>,
    pub distinct_on_policy: DistinctOnPolicy,
    pub from: Vec<TableRef>,
    pub joins: Vec<Join>,
    pub where_clause: ConditionSet,
    pub group_by: Vec<Expr>,
    pub having_clause: ConditionSet,
    pub order_by: Vec<OrderByExpr>,
    pub limit_offset: Option<LimitOffset>,
    /// Chained set operations: `(all, query)` per UNION arm.
    pub unions: Vec<(bool, Query)>,
}

impl Query {
    /// Create a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a CTE. Duplicate names are rejected.
    pub fn with_cte(mut self, cte: Cte) -> Result<Self> {
        self.with.add(cte)?;
        Ok(self)
    }

    /// Append to the SELECT list.
    pub fn select(mut self, exprs: Vec<impl Into<SelectExpr>>) -> Self {
        self.select.extend(exprs.into_iter().map(|e| e.into()));
        self
    }

    /// SELECT *
    pub fn select_star(mut self) -> Self {
        self.select = vec![SelectExpr::new(crate::expr::star())];
        self
    }

    /// Select a bound application value. Select-list values use the `se`
    /// placeholder scope.
    pub fn select_value(mut self, value: impl Into<Value>) -> Self {
        self.select.push(SelectExpr::new(Expr::Value {
            value: value.into(),
            type_name: None,
            scope: BindScope::Select,
        }));
        self
    }

    /// Add bare DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// DISTINCT ON (cols); compilation follows the configured
    /// [`DistinctOnPolicy`].
    pub fn distinct_on(mut self, exprs: Vec<Expr>) -> Self {
        self.distinct_on = exprs;
        self
    }

    pub fn distinct_on_policy(mut self, policy: DistinctOnPolicy) -> Self {
        self.distinct_on_policy = policy;
        self
    }

    /// Add a FROM table.
    pub fn from(mut self, table: impl Into<TableRef>) -> Self {
        self.from.push(table.into());
        self
    }

    /// Add a JOIN.
    pub fn join(mut self, join_type: JoinType, table: impl Into<TableRef>, on: Expr) -> Self {
        self.joins.push(Join {
            join_type,
            table: table.into(),
            on: Some(on),
        });
        self
    }

    /// Add an INNER JOIN.
    pub fn inner_join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.join(JoinType::Inner, table, on)
    }

    /// Add a LEFT JOIN.
    pub fn left_join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.join(JoinType::Left, table, on)
    }

    /// Add a RIGHT JOIN.
    pub fn right_join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.join(JoinType::Right, table, on)
    }

    /// Add a FULL OUTER JOIN.
    pub fn full_join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.join(JoinType::Full, table, on)
    }

    /// Add a CROSS JOIN.
    pub fn cross_join(mut self, table: impl Into<TableRef>) -> Self {
        self.joins.push(Join {
            join_type: JoinType::Cross,
            table: table.into(),
            on: None,
        });
        self
    }

    /// Add a WHERE condition, ANDed with any existing conditions.
    pub fn filter(self, condition: impl Into<Expr>) -> Self {
        self.and_where(condition)
    }

    /// AND a condition into the WHERE root.
    pub fn and_where(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.where_clause, Conjunction::And, condition.into());
        self
    }

    /// OR a condition into the WHERE root.
    pub fn or_where(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.where_clause, Conjunction::Or, condition.into());
        self
    }

    /// Append to the GROUP BY clause.
    pub fn group_by(mut self, exprs: Vec<Expr>) -> Self {
        self.group_by.extend(exprs);
        self
    }

    /// AND a condition into the HAVING root.
    pub fn having(self, condition: impl Into<Expr>) -> Self {
        self.and_having(condition)
    }

    pub fn and_having(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.having_clause, Conjunction::And, condition.into());
        self
    }

    pub fn or_having(mut self, condition: impl Into<Expr>) -> Self {
        merge_condition(&mut self.having_clause, Conjunction::Or, condition.into());
        self
    }

    /// Append to the ORDER BY clause.
    pub fn order_by(mut self, exprs: Vec<OrderByExpr>) -> Self {
        self.order_by.extend(exprs);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit_offset
            .get_or_insert_with(LimitOffset::default)
            .limit = Some(limit);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, offset: u64) -> Self {
        self.limit_offset
            .get_or_insert_with(LimitOffset::default)
            .offset = Some(offset);
        self
    }

    /// Append `UNION other`.
    pub fn union(mut self, other: Query) -> Self {
        self.unions.push((false, other));
        self
    }

    /// Append `UNION ALL other`.
    pub fn union_all(mut self, other: Query) -> Self {
        self.unions.push((true, other));
        self
    }

    // =========================================================================
    // Compilation
    // =========================================================================

    /// Compile to a token stream, sharing the caller's binder. Used
    /// directly when this query nests inside another statement.
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = TokenStream::new();

        // WITH
        if !self.with.is_empty() {
            ts.append(&self.with.to_tokens(dialect, binder)?);
            ts.space();
        }

        // SELECT [DISTINCT | DISTINCT ON (...)]
        let native_distinct_on = !self.distinct_on.is_empty()
            && self.distinct_on_policy == DistinctOnPolicy::Native
            && dialect.supports_distinct_on();
        let simulate_distinct_on = !self.distinct_on.is_empty() && !native_distinct_on;

        ts.push(Token::Select);
        if native_distinct_on {
            ts.space().push(Token::Distinct).space().push(Token::On);
            ts.space().lparen();
            for (i, expr) in self.distinct_on.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&expr.to_tokens(dialect, binder)?);
            }
            ts.rparen();
        } else if self.distinct {
            ts.space().push(Token::Distinct);
        }

        // Select list
        if self.select.is_empty() {
            ts.space().push(Token::Star);
        } else {
            for (i, select_expr) in self.select.iter().enumerate() {
                if i == 0 {
                    ts.space();
                } else {
                    ts.comma().space();
                }
                ts.append(&select_expr.to_tokens(dialect, binder)?);
            }
        }

        // FROM
        if !self.from.is_empty() {
            ts.space().push(Token::From).space();
            for (i, table) in self.from.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&table.to_tokens());
            }
        }

        // JOINs
        for join in &self.joins {
            ts.space();
            ts.append(&join.to_tokens(dialect, binder)?);
        }

        // WHERE - the root condition set emits unwrapped; an empty set
        // suppresses the keyword entirely.
        if !self.where_clause.is_empty() {
            ts.space().push(Token::Where).space();
            ts.append(&self.where_clause.to_tokens(dialect, binder)?);
        }

        // GROUP BY, with the DISTINCT ON simulation folded in
        let mut group_exprs: Vec<&Expr> = vec![];
        if simulate_distinct_on {
            group_exprs.extend(self.distinct_on.iter());
        }
        group_exprs.extend(self.group_by.iter());
        if !group_exprs.is_empty() {
            ts.space().push(Token::GroupBy).space();
            for (i, expr) in group_exprs.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&expr.to_tokens(dialect, binder)?);
            }
        }

        // HAVING
        if !self.having_clause.is_empty() {
            ts.space().push(Token::Having).space();
            ts.append(&self.having_clause.to_tokens(dialect, binder)?);
        }

        // ORDER BY; T-SQL requires one for OFFSET/FETCH and gets the
        // `(SELECT NULL)` placeholder when none was given.
        let needs_order_by_placeholder = dialect.requires_order_by_for_offset()
            && self.order_by.is_empty()
            && self.limit_offset.is_some();

        if !self.order_by.is_empty() {
            ts.space().push(Token::OrderBy).space();
            for (i, order_expr) in self.order_by.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&order_expr.to_tokens(dialect, binder)?);
            }
        } else if needs_order_by_placeholder {
            ts.space()
                .push(Token::OrderBy)
                .space()
                .lparen()
                .push(Token::Select)
                .space()
                .push(Token::LitNull)
                .rparen();
        }

        // LIMIT / OFFSET
        if let Some(lo) = &self.limit_offset {
            ts.space();
            ts.append(&lo.to_tokens(dialect));
        }

        // UNION arms share the same binder as the first query.
        for (all, other) in &self.unions {
            ts.space().push(Token::Union);
            if *all {
                ts.space().push(Token::All);
            }
            ts.space();
            ts.append(&other.to_tokens(dialect, binder)?);
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

/// Merge a condition into a root set: a matching root conjunction appends,
/// otherwise the existing root is nested under a new root with the
/// requested conjunction.
pub(crate) fn merge_condition(root: &mut ConditionSet, conjunction: Conjunction, expr: Expr) {
    let existing = std::mem::take(root);
    *root = if existing.is_empty() {
        // A whole condition set offered to an empty root becomes the root.
        match expr {
            Expr::Conditions(set) => set,
            other => ConditionSet::new(conjunction).add(other),
        }
    } else if existing.conjunction == conjunction {
        existing.add(expr)
    } else {
        ConditionSet::new(conjunction).nest(existing).add(expr)
    };
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{bind, col, count_star, lit_int, sum, ExprExt};

    fn sql(query: &Query, dialect: Dialect) -> String {
        query.to_sql(dialect).unwrap()
    }

    #[test]
    fn test_simple_select() {
        let query = Query::new()
            .select(vec![col("id"), col("name")])
            .from("users");
        assert_eq!(sql(&query, Dialect::Ansi), "SELECT id, name FROM users");
    }

    #[test]
    fn test_select_star_default() {
        let query = Query::new().from("users");
        assert_eq!(sql(&query, Dialect::Ansi), "SELECT * FROM users");
    }

    #[test]
    fn test_select_value_uses_select_scope() {
        let query = Query::new().select(vec![col("id")]).select_value(42).from("t");
        let compiled = query.compile(Dialect::Ansi).unwrap();
        assert_eq!(compiled.sql, "SELECT id, :se0 FROM t");
        assert_eq!(compiled.bindings[0].placeholder, "se0");
        assert_eq!(compiled.bindings[0].value, Value::Int(42));
    }

    #[test]
    fn test_where_merging_matching_conjunction() {
        let query = Query::new()
            .from("users")
            .and_where(col("a").eq(1))
            .and_where(col("b").eq(2));
        assert_eq!(
            sql(&query, Dialect::Ansi),
            "SELECT * FROM users WHERE (a = :c0 AND b = :c1)"
        );
    }

    #[test]
    fn test_where_merging_wraps_on_conjunction_change() {
        let query = Query::new()
            .from("users")
            .and_where(col("a").eq(1))
            .and_where(col("b").eq(2))
            .or_where(col("c").eq(3));
        assert_eq!(
            sql(&query, Dialect::Ansi),
            "SELECT * FROM users WHERE ((a = :c0 AND b = :c1) OR c = :c2)"
        );
    }

    #[test]
    fn test_join_and_aliases() {
        let query = Query::new()
            .select(vec![col("u.name"), col("o.total")])
            .from(TableRef::new("users").with_alias("u"))
            .inner_join(
                TableRef::new("orders").with_alias("o"),
                col("u.id").eq(col("o.user_id")),
            );
        assert_eq!(
            sql(&query, Dialect::Ansi),
            "SELECT u.name, o.total FROM users AS u INNER JOIN orders AS o ON u.id = o.user_id"
        );
    }

    #[test]
    fn test_group_having_order_limit() {
        let query = Query::new()
            .select(vec![
                SelectExpr::new(col("region")),
                sum(col("amount")).alias("total"),
            ])
            .from("orders")
            .group_by(vec![col("region")])
            .having(sum(col("amount")).gt(lit_int(1000)))
            .order_by(vec![OrderByExpr::desc(col("total"))])
            .limit(10)
            .offset(20);
        assert_eq!(
            sql(&query, Dialect::Ansi),
            "SELECT region, SUM(amount) AS total FROM orders GROUP BY region \
             HAVING SUM(amount) > 1000 ORDER BY total DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_tsql_pagination_with_placeholder_order_by() {
        let query = Query::new().from("users").limit(5);
        assert_eq!(
            sql(&query, Dialect::TSql),
            "SELECT * FROM users ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"
        );
    }

    #[test]
    fn test_distinct_on_native_on_postgres() {
        let query = Query::new()
            .select(vec![col("id")])
            .distinct_on(vec![col("city")])
            .from("addresses");
        assert_eq!(
            sql(&query, Dialect::Postgres),
            "SELECT DISTINCT ON (city) id FROM addresses"
        );
    }

    #[test]
    fn test_distinct_on_simulated_where_unsupported() {
        let query = Query::new()
            .select(vec![col("id")])
            .distinct_on(vec![col("city")])
            .from("addresses");
        assert_eq!(
            sql(&query, Dialect::MySql),
            "SELECT id FROM addresses GROUP BY city"
        );
    }

    #[test]
    fn test_distinct_on_portable_policy_always_simulates() {
        let query = Query::new()
            .select(vec![col("id")])
            .distinct_on(vec![col("city")])
            .distinct_on_policy(DistinctOnPolicy::Portable)
            .from("addresses");
        assert_eq!(
            sql(&query, Dialect::Postgres),
            "SELECT id FROM addresses GROUP BY city"
        );
    }

    #[test]
    fn test_union_shares_binder() {
        let query = Query::new()
            .select(vec![col("id")])
            .from("a")
            .filter(col("x").eq(1))
            .union_all(
                Query::new()
                    .select(vec![col("id")])
                    .from("b")
                    .filter(col("y").eq(2)),
            );
        let compiled = query.compile(Dialect::Ansi).unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT id FROM a WHERE x = :c0 UNION ALL SELECT id FROM b WHERE y = :c1"
        );
        assert_eq!(compiled.bindings.len(), 2);
    }

    #[test]
    fn test_subquery_shares_binder() {
        let inner = Query::new()
            .select(vec![col("user_id")])
            .from("orders")
            .filter(col("total").gt(100));
        let query = Query::new()
            .select(vec![col("name")])
            .from("users")
            .filter(col("id").in_list(vec![inner.into()]))
            .filter(col("active").eq(true));
        let compiled = query.compile(Dialect::Ansi).unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT name FROM users WHERE (id IN ((SELECT user_id FROM orders WHERE total > :c0)) \
             AND active = :c1)"
        );
    }

    #[test]
    fn test_cte_query_body() {
        let totals = Query::new()
            .select(vec![
                SelectExpr::new(col("user_id")),
                sum(col("amount")).alias("total"),
            ])
            .from("orders")
            .group_by(vec![col("user_id")]);
        let query = Query::new()
            .with_cte(crate::expr::cte::Cte::new("totals", totals))
            .unwrap()
            .select(vec![col("total")])
            .from("totals");
        assert_eq!(
            sql(&query, Dialect::Ansi),
            "WITH totals AS (SELECT user_id, SUM(amount) AS total FROM orders GROUP BY user_id) \
             SELECT total FROM totals"
        );
    }

    #[test]
    fn test_count_aggregate() {
        let query = Query::new().select(vec![count_star()]).from("users");
        assert_eq!(sql(&query, Dialect::Ansi), "SELECT COUNT(*) FROM users");
    }

    #[test]
    fn test_compile_twice_is_idempotent() {
        let query = Query::new()
            .from("users")
            .filter(col("a").eq(bind(1)))
            .filter(col("b").in_list(vec![bind(2), bind(3)]));
        let first = query.compile(Dialect::Ansi).unwrap();
        let second = query.compile(Dialect::Ansi).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clone_is_structurally_equal() {
        let query = Query::new()
            .select(vec![col("id")])
            .from("users")
            .filter(col("a").eq(1));
        assert_eq!(query, query.clone());
    }
}
