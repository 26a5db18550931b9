//! Cross-dialect SELECT compilation tests.

use sqlforge::prelude::*;
use sqlforge::test_utils::validate_sql;

#[test]
fn select_compiles_on_every_dialect() {
    let query = Query::new()
        .select(vec![col("id"), col("name")])
        .from("users")
        .filter(col("active").eq(true))
        .order_by(vec![OrderByExpr::desc(col("id"))])
        .limit(5);

    for dialect in [
        Dialect::Ansi,
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::Sqlite,
        Dialect::TSql,
    ] {
        let compiled = query.compile(dialect).unwrap();
        validate_sql(&compiled.sql, dialect).unwrap();
        assert_eq!(compiled.bindings.len(), 1);
    }
}

#[test]
fn pagination_differs_between_ansi_and_tsql() {
    let query = Query::new()
        .from("users")
        .order_by(vec![OrderByExpr::asc(col("id"))])
        .limit(10)
        .offset(20);

    assert_eq!(
        query.to_sql(Dialect::Ansi).unwrap(),
        "SELECT * FROM users ORDER BY id ASC LIMIT 10 OFFSET 20"
    );
    assert_eq!(
        query.to_sql(Dialect::TSql).unwrap(),
        "SELECT * FROM users ORDER BY id ASC OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn identifiers_surface_unquoted_by_default() {
    let query = Query::new().select(vec![col("posts.title")]).from("posts");
    assert_eq!(
        query.to_sql(Dialect::MySql).unwrap(),
        "SELECT posts.title FROM posts"
    );
}

#[test]
fn identifier_quoting_is_an_explicit_rewrite() {
    let query = Query::new()
        .select(vec![
            SelectExpr::new(col("posts.title")),
            count_star().alias("n"),
        ])
        .from("posts");
    let mut binder = ValueBinder::new();
    let tokens = query.to_tokens(Dialect::MySql, &mut binder).unwrap();

    assert_eq!(
        tokens.quote_identifiers(Dialect::MySql).serialize(Dialect::MySql),
        "SELECT `posts`.`title`, COUNT(*) AS `n` FROM `posts`"
    );
    assert_eq!(
        tokens.quote_identifiers(Dialect::TSql).serialize(Dialect::TSql),
        "SELECT [posts].[title], COUNT(*) AS [n] FROM [posts]"
    );
}

#[test]
fn nulls_ordering_is_dialect_gated() {
    let query = Query::new()
        .from("users")
        .order_by(vec![OrderByExpr::asc(col("last_seen")).nulls_last()]);

    assert_eq!(
        query.to_sql(Dialect::Postgres).unwrap(),
        "SELECT * FROM users ORDER BY last_seen ASC NULLS LAST"
    );
    assert_eq!(
        query.to_sql(Dialect::MySql).unwrap(),
        "SELECT * FROM users ORDER BY last_seen ASC"
    );
}

#[test]
fn distinct_on_policy_controls_fallback() {
    let query = Query::new()
        .select(vec![col("id"), col("city")])
        .distinct_on(vec![col("city")])
        .from("addresses");

    // Native policy uses DISTINCT ON where supported, simulates elsewhere.
    assert_eq!(
        query.to_sql(Dialect::Postgres).unwrap(),
        "SELECT DISTINCT ON (city) id, city FROM addresses"
    );
    assert_eq!(
        query.to_sql(Dialect::Sqlite).unwrap(),
        "SELECT id, city FROM addresses GROUP BY city"
    );

    // Portable always simulates.
    let portable = query.clone().distinct_on_policy(DistinctOnPolicy::Portable);
    assert_eq!(
        portable.to_sql(Dialect::Postgres).unwrap(),
        "SELECT id, city FROM addresses GROUP BY city"
    );
}

#[test]
fn recursive_cte_renders_field_list() {
    let base = Query::new().select_value(1);
    let query = Query::new()
        .with_cte(
            Cte::new("cte1", base)
                .fields(vec!["field"])
                .recursive(),
        )
        .unwrap()
        .select(vec![col("field")])
        .from("cte1");

    assert_eq!(
        query.to_sql(Dialect::Ansi).unwrap(),
        "WITH RECURSIVE cte1(field) AS (SELECT :se0) SELECT field FROM cte1"
    );
    // No RECURSIVE keyword on T-SQL, field list stays.
    assert_eq!(
        query.to_sql(Dialect::TSql).unwrap(),
        "WITH cte1(field) AS (SELECT :se0) SELECT field FROM cte1"
    );
}

#[test]
fn duplicate_cte_name_is_rejected() {
    let err = Query::new()
        .with_cte(Cte::raw("totals", "SELECT 1"))
        .unwrap()
        .with_cte(Cte::raw("totals", "SELECT 2"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(err.to_string().contains("totals"));
}

#[test]
fn placeholder_numbering_spans_the_whole_statement() {
    let inner = Query::new()
        .select(vec![col("user_id")])
        .from("orders")
        .filter(col("status").eq("paid"));
    let query = Query::new()
        .from("users")
        .filter(col("id").in_list(vec![inner.into()]))
        .filter(col("age").gte(18))
        .union_all(Query::new().from("admins").filter(col("age").gte(21)));

    let compiled = query.compile(Dialect::Ansi).unwrap();
    let placeholders: Vec<&str> = compiled
        .bindings
        .iter()
        .map(|b| b.placeholder.as_str())
        .collect();
    assert_eq!(placeholders, ["c0", "c1", "c2"]);
    for placeholder in placeholders {
        assert!(compiled.sql.contains(&format!(":{placeholder}")));
    }
}

#[test]
fn empty_condition_set_emits_no_where() {
    let query = Query::new().from("users");
    assert_eq!(query.to_sql(Dialect::Ansi).unwrap(), "SELECT * FROM users");

    let set = ConditionSet::all();
    let mut binder = ValueBinder::new();
    let sql = set.to_tokens(Dialect::Ansi, &mut binder).unwrap().serialize(Dialect::Ansi);
    assert_eq!(sql, "");
}

#[test]
fn full_report_query_snapshot() {
    let query = Query::new()
        .select(vec![
            SelectExpr::new(col("region")),
            sum(col("amount")).alias("total"),
        ])
        .from(TableRef::new("orders").with_alias("o"))
        .inner_join(
            TableRef::new("users").with_alias("u"),
            col("u.id").eq(col("o.user_id")),
        )
        .filter(col("o.status").eq("paid"))
        .group_by(vec![col("region")])
        .having(sum(col("amount")).gt(lit_int(1000)))
        .order_by(vec![OrderByExpr::desc(col("total")).nulls_last()])
        .limit(25);

    insta::assert_snapshot!(
        query.to_sql(Dialect::Postgres).unwrap(),
        @"SELECT region, SUM(amount) AS total FROM orders AS o INNER JOIN users AS u ON u.id = o.user_id WHERE o.status = :c0 GROUP BY region HAVING SUM(amount) > 1000 ORDER BY total DESC NULLS LAST LIMIT 25"
    );
    insta::assert_snapshot!(
        query.to_sql(Dialect::TSql).unwrap(),
        @"SELECT region, SUM(amount) AS total FROM orders AS o INNER JOIN users AS u ON u.id = o.user_id WHERE o.status = :c0 GROUP BY region HAVING SUM(amount) > 1000 ORDER BY total DESC OFFSET 0 ROWS FETCH NEXT 25 ROWS ONLY"
    );
}

#[test]
fn compiled_output_is_deterministic() {
    let query = Query::new()
        .select(vec![col("id")])
        .from("users")
        .filter(col("a").eq(1))
        .filter(col("b").in_list(vec![bind(2), bind(3)]));
    let first = query.compile(Dialect::Postgres).unwrap();
    let second = query.clone().compile(Dialect::Postgres).unwrap();
    assert_eq!(first, second);
}
