//! Expression emission through complete statements: tuples, CASE, windows,
//! collation, concat handling.

use sqlforge::expr::case::CaseStatement;
use sqlforge::expr::tuple::{TupleComparison, TupleOperator, TupleValues};
use sqlforge::expr::window::{WindowExt, WindowFrame, WindowOrderBy};
use sqlforge::expr::{lit_str, row_number};
use sqlforge::prelude::*;
use sqlforge::test_utils::validate_sql;

#[test]
fn tuple_equality_in_a_query() {
    let tuple = TupleComparison::new(
        vec![col("field1"), col("field2")],
        TupleValues::Row(vec![Value::Int(1), Value::Int(2)]),
        vec![],
        TupleOperator::Eq,
    )
    .unwrap();
    let query = Query::new().from("t").filter(Expr::Tuple(tuple));
    let compiled = query.compile(Dialect::Ansi).unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM t WHERE (field1, field2) = (:tuple0, :tuple1)"
    );
    assert_eq!(compiled.bindings[0].placeholder, "tuple0");
}

#[test]
fn tuple_in_multi_row_shape() {
    let tuple = TupleComparison::new(
        vec![col("f1"), col("f2")],
        TupleValues::Rows(vec![
            vec![Value::Int(1), Value::Int(2)],
            vec![Value::Int(3), Value::Int(4)],
        ]),
        vec![],
        TupleOperator::In,
    )
    .unwrap();
    let query = Query::new().from("t").filter(Expr::Tuple(tuple));
    assert_eq!(
        query.to_sql(Dialect::Ansi).unwrap(),
        "SELECT * FROM t WHERE (f1, f2) IN ((:tuple0,:tuple1), (:tuple2,:tuple3))"
    );
}

#[test]
fn valued_case_binds_every_part() {
    let case = CaseStatement::value(bind(1)).when(bind(1)).then(bind("matched")).end();
    let query = Query::new()
        .select(vec![SelectExpr::new(case).with_alias("outcome")])
        .from("t");
    let compiled = query.compile(Dialect::Ansi).unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT CASE :c0 WHEN :c1 THEN :c2 ELSE NULL END AS outcome FROM t"
    );
    assert_eq!(compiled.bindings.len(), 3);
}

#[test]
fn searched_case_with_conditions() {
    let case = CaseStatement::new()
        .when(col("score").gte(90))
        .then(lit_str("high"))
        .when(col("score").gte(50))
        .then(lit_str("medium"))
        .else_(lit_str("low"))
        .end();
    let query = Query::new().select(vec![case]).from("results");
    assert_eq!(
        query.to_sql(Dialect::Ansi).unwrap(),
        "SELECT CASE WHEN score >= :c0 THEN 'high' WHEN score >= :c1 THEN 'medium' \
         ELSE 'low' END FROM results"
    );
}

#[test]
fn window_over_partition_with_frame() {
    let expr = sum(col("amount"))
        .over()
        .partition_by(vec![col("region")])
        .order_by(vec![WindowOrderBy::asc(col("day"))])
        .frame(WindowFrame::rows(Some(3), Some(0)).unwrap())
        .build()
        .unwrap();
    let query = Query::new()
        .select(vec![SelectExpr::new(expr).with_alias("rolling")])
        .from("sales");
    let sql = query.to_sql(Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT SUM(amount) OVER (PARTITION BY region ORDER BY day ASC \
         ROWS BETWEEN 3 PRECEDING AND CURRENT ROW) AS rolling FROM sales"
    );
    validate_sql(&sql, Dialect::Postgres).unwrap();
}

#[test]
fn groups_frame_degrades_to_rows_where_unsupported() {
    let expr = row_number()
        .over()
        .order_by(vec![WindowOrderBy::asc(col("id"))])
        .frame(WindowFrame::groups(None, Some(0)).unwrap())
        .build()
        .unwrap();
    let query = Query::new().select(vec![expr]).from("t");

    assert!(query
        .to_sql(Dialect::Postgres)
        .unwrap()
        .contains("GROUPS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW"));
    assert!(query
        .to_sql(Dialect::MySql)
        .unwrap()
        .contains("ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW"));
}

#[test]
fn collation_rides_the_identifier() {
    let query = Query::new()
        .from("t")
        .filter(sqlforge::expr::col_collate("test", "utf8_general_ci").eq("x"));
    assert_eq!(
        query.to_sql(Dialect::MySql).unwrap(),
        "SELECT * FROM t WHERE test COLLATE utf8_general_ci = :c0"
    );
}

#[test]
fn collation_rides_a_bound_string() {
    let query = Query::new()
        .from("t")
        .filter(col("name").eq(sqlforge::expr::bind_collated("a", "utf8_general_ci")));
    assert_eq!(
        query.to_sql(Dialect::MySql).unwrap(),
        "SELECT * FROM t WHERE name = :c0 COLLATE utf8_general_ci"
    );
}

#[test]
fn interval_arithmetic_binds_its_value() {
    let query = Query::new()
        .from("events")
        .filter(col("created").lt(col("now").add(sqlforge::expr::interval(bind(3), "DAY"))));
    let compiled = query.compile(Dialect::Postgres).unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM events WHERE created < now + INTERVAL :c0 DAY"
    );
    assert_eq!(compiled.bindings[0].value, Value::Int(3));
}

#[test]
fn concat_falls_back_to_function_call() {
    let expr = col("first").concat(col("last"));
    let query = Query::new().select(vec![expr]).from("people");

    assert_eq!(
        query.to_sql(Dialect::Postgres).unwrap(),
        "SELECT first || last FROM people"
    );
    assert_eq!(
        query.to_sql(Dialect::TSql).unwrap(),
        "SELECT first + last FROM people"
    );
    assert_eq!(
        query.to_sql(Dialect::MySql).unwrap(),
        "SELECT CONCAT(first, last) FROM people"
    );
}

#[test]
fn not_in_or_null_shape() {
    let set = ConditionSet::all().not_in_or_null("x", vec![Value::Int(1), Value::Int(2)]);
    let query = Query::new().from("t").filter(set);
    assert_eq!(
        query.to_sql(Dialect::Ansi).unwrap(),
        "SELECT * FROM t WHERE (x NOT IN (:c0,:c1) OR (x) IS NULL)"
    );
}

#[test]
fn function_arguments_use_the_param_scope() {
    let query = Query::new()
        .select(vec![sqlforge::expr::coalesce(vec![col("nick"), bind("anon")])])
        .from("users");
    let compiled = query.compile(Dialect::Ansi).unwrap();
    assert_eq!(compiled.sql, "SELECT COALESCE(nick, :param0) FROM users");
    assert_eq!(compiled.bindings[0].placeholder, "param0");
}

#[test]
fn function_names_remap_per_dialect() {
    let query = Query::new()
        .select(vec![sqlforge::expr::func("NVL", vec![col("a"), col("b")])])
        .from("t");
    assert_eq!(
        query.to_sql(Dialect::Postgres).unwrap(),
        "SELECT COALESCE(a, b) FROM t"
    );
    assert_eq!(
        query.to_sql(Dialect::MySql).unwrap(),
        "SELECT IFNULL(a, b) FROM t"
    );
}
