//! INSERT / UPDATE / DELETE compilation tests.

use sqlforge::prelude::*;
use sqlforge::test_utils::validate_sql;

#[test]
fn insert_compiles_on_every_dialect() {
    let insert = Insert::into("users")
        .columns(["name", "age"])
        .values(["ada", "36"]);

    for dialect in [
        Dialect::Ansi,
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::Sqlite,
        Dialect::TSql,
    ] {
        let compiled = insert.compile(dialect).unwrap();
        validate_sql(&compiled.sql, dialect).unwrap();
        assert_eq!(compiled.bindings.len(), 2);
    }
}

#[test]
fn insert_values_never_appear_inline() {
    let insert = Insert::into("users")
        .columns(["name"])
        .values(["Robert'); DROP TABLE users;--"]);
    let compiled = insert.compile(Dialect::Ansi).unwrap();
    assert_eq!(compiled.sql, "INSERT INTO users (name) VALUES (:c0)");
    assert!(!compiled.sql.contains("DROP"));
    assert_eq!(
        compiled.bindings[0].value,
        Value::String("Robert'); DROP TABLE users;--".into())
    );
}

#[test]
fn insert_from_select_shares_binder() {
    let source = Query::new()
        .select(vec![col("name")])
        .from("staging")
        .filter(col("checked").eq(true));
    let insert = Insert::into("users").columns(["name"]).from_query(source);
    let compiled = insert.compile(Dialect::Postgres).unwrap();
    assert_eq!(
        compiled.sql,
        "INSERT INTO users (name) SELECT name FROM staging WHERE checked = :c0"
    );
    validate_sql(&compiled.sql, Dialect::Postgres).unwrap();
}

#[test]
fn returning_is_dropped_where_unsupported() {
    let update = Update::table("users")
        .set("verified", true)
        .filter(col("id").eq(3))
        .returning([col("id"), col("verified")]);

    assert_eq!(
        update.to_sql(Dialect::Postgres).unwrap(),
        "UPDATE users SET verified = :c0 WHERE id = :c1 RETURNING id, verified"
    );
    assert_eq!(
        update.to_sql(Dialect::Sqlite).unwrap(),
        "UPDATE users SET verified = :c0 WHERE id = :c1 RETURNING id, verified"
    );
    assert_eq!(
        update.to_sql(Dialect::MySql).unwrap(),
        "UPDATE users SET verified = :c0 WHERE id = :c1"
    );
}

#[test]
fn update_bindings_stay_in_clause_order() {
    let update = Update::table("users")
        .set("name", "grace")
        .set("age", 45)
        .filter(col("id").eq(9));
    let compiled = update.compile(Dialect::Ansi).unwrap();
    let values: Vec<&Value> = compiled.bindings.iter().map(|b| &b.value).collect();
    assert_eq!(
        values,
        [
            &Value::String("grace".into()),
            &Value::Int(45),
            &Value::Int(9)
        ]
    );
}

#[test]
fn delete_with_condition_tree() {
    let delete = Delete::from("logs").filter(
        ConditionSet::any()
            .add(col("level").eq("debug"))
            .add(col("age_days").gt(30)),
    );
    let compiled = delete.compile(Dialect::Ansi).unwrap();
    assert_eq!(
        compiled.sql,
        "DELETE FROM logs WHERE (level = :c0 OR age_days > :c1)"
    );
    validate_sql(&compiled.sql, Dialect::Ansi).unwrap();
}

#[test]
fn dml_bindings_cast_through_registry() {
    use sqlforge::driver::Statement;
    use sqlforge::error::Result;

    #[derive(Default)]
    struct Sink {
        bound: Vec<(String, Value, StorageKind)>,
    }
    impl Statement for Sink {
        fn bind(&mut self, placeholder: &str, value: Value, kind: StorageKind) -> Result<()> {
            self.bound.push((placeholder.into(), value, kind));
            Ok(())
        }
        fn execute(&mut self) -> Result<()> {
            Ok(())
        }
        fn row_count(&self) -> u64 {
            0
        }
    }

    let insert = Insert::into("users").columns(["age"]).values(["27"]);
    let compiled = insert.compile(Dialect::Ansi).unwrap();

    let registry = TypeRegistry::with_defaults();
    let mut sink = Sink::default();
    compiled.bind_into(&mut sink, &registry).unwrap();
    // "27" was bound as a string value with no explicit hint.
    assert_eq!(
        sink.bound,
        vec![(
            "c0".into(),
            Value::String("27".into()),
            StorageKind::Text
        )]
    );
}
