use std::collections::BTreeMap;

use sqlchain::prelude::*;

#[test]
fn insert_positional_and_named() {
    let q = insert("users").values([Value::from("zhangsan"), Value::from(10)]);
    assert_eq!(q.to_string(), "insert into users values (\"zhangsan\", 10)");

    let q = insert("users")
        .fields(["username", "age"])
        .values([Value::from("zhangsan"), Value::from(10)])
        .build()
        .unwrap();
    assert_eq!(q.sql, "insert into users (username, age) values (?, ?)");
    assert_eq!(q.values, vec![Value::from("zhangsan"), Value::Int(10)]);
}

#[test]
fn insert_map_in_iteration_order() {
    let row = BTreeMap::from([("name", Value::from("alice")), ("age", Value::Int(30))]);
    let (sql, values) = insert("users").map(row).build().unwrap().into_parts();
    assert_eq!(sql, "insert into users (age, name) values (?, ?)");
    assert_eq!(values, vec![Value::Int(30), Value::from("alice")]);
}

#[test]
fn insert_column_count_must_match() {
    let err = insert("users").fields(["a", "b", "c"]).values([1, 2]).build().unwrap_err();
    assert_eq!(
        err,
        QbError::ColumnCountMismatch {
            table: "users".to_string(),
            columns: 3,
            values: 2,
        }
    );
}

#[test]
fn update_set_and_where() {
    let q = update("users")
        .set("username", "zhangsan")
        .set("age", 18)
        .where_eq("id", 1)
        .or_where_eq("id", 2)
        .build()
        .unwrap();
    assert_eq!(q.sql, "update users set username = ?, age = ? where id = ? or id = ?");
    assert_eq!(
        q.values,
        vec![Value::from("zhangsan"), Value::Int(18), Value::Int(1), Value::Int(2)]
    );
}

#[test]
fn update_map_then_override() {
    let q = update("users")
        .map([("a", 1), ("b", 2)])
        .set("a", 10)
        .build()
        .unwrap();
    assert_eq!(q.sql, "update users set a = ?, b = ?");
    assert_eq!(q.values, vec![Value::Int(10), Value::Int(2)]);
}

#[test]
fn update_requires_a_column() {
    assert!(matches!(
        update("users").where_eq("id", 1).build(),
        Err(QbError::EmptySet { .. })
    ));
}

#[test]
fn update_display_escapes_text() {
    let q = update("posts").set("title", r#"say "hi" \o/"#).where_eq("id", 3);
    assert_eq!(q.to_string(), r#"update posts set title = "say \"hi\" \\o/" where id = 3"#);
}

#[test]
fn delete_with_and_without_where() {
    assert_eq!(delete("users").build().unwrap().sql, "delete from users");

    let q = delete("users").where_in("id", [1, 2, 3]).build().unwrap();
    assert_eq!(q.sql, "delete from users where id in (?, ?, ?)");
    assert_eq!(q.values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn json_values_convert_to_bind_values() {
    let v = Value::try_from(serde_json::json!("x")).unwrap();
    assert_eq!(v, Value::from("x"));
    assert!(Value::try_from(serde_json::json!([1, 2])).is_err());
}
