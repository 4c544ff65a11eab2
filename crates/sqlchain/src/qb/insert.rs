//! INSERT query builder.

use std::fmt;

use crate::error::{QbError, QbResult};
use crate::qb::param::Value;
use crate::qb::traits::{BuildCache, BuiltQuery, SqlQb, fmt_interpolated};

/// INSERT query builder.
///
/// Columns are optional: without them the statement is
/// `insert into t values (...)` and the values follow the table's column
/// order.
#[derive(Clone, Debug)]
pub struct InsertBuilder {
    /// Table name
    table: String,
    /// Column names, empty for positional inserts
    columns: Vec<String>,
    /// One bind value per placeholder
    values: Vec<Value>,
    cache: BuildCache,
}

impl InsertBuilder {
    /// Create a new INSERT query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            values: Vec::new(),
            cache: BuildCache::default(),
        }
    }

    /// Append column names.
    pub fn fields<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append values.
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append a single value.
    pub fn value<V: Into<Value>>(mut self, value: V) -> Self {
        self.values.push(value.into());
        self
    }

    /// Set a column value.
    pub fn set<V: Into<Value>>(mut self, column: &str, value: V) -> Self {
        self.columns.push(column.to_string());
        self.values.push(value.into());
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<V: Into<Value>>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Set columns and values from `(column, value)` pairs.
    ///
    /// Columns follow the iterator's order, so a `HashMap` gives an
    /// unspecified order and a `BTreeMap` or `Vec` a stable one.
    pub fn map<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (column, value) in pairs {
            self.columns.push(column.into());
            self.values.push(value.into());
        }
        self
    }

    /// Build the SQL and bind values. Later calls return the first result.
    pub fn build(&self) -> QbResult<BuiltQuery> {
        self.cache.get_or_build("insert", || self.build_insert())
    }

    fn validate(&self) -> QbResult<()> {
        if !self.columns.is_empty() && self.columns.len() != self.values.len() {
            return Err(QbError::ColumnCountMismatch {
                table: self.table.clone(),
                columns: self.columns.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }

    fn build_insert(&self) -> QbResult<BuiltQuery> {
        self.validate()?;

        let mut sql = format!("insert into {}", self.table);
        if !self.columns.is_empty() {
            sql.push_str(&format!(" ({})", self.columns.join(", ")));
        }
        let placeholders = vec!["?"; self.values.len()].join(", ");
        sql.push_str(&format!(" values ({placeholders})"));

        Ok(BuiltQuery::new(sql, self.values.clone()))
    }
}

impl SqlQb for InsertBuilder {
    fn build(&self) -> QbResult<BuiltQuery> {
        InsertBuilder::build(self)
    }
}

impl fmt::Display for InsertBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_interpolated(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_positional_insert() {
        let q = InsertBuilder::new("users")
            .values([Value::from("zhangsan"), Value::from(10)])
            .build()
            .unwrap();
        assert_eq!(q.sql, "insert into users values (?, ?)");
        assert_eq!(q.values, vec![Value::from("zhangsan"), Value::Int(10)]);
    }

    #[test]
    fn test_insert_with_fields() {
        let q = InsertBuilder::new("users")
            .fields(["username", "age"])
            .value("zhangsan")
            .value(10)
            .build()
            .unwrap();
        assert_eq!(q.sql, "insert into users (username, age) values (?, ?)");
    }

    #[test]
    fn test_set_keeps_call_order() {
        let q = InsertBuilder::new("users")
            .set("username", "lisi")
            .set_opt("email", None::<&str>)
            .set("age", 20)
            .build()
            .unwrap();
        assert_eq!(q.sql, "insert into users (username, age) values (?, ?)");
        assert_eq!(q.values, vec![Value::from("lisi"), Value::Int(20)]);
    }

    #[test]
    fn test_map_follows_iterator_order() {
        let mut row = BTreeMap::new();
        row.insert("b", Value::Int(2));
        row.insert("a", Value::Int(1));
        let q = InsertBuilder::new("t").map(row).build().unwrap();
        assert_eq!(q.sql, "insert into t (a, b) values (?, ?)");
        assert_eq!(q.values, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_map_from_hash_map_keeps_pairs_aligned() {
        let row = HashMap::from([("a", 1), ("b", 2)]);
        let q = InsertBuilder::new("t").map(row).build().unwrap();
        match q.sql.as_str() {
            "insert into t (a, b) values (?, ?)" => assert_eq!(q.values, vec![Value::Int(1), Value::Int(2)]),
            "insert into t (b, a) values (?, ?)" => assert_eq!(q.values, vec![Value::Int(2), Value::Int(1)]),
            other => panic!("unexpected sql: {other}"),
        }
    }

    #[test]
    fn test_column_count_mismatch() {
        let err = InsertBuilder::new("users")
            .fields(["username", "age"])
            .value("zhangsan")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            QbError::ColumnCountMismatch {
                table: "users".to_string(),
                columns: 2,
                values: 1,
            }
        );
    }

    #[test]
    fn test_display() {
        let q = InsertBuilder::new("users").fields(["username", "age"]).values([
            Value::from("zhangsan"),
            Value::from(10),
        ]);
        assert_eq!(q.to_string(), "insert into users (username, age) values (\"zhangsan\", 10)");
    }
}
