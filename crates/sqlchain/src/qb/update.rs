//! UPDATE query builder.

use std::fmt;

use crate::error::{QbError, QbResult};
use crate::qb::param::Value;
use crate::qb::traits::{BuildCache, BuiltQuery, SqlQb, fmt_interpolated};
use crate::qb::where_builder::{Conditional, WhereBuilder};

/// UPDATE query builder.
#[derive(Clone, Debug)]
pub struct UpdateBuilder {
    /// Table name
    table: String,
    /// SET assignments, one column each
    set_clauses: Vec<(String, Value)>,
    /// WHERE conditions
    where_tree: WhereBuilder,
    cache: BuildCache,
}

impl UpdateBuilder {
    /// Create a new UPDATE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_clauses: Vec::new(),
            where_tree: WhereBuilder::new(),
            cache: BuildCache::default(),
        }
    }

    /// Set a column value.
    ///
    /// Setting the same column again replaces the value and keeps the
    /// column's original position.
    pub fn set<V: Into<Value>>(mut self, column: &str, value: V) -> Self {
        let value = value.into();
        match self.set_clauses.iter_mut().find(|(c, _)| c == column) {
            Some((_, existing)) => *existing = value,
            None => self.set_clauses.push((column.to_string(), value)),
        }
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<V: Into<Value>>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Set columns from `(column, value)` pairs, in iterator order.
    pub fn map<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (column, value)| builder.set(column.as_ref(), value))
    }

    /// Build the SQL and bind values. Later calls return the first result.
    pub fn build(&self) -> QbResult<BuiltQuery> {
        self.cache.get_or_build("update", || self.build_update())
    }

    fn build_update(&self) -> QbResult<BuiltQuery> {
        if self.set_clauses.is_empty() {
            return Err(QbError::EmptySet {
                table: self.table.clone(),
            });
        }

        let assignments: Vec<String> = self
            .set_clauses
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect();
        let mut sql = format!("update {} set {}", self.table, assignments.join(", "));
        let mut values: Vec<Value> = self.set_clauses.iter().map(|(_, v)| v.clone()).collect();

        let (where_sql, where_values) = self.where_tree.build_clause()?;
        if !where_sql.is_empty() {
            sql.push_str(" where ");
            sql.push_str(&where_sql);
        }
        values.extend(where_values);

        Ok(BuiltQuery::new(sql, values))
    }
}

impl Conditional for UpdateBuilder {
    fn conditions(&mut self) -> &mut WhereBuilder {
        &mut self.where_tree
    }
}

impl SqlQb for UpdateBuilder {
    fn build(&self) -> QbResult<BuiltQuery> {
        UpdateBuilder::build(self)
    }
}

impl fmt::Display for UpdateBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_interpolated(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_simple_update() {
        let q = UpdateBuilder::new("users")
            .set("username", "zhangsan")
            .where_eq("id", 1)
            .build()
            .unwrap();
        assert_eq!(q.sql, "update users set username = ? where id = ?");
        assert_eq!(q.values, vec![Value::from("zhangsan"), Value::Int(1)]);
    }

    #[test]
    fn test_update_without_where() {
        let q = UpdateBuilder::new("users").set("age", 1).set("status", 0).build().unwrap();
        assert_eq!(q.sql, "update users set age = ?, status = ?");
    }

    #[test]
    fn test_duplicate_set_replaces_in_place() {
        let q = UpdateBuilder::new("users")
            .set("a", 1)
            .set("b", 2)
            .set("a", 3)
            .build()
            .unwrap();
        assert_eq!(q.sql, "update users set a = ?, b = ?");
        assert_eq!(q.values, vec![Value::Int(3), Value::Int(2)]);
    }

    #[test]
    fn test_map_and_set_opt() {
        let q = UpdateBuilder::new("users")
            .map(vec![("username", Value::from("lisi")), ("age", Value::Int(20))])
            .set_opt("email", None::<String>)
            .where_in("id", [1, 2])
            .build()
            .unwrap();
        assert_eq!(q.sql, "update users set username = ?, age = ? where id in (?, ?)");
        assert_eq!(q.values.len(), 4);
    }

    #[test]
    fn test_map_from_hash_map_keeps_pairs_aligned() {
        let q = UpdateBuilder::new("t")
            .map(HashMap::from([("a", 1), ("b", 2)]))
            .where_eq("id", 9)
            .build()
            .unwrap();
        match q.sql.as_str() {
            "update t set a = ?, b = ? where id = ?" => {
                assert_eq!(q.values, vec![Value::Int(1), Value::Int(2), Value::Int(9)])
            }
            "update t set b = ?, a = ? where id = ?" => {
                assert_eq!(q.values, vec![Value::Int(2), Value::Int(1), Value::Int(9)])
            }
            other => panic!("unexpected sql: {other}"),
        }
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let err = UpdateBuilder::new("users").where_eq("id", 1).build().unwrap_err();
        assert_eq!(err, QbError::EmptySet { table: "users".to_string() });
    }

    #[test]
    fn test_display() {
        let q = UpdateBuilder::new("users").set("username", "zhangsan").where_eq("id", 1);
        assert_eq!(q.to_string(), "update users set username = \"zhangsan\" where id = 1");
    }
}
