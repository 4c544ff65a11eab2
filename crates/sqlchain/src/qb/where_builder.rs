//! Shared WHERE clause builder for SELECT, UPDATE, DELETE, JOIN and HAVING.

use crate::error::{QbError, QbResult};
use crate::qb::expr::Predicate;
use crate::qb::param::{Column, Operand, Value};
use crate::qb::traits::{BuiltQuery, SqlQb};

/// Reusable predicate tree.
///
/// Conditions live in two ordered lists. `and` nodes are joined with
/// `" and "`; `or` nodes follow, each joined with `" or "`. The two lists are
/// flat siblings, so `where a = ? or b = ?` gets no extra parentheses. Only
/// nested groups (see [`Conditional::where_group`]) are wrapped.
///
/// A tree holding only `or` nodes still emits them as an or-chain; `or`
/// nodes are never dropped for lack of a leading `and` node.
#[derive(Clone, Debug, Default)]
pub struct WhereBuilder {
    and_nodes: Vec<Predicate>,
    or_nodes: Vec<Predicate>,
    /// First misuse error, reported by `build`
    build_error: Option<QbError>,
}

impl WhereBuilder {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no condition has been added.
    pub fn is_empty(&self) -> bool {
        self.and_nodes.is_empty() && self.or_nodes.is_empty()
    }

    /// Number of top-level conditions, `and` and `or` together.
    pub fn len(&self) -> usize {
        self.and_nodes.len() + self.or_nodes.len()
    }

    /// Get the build error, if any.
    pub fn build_error(&self) -> Option<&QbError> {
        self.build_error.as_ref()
    }

    /// Append an `and` predicate.
    pub(crate) fn push_and(&mut self, predicate: QbResult<Predicate>) {
        match predicate {
            Ok(p) => self.and_nodes.push(p),
            Err(e) => self.record(e),
        }
    }

    /// Append an `or` predicate.
    pub(crate) fn push_or(&mut self, predicate: QbResult<Predicate>) {
        match predicate {
            Ok(p) => self.or_nodes.push(p),
            Err(e) => self.record(e),
        }
    }

    fn record(&mut self, err: QbError) {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlchain.sql", error = %err, "rejected condition");

        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    /// Build the clause body (without the `where` keyword) and its values.
    pub fn build_clause(&self) -> QbResult<(String, Vec<Value>)> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }

        let mut sql = String::new();
        let mut values = Vec::new();
        for (nodes, sep) in [(&self.and_nodes, " and "), (&self.or_nodes, " or ")] {
            for node in nodes {
                let (fragment, node_values) = node.build()?;
                if fragment.is_empty() {
                    continue;
                }
                if !sql.is_empty() {
                    sql.push_str(sep);
                }
                sql.push_str(&fragment);
                values.extend(node_values);
            }
        }

        Ok((sql, values))
    }
}

impl SqlQb for WhereBuilder {
    fn build(&self) -> QbResult<BuiltQuery> {
        let (sql, values) = self.build_clause()?;
        Ok(BuiltQuery::new(sql, values))
    }
}

/// Condition methods shared by every builder that owns a predicate tree.
///
/// Each method consumes and returns the builder so calls chain. `where_*`
/// methods append to the `and` list, `or_where_*` methods to the `or` list.
/// An operand that does not fit its operator is recorded and reported by the
/// next build.
pub trait Conditional: Sized {
    /// The tree conditions are appended to.
    fn conditions(&mut self) -> &mut WhereBuilder;

    /// Add a prepared predicate.
    fn where_predicate(mut self, predicate: Predicate) -> Self {
        self.conditions().push_and(Ok(predicate));
        self
    }

    /// Add WHERE: column op value
    ///
    /// `op` may be any binary operator, or one of the keywords `in`,
    /// `between`, `is null` and `is not null`.
    fn where_op<V: Into<Operand>>(mut self, column: &str, op: &str, value: V) -> Self {
        let predicate = Predicate::new(column, op, value.into());
        self.conditions().push_and(predicate);
        self
    }

    /// Add WHERE: column = value
    fn where_eq<V: Into<Operand>>(self, column: &str, value: V) -> Self {
        self.where_op(column, "=", value)
    }

    /// Add WHERE: column = other_column
    fn where_column(self, column: &str, other: &str) -> Self {
        self.where_op(column, "=", Column::new(other))
    }

    /// Add WHERE: column op other_column
    fn where_column_op(self, column: &str, op: &str, other: &str) -> Self {
        self.where_op(column, op, Column::new(other))
    }

    /// Add WHERE: column in (values...) or column in (sub-query)
    fn where_in<V: Into<Operand>>(self, column: &str, values: V) -> Self {
        self.where_op(column, "in", values)
    }

    /// Add WHERE: column between low and high
    fn where_between<L: Into<Value>, H: Into<Value>>(self, column: &str, low: L, high: H) -> Self {
        self.where_op(column, "between", Operand::Pair(low.into(), high.into()))
    }

    /// Add WHERE: column like pattern
    fn where_like<V: Into<Operand>>(self, column: &str, pattern: V) -> Self {
        self.where_op(column, "like", pattern)
    }

    /// Add WHERE: column is null
    fn where_null(self, column: &str) -> Self {
        self.where_op(column, "is null", Operand::None)
    }

    /// Add WHERE: column is not null
    fn where_not_null(self, column: &str) -> Self {
        self.where_op(column, "is not null", Operand::None)
    }

    /// Add a nested group built by `f` from a fresh tree.
    ///
    /// The group is parenthesized when it holds more than one condition.
    fn where_group<F>(mut self, f: F) -> Self
    where
        F: FnOnce(WhereBuilder) -> WhereBuilder,
    {
        let group = f(WhereBuilder::new());
        self.conditions().push_and(Ok(Predicate::Group(group)));
        self
    }

    /// Add a prepared predicate to the `or` list.
    fn or_where_predicate(mut self, predicate: Predicate) -> Self {
        self.conditions().push_or(Ok(predicate));
        self
    }

    /// Add OR WHERE: column op value
    fn or_where_op<V: Into<Operand>>(mut self, column: &str, op: &str, value: V) -> Self {
        let predicate = Predicate::new(column, op, value.into());
        self.conditions().push_or(predicate);
        self
    }

    /// Add OR WHERE: column = value
    fn or_where_eq<V: Into<Operand>>(self, column: &str, value: V) -> Self {
        self.or_where_op(column, "=", value)
    }

    /// Add OR WHERE: column = other_column
    fn or_where_column(self, column: &str, other: &str) -> Self {
        self.or_where_op(column, "=", Column::new(other))
    }

    /// Add OR WHERE: column in (values...) or column in (sub-query)
    fn or_where_in<V: Into<Operand>>(self, column: &str, values: V) -> Self {
        self.or_where_op(column, "in", values)
    }

    /// Add OR WHERE: column between low and high
    fn or_where_between<L: Into<Value>, H: Into<Value>>(self, column: &str, low: L, high: H) -> Self {
        self.or_where_op(column, "between", Operand::Pair(low.into(), high.into()))
    }

    /// Add OR WHERE: column like pattern
    fn or_where_like<V: Into<Operand>>(self, column: &str, pattern: V) -> Self {
        self.or_where_op(column, "like", pattern)
    }

    /// Add OR WHERE: column is null
    fn or_where_null(self, column: &str) -> Self {
        self.or_where_op(column, "is null", Operand::None)
    }

    /// Add OR WHERE: column is not null
    fn or_where_not_null(self, column: &str) -> Self {
        self.or_where_op(column, "is not null", Operand::None)
    }

    /// Add a nested group to the `or` list.
    fn or_where_group<F>(mut self, f: F) -> Self
    where
        F: FnOnce(WhereBuilder) -> WhereBuilder,
    {
        let group = f(WhereBuilder::new());
        self.conditions().push_or(Ok(Predicate::Group(group)));
        self
    }
}

impl Conditional for WhereBuilder {
    fn conditions(&mut self) -> &mut WhereBuilder {
        self
    }
}

// ==================== Free-standing constructors ====================

/// Start a tree with `column = value`.
pub fn where_eq<V: Into<Operand>>(column: &str, value: V) -> WhereBuilder {
    WhereBuilder::new().where_eq(column, value)
}

/// Start a tree with `column op value`.
pub fn where_op<V: Into<Operand>>(column: &str, op: &str, value: V) -> WhereBuilder {
    WhereBuilder::new().where_op(column, op, value)
}

/// Start a tree with `column = other_column`, e.g. a join condition.
pub fn where_column(column: &str, other: &str) -> WhereBuilder {
    WhereBuilder::new().where_column(column, other)
}

/// Start a tree with `column op other_column`.
pub fn where_column_op(column: &str, op: &str, other: &str) -> WhereBuilder {
    WhereBuilder::new().where_column_op(column, op, other)
}

/// Start a tree with `column in (...)`.
pub fn where_in<V: Into<Operand>>(column: &str, values: V) -> WhereBuilder {
    WhereBuilder::new().where_in(column, values)
}

/// Start a tree with `column between low and high`.
pub fn where_between<L: Into<Value>, H: Into<Value>>(column: &str, low: L, high: H) -> WhereBuilder {
    WhereBuilder::new().where_between(column, low, high)
}

/// Start a tree with `column like pattern`.
pub fn where_like<V: Into<Operand>>(column: &str, pattern: V) -> WhereBuilder {
    WhereBuilder::new().where_like(column, pattern)
}

/// Start a tree with `column is null`.
pub fn where_null(column: &str) -> WhereBuilder {
    WhereBuilder::new().where_null(column)
}

/// Start a tree with `column is not null`.
pub fn where_not_null(column: &str) -> WhereBuilder {
    WhereBuilder::new().where_not_null(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree = WhereBuilder::new();
        assert!(tree.is_empty());
        let (sql, values) = tree.build_clause().unwrap();
        assert_eq!(sql, "");
        assert!(values.is_empty());
    }

    #[test]
    fn test_and_chain() {
        let (sql, values) = where_eq("username", "zhangsan")
            .where_eq("mobile", "13111111111")
            .build_clause()
            .unwrap();
        assert_eq!(sql, "username = ? and mobile = ?");
        assert_eq!(values, vec![Value::from("zhangsan"), Value::from("13111111111")]);
    }

    #[test]
    fn test_or_chain_is_flat() {
        let (sql, values) = where_eq("a", 1)
            .where_eq("b", 2)
            .or_where_eq("c", 3)
            .or_where_eq("d", 4)
            .build_clause()
            .unwrap();
        assert_eq!(sql, "a = ? and b = ? or c = ? or d = ?");
        assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]);
    }

    #[test]
    fn test_or_nodes_follow_and_nodes_regardless_of_call_order() {
        let (sql, _) = WhereBuilder::new()
            .or_where_eq("c", 3)
            .where_eq("a", 1)
            .build_clause()
            .unwrap();
        assert_eq!(sql, "a = ? or c = ?");
    }

    #[test]
    fn test_or_only_tree() {
        let (sql, values) = WhereBuilder::new().or_where_eq("a", 1).build_clause().unwrap();
        assert_eq!(sql, "a = ?");
        assert_eq!(values, vec![Value::Int(1)]);
    }

    #[test]
    fn test_nested_groups() {
        let (sql, values) = where_like("username", "zhangsan")
            .where_group(|g| g.where_op("age", "<", 20).or_where_op("age", ">", 30))
            .build_clause()
            .unwrap();
        assert_eq!(sql, "username like ? and (age < ? or age > ?)");
        assert_eq!(values, vec![Value::from("zhangsan"), Value::Int(20), Value::Int(30)]);
    }

    #[test]
    fn test_empty_group_is_skipped() {
        let (sql, _) = where_eq("a", 1).where_group(|g| g).where_eq("b", 2).build_clause().unwrap();
        assert_eq!(sql, "a = ? and b = ?");
    }

    #[test]
    fn test_misuse_is_reported_on_build() {
        let tree = where_eq("a", 1).where_in("id", 5).where_eq("b", 2);
        assert!(matches!(tree.build_error(), Some(QbError::InvalidInValue { .. })));
        assert!(matches!(tree.build_clause(), Err(QbError::InvalidInValue { .. })));
    }

    #[test]
    fn test_first_misuse_wins() {
        let tree = where_op("a", "between", 1).where_in("b", 2);
        assert!(matches!(tree.build_error(), Some(QbError::InvalidBetweenValue { .. })));
    }

    #[test]
    fn test_nested_misuse_propagates() {
        let tree = where_eq("a", 1).or_where_group(|g| g.where_op("id", "in", "x"));
        assert!(tree.build_error().is_none());
        assert!(matches!(tree.build_clause(), Err(QbError::InvalidInValue { .. })));
    }

    #[test]
    fn test_free_constructors() {
        assert_eq!(where_column("books.user_id", "users.id").build_clause().unwrap().0, "books.user_id = users.id");
        assert_eq!(where_column_op("a.x", ">", "b.y").build_clause().unwrap().0, "a.x > b.y");
        assert_eq!(where_null("deleted_at").build_clause().unwrap().0, "deleted_at is null");
        assert_eq!(where_not_null("deleted_at").build_clause().unwrap().0, "deleted_at is not null");
        assert_eq!(where_between("id", 1, 10).build_clause().unwrap().0, "id between ? and ?");
        assert_eq!(where_in("id", [1, 2]).build_clause().unwrap().0, "id in (?, ?)");
    }

    #[test]
    fn test_where_builder_as_sql_qb() {
        let built = SqlQb::build(&where_op("age", ">", 10)).unwrap();
        assert_eq!(built.sql, "age > ?");
        assert_eq!(built.to_string(), "age > 10");
    }
}
