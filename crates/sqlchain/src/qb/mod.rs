//! Fluent query builders.
//!
//! Every builder produces SQL with `?` placeholders and a positionally
//! matching list of bind values. Condition methods are shared through the
//! [`Conditional`] trait, so WHERE, HAVING and JOIN conditions are written the
//! same way everywhere.
//!
//! # Usage
//!
//! ```
//! use sqlchain::qb::{self, Conditional};
//!
//! let q = qb::select(["*"])
//!     .from("users")
//!     .where_op("age", "<", 10)
//!     .where_in("id", [1, 2, 3, 4])
//!     .or_where_group(|g| {
//!         g.where_like("username", "zhangsan")
//!             .where_group(|g| g.where_op("age", "<", 20).or_where_op("age", ">", 30))
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     q.sql,
//!     "select * from users where age < ? and id in (?, ?, ?, ?) \
//!      or (username like ? and (age < ? or age > ?))"
//! );
//! assert_eq!(q.values.len(), 8);
//! ```

mod delete;
mod expr;
mod insert;
mod join;
mod param;
pub mod render;
mod select;
mod traits;
mod update;
mod where_builder;

pub use delete::DeleteBuilder;
pub use expr::{Op, Predicate};
pub use insert::InsertBuilder;
pub use join::{Join, JoinKind};
pub use param::{Column, Operand, Value};
pub use select::{Lock, SelectBuilder};
pub use traits::{BuiltQuery, SqlQb};
pub use update::UpdateBuilder;
pub use where_builder::{
    Conditional, WhereBuilder, where_between, where_column, where_column_op, where_eq, where_in,
    where_like, where_not_null, where_null, where_op,
};

/// Create a SELECT query builder projecting `fields`.
///
/// # Example
/// ```
/// let q = sqlchain::qb::select(["id", "name"]).from("users").build().unwrap();
/// assert_eq!(q.sql, "select id, name from users");
/// ```
pub fn select<I, S>(fields: I) -> SelectBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectBuilder::new(fields)
}

/// Create an INSERT query builder.
pub fn insert(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Create an UPDATE query builder.
pub fn update(table: &str) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Create a DELETE query builder.
pub fn delete(table: &str) -> DeleteBuilder {
    DeleteBuilder::new(table)
}
