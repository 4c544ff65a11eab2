//! # sqlchain
//!
//! A fluent SQL statement builder.
//!
//! ## Features
//!
//! - **Parameterized output**: every builder yields SQL with `?` placeholders
//!   plus the bind values in placeholder order
//! - **Predicate trees**: `and`/`or` chains, nested groups, `in`, `between`,
//!   null checks and sub-selects through one [`Conditional`] surface
//! - **Fail on misuse**: an operand that does not fit its operator is reported
//!   by `build()` as a [`QbError`]
//! - **Build once**: a statement is assembled on the first `build()` and the
//!   result is reused afterwards
//! - **Debug rendering**: `Display` inlines the bind values as literals
//!
//! ## Query Builder (qb)
//!
//! ```
//! use sqlchain::prelude::*;
//!
//! // SELECT
//! let q = select(["*"]).from("users").where_eq("id", 10).build()?;
//! assert_eq!(q.sql, "select * from users where id = ?");
//! assert_eq!(q.values, vec![Value::Int(10)]);
//!
//! // INSERT
//! let q = insert("users").set("username", "alice").set("age", 20).build()?;
//! assert_eq!(q.sql, "insert into users (username, age) values (?, ?)");
//!
//! // UPDATE
//! let q = update("users").set("status", 0).where_eq("id", 1);
//! assert_eq!(q.to_string(), "update users set status = 0 where id = 1");
//!
//! // DELETE
//! let q = delete("users").where_in("id", [1, 2, 3]).build()?;
//! assert_eq!(q.sql, "delete from users where id in (?, ?, ?)");
//! # Ok::<(), sqlchain::QbError>(())
//! ```

pub mod error;
pub mod prelude;
pub mod qb;

pub use error::{QbError, QbResult};

// Re-export qb module for easy access
pub use qb::{
    BuiltQuery, Column, Conditional, DeleteBuilder, InsertBuilder, Join, JoinKind, Lock, Op, Operand,
    Predicate, SelectBuilder, SqlQb, UpdateBuilder, Value, WhereBuilder, delete, insert, select,
    update, where_between, where_column, where_column_op, where_eq, where_in, where_like,
    where_not_null, where_null, where_op,
};
