//! Convenient imports for typical `sqlchain` usage.
//!
//! ```
//! use sqlchain::prelude::*;
//! ```

pub use crate::{QbError, QbResult};

pub use crate::qb::{
    BuiltQuery, Column, Conditional, SqlQb, Value, WhereBuilder, delete, insert, select, update,
    where_between, where_column, where_column_op, where_eq, where_in, where_like, where_not_null,
    where_null, where_op,
};
