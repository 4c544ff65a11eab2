//! DELETE query builder.

use std::fmt;

use crate::error::QbResult;
use crate::qb::traits::{BuildCache, BuiltQuery, SqlQb, fmt_interpolated};
use crate::qb::where_builder::{Conditional, WhereBuilder};

/// DELETE query builder.
///
/// Without conditions the statement deletes every row.
#[derive(Clone, Debug)]
pub struct DeleteBuilder {
    table: String,
    where_tree: WhereBuilder,
    cache: BuildCache,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_tree: WhereBuilder::new(),
            cache: BuildCache::default(),
        }
    }

    /// Build the SQL and bind values. Later calls return the first result.
    pub fn build(&self) -> QbResult<BuiltQuery> {
        self.cache.get_or_build("delete", || self.build_delete())
    }

    fn build_delete(&self) -> QbResult<BuiltQuery> {
        let mut sql = format!("delete from {}", self.table);
        let (where_sql, values) = self.where_tree.build_clause()?;
        if !where_sql.is_empty() {
            sql.push_str(" where ");
            sql.push_str(&where_sql);
        }
        Ok(BuiltQuery::new(sql, values))
    }
}

impl Conditional for DeleteBuilder {
    fn conditions(&mut self) -> &mut WhereBuilder {
        &mut self.where_tree
    }
}

impl SqlQb for DeleteBuilder {
    fn build(&self) -> QbResult<BuiltQuery> {
        DeleteBuilder::build(self)
    }
}

impl fmt::Display for DeleteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_interpolated(self, f)
    }
}
