//! Trait definitions for statement builders.

use std::cell::OnceCell;
use std::fmt;

use serde::Serialize;

use crate::error::QbResult;
use crate::qb::param::Value;
use crate::qb::render::interpolate;

/// Base trait for anything that builds into SQL plus bind values.
///
/// Implemented by the four statement builders and by [`WhereBuilder`],
/// which is what lets a statement stand in as a sub-query operand.
///
/// [`WhereBuilder`]: crate::qb::WhereBuilder
pub trait SqlQb: fmt::Debug {
    /// Build the SQL string and its bind values.
    fn build(&self) -> QbResult<BuiltQuery>;

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> QbResult<String> {
        Ok(self.build()?.sql)
    }

    /// Render the SQL with every placeholder replaced by its literal.
    ///
    /// For display and logging only. The output is not safe to execute.
    fn interpolate(&self) -> QbResult<String> {
        Ok(self.build()?.interpolate())
    }
}

/// The result of building a statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltQuery {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Bind values, one per placeholder, in placeholder order.
    pub values: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, values: Vec<Value>) -> Self {
        Self { sql, values }
    }

    /// Split into the `(sql, values)` pair handed to a driver.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.values)
    }

    /// Render the SQL with literals inlined.
    pub fn interpolate(&self) -> String {
        interpolate(&self.sql, &self.values)
    }
}

impl fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.interpolate())
    }
}

/// Build-once storage shared by the statement builders.
///
/// The first successful build is kept and handed out on every later call.
/// Changing a builder after it has been built does not refresh the cache.
#[derive(Clone, Debug, Default)]
pub(crate) struct BuildCache(OnceCell<BuiltQuery>);

impl BuildCache {
    pub(crate) fn get_or_build(
        &self,
        statement: &'static str,
        build: impl FnOnce() -> QbResult<BuiltQuery>,
    ) -> QbResult<BuiltQuery> {
        if let Some(built) = self.0.get() {
            return Ok(built.clone());
        }

        let built = build()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlchain.sql",
            statement,
            param_count = built.values.len(),
            sql = %built.sql,
            "built statement"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = statement;

        Ok(self.0.get_or_init(|| built).clone())
    }

    #[cfg(test)]
    pub(crate) fn is_built(&self) -> bool {
        self.0.get().is_some()
    }
}

/// `Display` body for builders: the interpolated SQL.
///
/// A misuse error surfaces as `fmt::Error`, so `to_string()` fails loudly
/// instead of printing a half-built statement.
pub(crate) fn fmt_interpolated<B: SqlQb + ?Sized>(builder: &B, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let built = builder.build().map_err(|_| fmt::Error)?;
    f.write_str(&built.interpolate())
}
