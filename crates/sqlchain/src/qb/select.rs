//! SELECT query builder.

use std::fmt;
use std::rc::Rc;

use crate::error::QbResult;
use crate::qb::join::{Join, JoinKind};
use crate::qb::param::Operand;
use crate::qb::traits::{BuildCache, BuiltQuery, SqlQb, fmt_interpolated};
use crate::qb::where_builder::{Conditional, WhereBuilder};

/// Row locking clause appended after LIMIT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lock {
    /// `lock in share mode`
    Share,
    /// `for update`
    Update,
}

impl Lock {
    pub fn as_str(self) -> &'static str {
        match self {
            Lock::Share => "lock in share mode",
            Lock::Update => "for update",
        }
    }
}

/// SELECT query builder.
///
/// Clauses are emitted in SQL order regardless of call order:
/// fields, table, joins, where, group by, having, order by, limit, lock.
#[derive(Clone, Debug)]
pub struct SelectBuilder {
    /// Projected fields (empty renders as `*`)
    fields: Vec<String>,
    /// FROM table
    table: String,
    /// JOIN clauses
    joins: Vec<Join>,
    /// WHERE conditions
    where_tree: WhereBuilder,
    /// GROUP BY columns
    group_by: Vec<String>,
    /// HAVING conditions
    having: WhereBuilder,
    /// ORDER BY items, already validated
    order_by: Vec<String>,
    limit: u64,
    offset: u64,
    lock: Option<Lock>,
    cache: BuildCache,
}

impl SelectBuilder {
    /// Create a SELECT projecting `fields`.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            table: String::new(),
            joins: Vec::new(),
            where_tree: WhereBuilder::new(),
            group_by: Vec::new(),
            having: WhereBuilder::new(),
            order_by: Vec::new(),
            limit: 0,
            offset: 0,
            lock: None,
            cache: BuildCache::default(),
        }
    }

    /// Set the FROM table (or any FROM expression).
    pub fn from(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    /// Append one projected field.
    pub fn add_field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }

    // ==================== JOIN ====================

    /// Add a prepared JOIN.
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: WhereBuilder) -> Self {
        self.join(Join::new(JoinKind::Left, table, on))
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: &str, on: WhereBuilder) -> Self {
        self.join(Join::new(JoinKind::Right, table, on))
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: &str, on: WhereBuilder) -> Self {
        self.join(Join::new(JoinKind::Inner, table, on))
    }

    // ==================== Grouping & Ordering ====================

    /// Append GROUP BY columns.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Extend the HAVING tree through `f`.
    pub fn having<F>(mut self, f: F) -> Self
    where
        F: FnOnce(WhereBuilder) -> WhereBuilder,
    {
        self.having = f(std::mem::take(&mut self.having));
        self
    }

    /// Add ORDER BY column direction.
    ///
    /// `direction` must be `asc` or `desc` in any case; anything else is
    /// ignored and leaves the order list unchanged.
    pub fn order_by(mut self, column: &str, direction: &str) -> Self {
        let direction = direction.trim();
        if direction.eq_ignore_ascii_case("asc") || direction.eq_ignore_ascii_case("desc") {
            self.order_by
                .push(format!("{} {}", column, direction.to_ascii_lowercase()));
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "sqlchain.sql", column, direction, "ignored order by direction");
        }
        self
    }

    /// Add ORDER BY column asc.
    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(column, "asc")
    }

    /// Add ORDER BY column desc.
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, "desc")
    }

    // ==================== Pagination & Locking ====================

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = n;
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = n;
        self
    }

    /// Set both OFFSET and LIMIT, MySQL argument order.
    pub fn limit_offset(self, offset: u64, limit: u64) -> Self {
        self.offset(offset).limit(limit)
    }

    /// Append `lock in share mode`.
    pub fn lock_in_share_mode(self) -> Self {
        self.lock(Lock::Share)
    }

    /// Append `for update`.
    pub fn for_update(self) -> Self {
        self.lock(Lock::Update)
    }

    /// Set the locking clause.
    pub fn lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }

    // ==================== Build ====================

    /// Build the SQL and bind values. Later calls return the first result.
    pub fn build(&self) -> QbResult<BuiltQuery> {
        self.cache.get_or_build("select", || self.build_select())
    }

    fn build_select(&self) -> QbResult<BuiltQuery> {
        let fields = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut sql = format!("select {} from {}", fields, self.table);
        let mut values = Vec::new();

        // JOINs
        for join in &self.joins {
            let (join_sql, join_values) = join.build()?;
            sql.push(' ');
            sql.push_str(&join_sql);
            values.extend(join_values);
        }

        // WHERE
        let (where_sql, where_values) = self.where_tree.build_clause()?;
        if !where_sql.is_empty() {
            sql.push_str(" where ");
            sql.push_str(&where_sql);
        }
        values.extend(where_values);

        // GROUP BY
        if !self.group_by.is_empty() {
            sql.push_str(" group by ");
            sql.push_str(&self.group_by.join(", "));
        }

        // HAVING
        let (having_sql, having_values) = self.having.build_clause()?;
        if !having_sql.is_empty() {
            sql.push_str(" having ");
            sql.push_str(&having_sql);
        }
        values.extend(having_values);

        // ORDER BY
        if !self.order_by.is_empty() {
            sql.push_str(" order by ");
            sql.push_str(&self.order_by.join(", "));
        }

        // LIMIT offset, limit
        if self.limit > 0 || self.offset > 0 {
            sql.push_str(&format!(" limit {}, {}", self.offset, self.limit));
        }

        if let Some(lock) = self.lock {
            sql.push(' ');
            sql.push_str(lock.as_str());
        }

        Ok(BuiltQuery::new(sql, values))
    }
}

impl Conditional for SelectBuilder {
    fn conditions(&mut self) -> &mut WhereBuilder {
        &mut self.where_tree
    }
}

impl SqlQb for SelectBuilder {
    fn build(&self) -> QbResult<BuiltQuery> {
        SelectBuilder::build(self)
    }
}

impl From<SelectBuilder> for Operand {
    fn from(query: SelectBuilder) -> Self {
        Operand::Query(Rc::new(query))
    }
}

impl fmt::Display for SelectBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_interpolated(self, f)
    }
}
