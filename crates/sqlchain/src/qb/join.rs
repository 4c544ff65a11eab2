//! JOIN clauses for SELECT.

use crate::error::QbResult;
use crate::qb::param::Value;
use crate::qb::where_builder::WhereBuilder;

/// Join flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Right,
    Inner,
}

impl JoinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinKind::Left => "left",
            JoinKind::Right => "right",
            JoinKind::Inner => "inner",
        }
    }
}

/// One `<kind> join <table> on <condition>` clause.
#[derive(Clone, Debug)]
pub struct Join {
    kind: JoinKind,
    table: String,
    on: WhereBuilder,
}

impl Join {
    pub fn new(kind: JoinKind, table: &str, on: WhereBuilder) -> Self {
        Self {
            kind,
            table: table.to_string(),
            on,
        }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    /// Build the clause and the values bound by its `on` condition.
    ///
    /// An empty `on` tree drops the `on` keyword.
    pub fn build(&self) -> QbResult<(String, Vec<Value>)> {
        let (on_sql, values) = self.on.build_clause()?;
        let sql = if on_sql.is_empty() {
            format!("{} join {}", self.kind.as_str(), self.table)
        } else {
            format!("{} join {} on {}", self.kind.as_str(), self.table, on_sql)
        };
        Ok((sql, values))
    }
}
