//! Predicate nodes for WHERE/HAVING/ON conditions.
//!
//! A [`Predicate`] is one condition: a comparison, an `in` list, a `between`
//! range, a null check, or a nested group. The node shape is chosen from the
//! operator and operand when the predicate is created, so a node that exists
//! can always be rendered.

use std::rc::Rc;

use crate::error::{QbError, QbResult};
use crate::qb::param::{Operand, Value};
use crate::qb::traits::SqlQb;
use crate::qb::where_builder::WhereBuilder;

/// Operator parsed from the string handed to `where_op`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    In,
    Between,
    IsNull,
    IsNotNull,
    /// `=`, `<`, `like`, or any other binary operator, kept as written.
    Compare(String),
}

impl Op {
    /// Parse an operator. Keywords match case-insensitively.
    pub fn parse(op: &str) -> Self {
        let trimmed = op.trim();
        let lower = trimmed.to_ascii_lowercase();
        match lower.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["in"] => Op::In,
            ["between"] => Op::Between,
            ["is", "null"] => Op::IsNull,
            ["is", "not", "null"] => Op::IsNotNull,
            _ => Op::Compare(trimmed.to_string()),
        }
    }
}

/// A single condition.
#[derive(Clone, Debug)]
pub enum Predicate {
    /// `column op ?`
    Compare { column: String, op: String, value: Value },

    /// `column op other_column`, no bind value.
    CompareColumn { column: String, op: String, other: String },

    /// `column op (sub-query)`
    CompareQuery {
        column: String,
        op: String,
        query: Rc<dyn SqlQb>,
    },

    /// `column in (?, ?, ...)`
    In { column: String, values: Vec<Value> },

    /// `column in (sub-query)`
    InQuery { column: String, query: Rc<dyn SqlQb> },

    /// `column between ? and ?`
    Between { column: String, low: Value, high: Value },

    /// `column is null` / `column is not null`
    Null { column: String, negated: bool },

    /// A nested tree, parenthesized when it holds more than one condition.
    Group(WhereBuilder),
}

impl Predicate {
    /// Create a predicate from a column, an operator and an operand.
    ///
    /// Fails when the operand shape does not fit the operator, e.g. `in`
    /// with a scalar or `between` with anything but two bounds.
    pub fn new(column: impl Into<String>, op: &str, operand: Operand) -> QbResult<Self> {
        let column = column.into();
        match (Op::parse(op), operand) {
            (Op::In, Operand::List(values)) => Ok(Predicate::In { column, values }),
            (Op::In, Operand::Query(query)) => Ok(Predicate::InQuery { column, query }),
            (Op::In, other) => Err(QbError::InvalidInValue {
                column,
                found: other.kind(),
            }),

            (Op::Between, Operand::Pair(low, high)) => Ok(Predicate::Between { column, low, high }),
            (Op::Between, Operand::List(values)) => match <[Value; 2]>::try_from(values) {
                Ok([low, high]) => Ok(Predicate::Between { column, low, high }),
                Err(values) => Err(QbError::InvalidBetweenValue {
                    column,
                    found: format!("a list of {} values", values.len()),
                }),
            },
            (Op::Between, other) => Err(QbError::InvalidBetweenValue {
                column,
                found: other.kind().to_string(),
            }),

            (Op::IsNull, Operand::None) => Ok(Predicate::Null { column, negated: false }),
            (Op::IsNotNull, Operand::None) => Ok(Predicate::Null { column, negated: true }),

            (Op::Compare(op), Operand::Value(value)) => Ok(Predicate::Compare { column, op, value }),
            (Op::Compare(op), Operand::Column(other)) => {
                Ok(Predicate::CompareColumn { column, op, other })
            }
            (Op::Compare(op), Operand::Query(query)) => {
                Ok(Predicate::CompareQuery { column, op, query })
            }

            (op, other) => Err(QbError::InvalidOperand {
                column,
                op: op_name(&op),
                found: other.kind(),
            }),
        }
    }

    /// Create a comparison: `column op ?`
    pub fn compare(column: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Compare {
            column: column.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// Create an IN list: `column in (?, ...)`
    pub fn in_list<T: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a BETWEEN range: `column between ? and ?`
    pub fn between(column: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Predicate::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    /// Create an IS NULL check.
    pub fn is_null(column: impl Into<String>) -> Self {
        Predicate::Null {
            column: column.into(),
            negated: false,
        }
    }

    /// Create an IS NOT NULL check.
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Predicate::Null {
            column: column.into(),
            negated: true,
        }
    }

    /// Build the SQL fragment and its bind values.
    pub fn build(&self) -> QbResult<(String, Vec<Value>)> {
        match self {
            Predicate::Compare { column, op, value } => {
                Ok((format!("{column} {op} ?"), vec![value.clone()]))
            }
            Predicate::CompareColumn { column, op, other } => {
                Ok((format!("{column} {op} {other}"), Vec::new()))
            }
            Predicate::CompareQuery { column, op, query } => {
                let built = query.build()?;
                Ok((format!("{column} {op} ({})", built.sql), built.values))
            }
            Predicate::In { column, values } => {
                let placeholders = vec!["?"; values.len()].join(", ");
                Ok((format!("{column} in ({placeholders})"), values.clone()))
            }
            Predicate::InQuery { column, query } => {
                let built = query.build()?;
                Ok((format!("{column} in ({})", built.sql), built.values))
            }
            Predicate::Between { column, low, high } => Ok((
                format!("{column} between ? and ?"),
                vec![low.clone(), high.clone()],
            )),
            Predicate::Null { column, negated } => {
                if *negated {
                    Ok((format!("{column} is not null"), Vec::new()))
                } else {
                    Ok((format!("{column} is null"), Vec::new()))
                }
            }
            Predicate::Group(tree) => {
                let (sql, values) = tree.build_clause()?;
                if tree.len() > 1 && !sql.is_empty() {
                    Ok((format!("({sql})"), values))
                } else {
                    Ok((sql, values))
                }
            }
        }
    }
}

fn op_name(op: &Op) -> String {
    match op {
        Op::In => "in".to_string(),
        Op::Between => "between".to_string(),
        Op::IsNull => "is null".to_string(),
        Op::IsNotNull => "is not null".to_string(),
        Op::Compare(s) => s.clone(),
    }
}
