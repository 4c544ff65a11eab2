//! Error types for sqlchain

use thiserror::Error;

/// Result type alias for builder operations
pub type QbResult<T> = Result<T, QbError>;

/// Misuse errors raised while assembling a statement.
///
/// Every variant describes an argument-shape mismatch on the caller's side.
/// None of them depend on data or I/O, so they are meant to be fixed in the
/// calling code rather than handled at runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QbError {
    /// `in` was given something other than a list or a sub-query
    #[error("`in` on column '{column}' needs a list or a sub-query, got {found}")]
    InvalidInValue { column: String, found: &'static str },

    /// `between` was given something other than a two-element pair
    #[error("`between` on column '{column}' needs exactly two bounds, got {found}")]
    InvalidBetweenValue { column: String, found: String },

    /// The operand shape does not fit the operator
    #[error("operator '{op}' on column '{column}' cannot take {found}")]
    InvalidOperand {
        column: String,
        op: String,
        found: &'static str,
    },

    /// INSERT column list and value list disagree in length
    #[error("insert into '{table}' lists {columns} columns but {values} values")]
    ColumnCountMismatch {
        table: String,
        columns: usize,
        values: usize,
    },

    /// UPDATE without any SET column
    #[error("update of '{table}' has no columns to set")]
    EmptySet { table: String },

    /// A foreign value could not be turned into a bind value
    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl QbError {
    /// Create a conversion error
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion(message.into())
    }

    /// Check if this error came from a predicate operand mismatch
    pub fn is_operand_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInValue { .. } | Self::InvalidBetweenValue { .. } | Self::InvalidOperand { .. }
        )
    }
}
