//! Error types for table operations.
//!
//! All variants are deterministic input-validation failures reported
//! synchronously to the caller. Nothing is retried, and failing operations
//! leave the table untouched.

/// Errors produced by table mutation, sorting, and formatting.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A sort chain referenced a header name absent from the table.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A sort chain referenced a comparator key that is not registered.
    #[error("unknown sorter key '{0}'")]
    UnknownSorterKey(String),

    /// A format string could not be parsed.
    #[error("invalid format spec '{fmt}': {reason}")]
    InvalidFormatSpec {
        /// The offending format string.
        fmt: String,
        /// What made it unparseable.
        reason: String,
    },

    /// A row's length does not match the table's header count.
    #[error("row {row} length ({len}) is not equal to headers length ({expected})")]
    RowLengthMismatch {
        /// Position of the offending row in the input.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// The table's header count.
        expected: usize,
    },

    /// A column's values do not cover every row of the table.
    #[error("column length ({len}) is not equal to row count ({expected})")]
    ColumnLengthMismatch {
        /// Number of values supplied for the column.
        len: usize,
        /// The table's row count.
        expected: usize,
    },

    /// A row index was outside the table's bounds.
    #[error("row index {index} out of range (table has {len} rows)")]
    RowIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The table's row count.
        len: usize,
    },

    /// Failure writing the output buffer during rendering.
    #[error("output error: {0}")]
    Output(String),
}

impl TableError {
    /// Create an invalid-format-spec error.
    pub fn invalid_format(fmt: impl Into<String>, reason: impl Into<String>) -> Self {
        TableError::InvalidFormatSpec {
            fmt: fmt.into(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        TableError::Output(err.to_string())
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for TableError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        TableError::Output(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for TableError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        TableError::Output(err.to_string())
    }
}
