//! Cell values and their formatting kinds.
//!
//! A [`Cell`] is a dynamically typed table value. Its declared variant, not
//! its current digits, decides which format descriptor applies: `Float(2.0)`
//! is a float even though it has no fractional part.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Absent/null value. Renders as an empty string.
    Null,
    /// Boolean value. Formats as a string kind.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Str(String),
}

/// Classification of a cell for format-descriptor selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Integer values (`Cell::Int`).
    Integer,
    /// Floating-point values (`Cell::Float`).
    Float,
    /// Everything else: text, booleans, nulls.
    String,
}

impl Cell {
    /// The formatting kind of this cell.
    ///
    /// Non-numeric, non-null values classify as [`ValueKind::String`];
    /// `Null` and `Bool` do too, since they render as text.
    pub fn kind(&self) -> ValueKind {
        match self {
            Cell::Int(_) => ValueKind::Integer,
            Cell::Float(_) => ValueKind::Float,
            Cell::Null | Cell::Bool(_) | Cell::Str(_) => ValueKind::String,
        }
    }

    /// Numeric coercion used by the numeric comparators and the integer/float
    /// renderers. `Str`, `Bool`, and `Null` do not coerce.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(n) => Some(*n as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// True for `Cell::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int(v as i64)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Str(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Str(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Cell::Null,
        }
    }
}
