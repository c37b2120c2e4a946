//! Printf-style format spec parsing.
//!
//! Grammar, parsed left to right: optional `%`, optional `-` flag (left
//! alignment), optional width digits, optional `.` plus precision digits,
//! mandatory trailing type letter (`s`, `d`, or `f`). Examples:
//!
//! | Format    | Meaning                                  |
//! |-----------|------------------------------------------|
//! | `%s`      | string, right-aligned, no padding        |
//! | `%-10s`   | string, left-aligned, min width 10       |
//! | `%d`      | integer (truncates toward zero)          |
//! | `%.2f`    | float, 2 decimals (half away from zero)  |
//! | `%.f`     | float rounded to an integer              |

use crate::error::TableError;
use crate::value::ValueKind;
use serde::{Deserialize, Serialize};

/// Text alignment within a padded field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-align text (pad on the right).
    Left,
    /// Right-align text (pad on the left).
    #[default]
    Right,
}

/// The value kind a format string targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// `%s` — text.
    String,
    /// `%d` — integer, truncating toward zero.
    Integer,
    /// `%f` — float, rounded to `precision` decimals.
    Float,
}

/// A parsed format string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Target kind (from the type letter).
    pub kind: FormatKind,
    /// Minimum field width; `None` means no padding.
    pub width: Option<usize>,
    /// Padding side when width applies.
    pub align: Align,
    /// Decimal places for the float kind. Parsed but ignored for
    /// integer/string kinds.
    pub precision: Option<usize>,
}

impl Descriptor {
    /// Parse a single printf-style format string.
    pub fn parse(fmt: &str) -> Result<Self, TableError> {
        let mut chars = fmt.chars().peekable();

        if chars.peek() == Some(&'%') {
            chars.next();
        }

        let align = if chars.peek() == Some(&'-') {
            chars.next();
            Align::Left
        } else {
            Align::Right
        };

        let width = parse_digits(&mut chars, fmt, "width")?;

        let precision = if chars.peek() == Some(&'.') {
            chars.next();
            // A bare "." means precision 0 ("%.f" rounds to an integer).
            Some(parse_digits(&mut chars, fmt, "precision")?.unwrap_or(0))
        } else {
            None
        };

        let kind = match chars.next() {
            Some('s') => FormatKind::String,
            Some('d') => FormatKind::Integer,
            Some('f') => FormatKind::Float,
            Some(c) => {
                return Err(TableError::invalid_format(
                    fmt,
                    format!("unrecognized type letter '{}'", c),
                ))
            }
            None => return Err(TableError::invalid_format(fmt, "missing type letter")),
        };

        if chars.next().is_some() {
            return Err(TableError::invalid_format(
                fmt,
                "trailing characters after type letter",
            ));
        }

        Ok(Descriptor {
            kind,
            width,
            align,
            precision,
        })
    }
}

fn parse_digits(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    fmt: &str,
    what: &str,
) -> Result<Option<usize>, TableError> {
    let mut digits = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse::<usize>()
        .map(Some)
        .map_err(|_| TableError::invalid_format(fmt, format!("malformed {} digits", what)))
}

/// Raw format configuration, one printf-style string per slot.
///
/// Omitted slots use the documented defaults: header and string `%-s`,
/// integer `%d`, float `%.5f`. The `columns` list supplies per-column
/// overrides, one slot per header position; a `None` entry inherits the
/// type default for whatever value is stored in that cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Format for header cells.
    pub header: Option<String>,
    /// Format for float cells.
    pub float: Option<String>,
    /// Format for integer cells.
    pub integer: Option<String>,
    /// Format for string cells.
    pub string: Option<String>,
    /// Per-column overrides, one slot per header position.
    pub columns: Option<Vec<Option<String>>>,
}

impl FormatConfig {
    /// Create an empty config (all defaults).
    pub fn new() -> Self {
        FormatConfig::default()
    }

    /// Set the header format.
    pub fn header(mut self, fmt: impl Into<String>) -> Self {
        self.header = Some(fmt.into());
        self
    }

    /// Set the float format.
    pub fn float(mut self, fmt: impl Into<String>) -> Self {
        self.float = Some(fmt.into());
        self
    }

    /// Set the integer format.
    pub fn integer(mut self, fmt: impl Into<String>) -> Self {
        self.integer = Some(fmt.into());
        self
    }

    /// Set the string format.
    pub fn string(mut self, fmt: impl Into<String>) -> Self {
        self.string = Some(fmt.into());
        self
    }

    /// Set per-column overrides. `None` entries inherit the type default.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(|c| c.map(Into::into)).collect());
        self
    }
}

/// Fully parsed format configuration: every slot holds a [`Descriptor`].
///
/// Parsing happens before any cell is rendered, so a malformed column
/// override fails the whole render call instead of producing partial output.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatSet {
    /// Descriptor for header cells.
    pub header: Descriptor,
    /// Type default for float cells.
    pub float: Descriptor,
    /// Type default for integer cells.
    pub integer: Descriptor,
    /// Type default for string cells.
    pub string: Descriptor,
    /// Per-column overrides; `None` inherits the type default.
    pub columns: Vec<Option<Descriptor>>,
}

impl FormatSet {
    /// Parse a raw config, applying slot defaults where omitted.
    pub fn parse(config: &FormatConfig) -> Result<Self, TableError> {
        let parse_slot = |slot: &Option<String>, default: Descriptor| match slot {
            Some(fmt) => Descriptor::parse(fmt),
            None => Ok(default),
        };

        let columns = match &config.columns {
            Some(slots) => slots
                .iter()
                .map(|slot| slot.as_deref().map(Descriptor::parse).transpose())
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(FormatSet {
            header: parse_slot(&config.header, default_string())?,
            float: parse_slot(&config.float, default_float())?,
            integer: parse_slot(&config.integer, default_integer())?,
            string: parse_slot(&config.string, default_string())?,
            columns,
        })
    }

    /// Resolve the effective descriptor for a cell.
    ///
    /// Precedence: column override (if present and non-null) fully replaces
    /// the type default selected by the cell's runtime kind. No partial
    /// merging.
    pub fn resolve(&self, column: usize, kind: ValueKind) -> &Descriptor {
        self.columns
            .get(column)
            .and_then(|slot| slot.as_ref())
            .unwrap_or(match kind {
                ValueKind::Integer => &self.integer,
                ValueKind::Float => &self.float,
                ValueKind::String => &self.string,
            })
    }

    /// Resolve the descriptor for a header cell: column override if present,
    /// otherwise the header slot.
    pub fn resolve_header(&self, column: usize) -> &Descriptor {
        self.columns
            .get(column)
            .and_then(|slot| slot.as_ref())
            .unwrap_or(&self.header)
    }
}

// Slot defaults: header/string "%-s", integer "%d", float "%.5f".

fn default_string() -> Descriptor {
    Descriptor {
        kind: FormatKind::String,
        width: None,
        align: Align::Left,
        precision: None,
    }
}

fn default_integer() -> Descriptor {
    Descriptor {
        kind: FormatKind::Integer,
        width: None,
        align: Align::Right,
        precision: None,
    }
}

fn default_float() -> Descriptor {
    Descriptor {
        kind: FormatKind::Float,
        width: None,
        align: Align::Right,
        precision: Some(5),
    }
}
