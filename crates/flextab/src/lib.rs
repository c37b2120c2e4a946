//! # FlexTab — in-memory tables with sort chains and printf-style formatting
//!
//! `flextab` is a small data-structure crate: an ordered set of named
//! columns over dynamically typed rows, with two engines on top:
//!
//! - A **multi-key sort engine** that composes named and custom comparators
//!   into priority chains ([`sort`] module).
//! - A **format engine** that parses printf-style format specifiers and
//!   renders typed cells into Markdown or CSV ([`format`] module).
//!
//! ## Quick Start
//!
//! ```rust
//! use flextab::{Cell, FormatConfig, OutputStyle, SortKey, Table};
//!
//! let mut table = Table::with_rows(
//!     ["ts", "evname", "time"],
//!     vec![
//!         vec![Cell::Int(123), Cell::from("begin"), Cell::Float(0.0)],
//!         vec![Cell::Int(123), Cell::from("start"), Cell::Float(3.1)],
//!         vec![Cell::Int(124), Cell::from("end"), Cell::Float(4.1)],
//!     ],
//! )
//! .unwrap();
//!
//! // Primary key ascending, secondary key descending.
//! let chain = [("ts", SortKey::from("<num")), ("time", SortKey::from(">num"))];
//! table.sort(&chain).unwrap();
//!
//! let config = FormatConfig::new().float("%.1f");
//! let md = table.format(OutputStyle::Markdown, &config).unwrap();
//! assert!(md.contains("| 3.1 |"));
//! ```
//!
//! ## Sorter Keys
//!
//! | Key     | Ordering              |
//! |---------|-----------------------|
//! | `<num`  | numeric, ascending    |
//! | `>num`  | numeric, descending   |
//! | `<str`  | lexical, ascending    |
//! | `>str`  | lexical, descending   |
//!
//! Custom comparators plug in through [`SortKey::custom`] with the same
//! three-way `(rowA, rowB, columnIndex)` contract the built-ins use.
//!
//! ## Format Strings
//!
//! `[%][-][width][.precision](s|d|f)` — `-` left-aligns, width is a minimum
//! (padding only, never truncation), precision applies to floats with
//! half-away-from-zero rounding, `%d` truncates toward zero. Defaults:
//! header and string `%-s`, integer `%d`, float `%.5f`.
//!
//! ## Scope
//!
//! Everything is synchronous, single-threaded, and in-memory. The table is
//! not thread-safe by design; callers sharing one across threads must
//! serialize access.

pub mod error;
pub mod format;
pub mod sort;
pub mod table;
pub mod value;

pub use error::TableError;
pub use format::{Align, Descriptor, FormatConfig, FormatKind, FormatSet, OutputStyle};
pub use sort::{compare_rows, compile_chain, Chain, ChainEntry, SortKey};
pub use table::Table;
pub use value::{Cell, ValueKind};
