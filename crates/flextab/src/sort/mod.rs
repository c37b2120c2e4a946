//! Multi-key sort engine.
//!
//! Three pieces, composed in order:
//!
//! 1. [`registry`] — the fixed map from sorter keys to built-in comparators.
//! 2. [`compile_chain`] — resolves `(column name, sorter)` pairs into a
//!    [`Chain`] of `(column index, comparator)` entries.
//! 3. [`compare_rows`] — evaluates a compiled chain as a lexicographic
//!    multi-key ordering.
//!
//! [`crate::Table::sort`] drives all three; the pieces are public so callers
//! can compile and run chains against their own row data.

mod chain;
pub mod registry;

pub use chain::{compare_rows, compile_chain, Chain, ChainEntry, RowComparator, SortKey};
