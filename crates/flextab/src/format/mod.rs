//! Format engine: printf-style spec parsing and table rendering.
//!
//! [`spec`] parses a [`FormatConfig`] of printf-style strings into a
//! [`FormatSet`] of structured descriptors; [`render`] walks a table and
//! emits Markdown or CSV. All parsing happens before any row is rendered,
//! so a render call either fully succeeds or fully fails.

mod render;
mod spec;

pub use render::{format_cell, render, OutputStyle};
pub use spec::{Align, Descriptor, FormatConfig, FormatKind, FormatSet};
