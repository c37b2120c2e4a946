//! The table data structure: headers, rows, and the derived header index.
//!
//! A [`Table`] is an ordered sequence of unique column names paired with an
//! ordered sequence of equal-length rows. The header index (name → column
//! position) is recomputed whenever headers change and is always consistent
//! with `headers`. Every mutation entry point enforces the row-length
//! invariant eagerly, so rows never reach the sort or format engines
//! malformed.

use crate::error::TableError;
use crate::format::{self, FormatConfig, FormatSet, OutputStyle};
use crate::sort::{compare_rows, compile_chain, SortKey};
use crate::value::Cell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An in-memory table with named columns and dynamically typed cells.
///
/// # Example
///
/// ```rust
/// use flextab::{Cell, FormatConfig, OutputStyle, Table};
///
/// let mut table = Table::with_rows(
///     ["col1", "col2"],
///     vec![
///         vec![Cell::Int(2), Cell::from("b")],
///         vec![Cell::Int(1), Cell::from("a")],
///     ],
/// )
/// .unwrap();
///
/// table.sort_by_key("col1", "<num".into()).unwrap();
/// assert_eq!(table.values()[0][0], Cell::Int(1));
///
/// let md = table
///     .format(OutputStyle::Markdown, &FormatConfig::default())
///     .unwrap();
/// assert!(md.starts_with("| col1 | col2 |"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableSkel", into = "TableSkel")]
pub struct Table {
    headers: Vec<String>,
    values: Vec<Vec<Cell>>,
    index: HashMap<String, usize>,
}

/// Serialized shape of a table: just headers and values. The header index
/// is derived, so it is rebuilt (and row lengths validated) on the way in.
#[derive(Serialize, Deserialize)]
struct TableSkel {
    headers: Vec<String>,
    values: Vec<Vec<Cell>>,
}

impl TryFrom<TableSkel> for Table {
    type Error = TableError;

    fn try_from(skel: TableSkel) -> Result<Self, Self::Error> {
        Table::with_rows(skel.headers, skel.values)
    }
}

impl From<Table> for TableSkel {
    fn from(table: Table) -> Self {
        TableSkel {
            headers: table.headers,
            values: table.values,
        }
    }
}

impl Table {
    /// Create an empty table with the given headers.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(headers: I) -> Self {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut table = Table {
            headers,
            values: Vec::new(),
            index: HashMap::new(),
        };
        table.rebuild_index();
        table
    }

    /// Create a table with headers and initial rows.
    ///
    /// Every row must match the header count; fails with
    /// [`TableError::RowLengthMismatch`] naming the offending row position.
    pub fn with_rows<S: Into<String>, I: IntoIterator<Item = S>>(
        headers: I,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, TableError> {
        let mut table = Table::new(headers);
        table.append_rows(rows)?;
        Ok(table)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
    }

    fn check_row(&self, row: &[Cell], position: usize) -> Result<(), TableError> {
        if row.len() != self.headers.len() {
            return Err(TableError::RowLengthMismatch {
                row: position,
                len: row.len(),
                expected: self.headers.len(),
            });
        }
        Ok(())
    }

    fn check_row_index(&self, index: usize) -> Result<(), TableError> {
        if index >= self.values.len() {
            return Err(TableError::RowIndexOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        Ok(())
    }

    // --- accessors ---

    /// The ordered column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The rows, in order.
    pub fn values(&self) -> &[Vec<Cell>] {
        &self.values
    }

    /// The derived header index (name → column position).
    pub fn header_index(&self) -> &HashMap<String, usize> {
        &self.index
    }

    /// Column position of a header name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.values.len()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell at a row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.values.get(row)?.get(col)
    }

    /// Mutable cell at a row position and column name.
    pub fn get_mut(&mut self, row: usize, column: &str) -> Option<&mut Cell> {
        let col = self.column_index(column)?;
        self.values.get_mut(row)?.get_mut(col)
    }

    // --- row mutation ---

    /// Append a row.
    pub fn append_row(&mut self, row: Vec<Cell>) -> Result<&mut Self, TableError> {
        self.check_row(&row, self.values.len())?;
        self.values.push(row);
        Ok(self)
    }

    /// Append several rows. Validation happens row by row; rows before the
    /// first invalid one are kept.
    pub fn append_rows(&mut self, rows: Vec<Vec<Cell>>) -> Result<&mut Self, TableError> {
        for (i, row) in rows.into_iter().enumerate() {
            self.check_row(&row, i)?;
            self.values.push(row);
        }
        Ok(self)
    }

    /// Insert a row before position `index` (`index == num_rows` appends).
    pub fn insert_row(&mut self, index: usize, row: Vec<Cell>) -> Result<&mut Self, TableError> {
        if index > self.values.len() {
            return Err(TableError::RowIndexOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        self.check_row(&row, index)?;
        self.values.insert(index, row);
        Ok(self)
    }

    /// Replace the row at `index`.
    pub fn replace_row(&mut self, index: usize, row: Vec<Cell>) -> Result<&mut Self, TableError> {
        self.check_row_index(index)?;
        self.check_row(&row, index)?;
        self.values[index] = row;
        Ok(self)
    }

    /// Remove and return the row at `index`.
    pub fn remove_row(&mut self, index: usize) -> Result<Vec<Cell>, TableError> {
        self.check_row_index(index)?;
        Ok(self.values.remove(index))
    }

    /// Keep only the rows for which the predicate returns true. The
    /// predicate receives each row and its current position.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> &mut Self
    where
        F: FnMut(&[Cell], usize) -> bool,
    {
        let mut i = 0;
        self.values.retain(|row| {
            let kept = keep(row, i);
            i += 1;
            kept
        });
        self
    }

    /// Apply a function to every row in place. The slice length is fixed,
    /// so the row-length invariant cannot be broken.
    pub fn update_rows<F>(&mut self, mut update: F) -> &mut Self
    where
        F: FnMut(&mut [Cell], usize),
    {
        for (i, row) in self.values.iter_mut().enumerate() {
            update(row, i);
        }
        self
    }

    // --- column mutation ---

    /// Set a column's values: replaces the cells of an existing column, or
    /// appends a new column.
    ///
    /// `values` must cover every row ([`TableError::ColumnLengthMismatch`]
    /// otherwise). As a special case, adding the first column of an empty
    /// table seeds one single-cell row per value.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Cell>,
    ) -> Result<&mut Self, TableError> {
        let name = name.into();
        match self.index.get(&name).copied() {
            Some(pos) => {
                if values.len() != self.values.len() {
                    return Err(TableError::ColumnLengthMismatch {
                        len: values.len(),
                        expected: self.values.len(),
                    });
                }
                for (row, value) in self.values.iter_mut().zip(values) {
                    row[pos] = value;
                }
            }
            None => {
                if self.headers.is_empty() {
                    self.headers.push(name);
                    self.values = values.into_iter().map(|v| vec![v]).collect();
                } else {
                    if values.len() != self.values.len() {
                        return Err(TableError::ColumnLengthMismatch {
                            len: values.len(),
                            expected: self.values.len(),
                        });
                    }
                    self.headers.push(name);
                    for (row, value) in self.values.iter_mut().zip(values) {
                        row.push(value);
                    }
                }
                self.rebuild_index();
            }
        }
        Ok(self)
    }

    /// Remove a column and its cells from every row.
    pub fn remove_column(&mut self, name: &str) -> Result<&mut Self, TableError> {
        let pos = self
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        self.headers.remove(pos);
        for row in &mut self.values {
            row.remove(pos);
        }
        // A table with no columns has no rows either.
        if self.headers.is_empty() {
            self.values.clear();
        }
        self.rebuild_index();
        Ok(self)
    }

    /// Rewrite an existing column cell by cell. The function receives each
    /// cell and its row position; returning `None` leaves the cell unchanged.
    pub fn map_column<F>(&mut self, name: &str, mut map: F) -> Result<&mut Self, TableError>
    where
        F: FnMut(&Cell, usize) -> Option<Cell>,
    {
        let pos = self
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        for (i, row) in self.values.iter_mut().enumerate() {
            if let Some(value) = map(&row[pos], i) {
                row[pos] = value;
            }
        }
        Ok(self)
    }

    // --- sort engine ---

    /// Sort rows in place by a multi-key chain.
    ///
    /// Each pair names a column and a sorter: a built-in registry key or a
    /// custom comparator (see [`SortKey`]). The chain is compiled before any
    /// reordering, so on [`TableError::UnknownColumn`] or
    /// [`TableError::UnknownSorterKey`] the table is left untouched.
    ///
    /// The underlying sort is stable: rows tied across the whole chain keep
    /// their relative order, making output deterministic.
    ///
    /// ```rust
    /// use flextab::{Cell, SortKey, Table};
    ///
    /// let mut table = Table::with_rows(
    ///     ["ts", "time"],
    ///     vec![
    ///         vec![Cell::Int(124), Cell::Float(2.5)],
    ///         vec![Cell::Int(123), Cell::Float(3.1)],
    ///         vec![Cell::Int(123), Cell::Float(0.0)],
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// let chain = [("ts", SortKey::from("<num")), ("time", SortKey::from(">num"))];
    /// table.sort(&chain).unwrap();
    /// assert_eq!(table.values()[0], vec![Cell::Int(123), Cell::Float(3.1)]);
    /// ```
    pub fn sort<S: AsRef<str>>(&mut self, chain: &[(S, SortKey)]) -> Result<&mut Self, TableError> {
        let compiled = compile_chain(&self.index, chain)?;
        self.values.sort_by(|a, b| compare_rows(a, b, &compiled));
        // Sorting never changes column identity; the index is rebuilt for
        // parity with the other mutation paths.
        self.rebuild_index();
        Ok(self)
    }

    /// Sort by a single column (one-element chain).
    pub fn sort_by_key(&mut self, column: &str, key: SortKey) -> Result<&mut Self, TableError> {
        let chain = [(column, key)];
        self.sort(&chain)
    }

    // --- format engine ---

    /// Render the table as text in the requested style.
    ///
    /// Pure: headers, values, and the header index are left untouched. The
    /// whole format configuration is parsed before any cell is rendered, so
    /// the call either fully succeeds or fails with
    /// [`TableError::InvalidFormatSpec`] and produces no partial output.
    pub fn format(&self, style: OutputStyle, config: &FormatConfig) -> Result<String, TableError> {
        let set = FormatSet::parse(config)?;
        format::render(self, style, &set)
    }

    /// Render as a Markdown table with default formats.
    pub fn to_markdown(&self) -> Result<String, TableError> {
        self.format(OutputStyle::Markdown, &FormatConfig::default())
    }

    /// Render as CSV with default formats.
    pub fn to_csv(&self) -> Result<String, TableError> {
        self.format(OutputStyle::Csv, &FormatConfig::default())
    }
}
