//! Chain compilation and execution.
//!
//! A sort chain is an ordered list of `(column name, sorter)` pairs. The
//! compiler resolves names to column indices and sorter specs to concrete
//! comparators once, up front; the executor then evaluates entries in
//! priority order and short-circuits on the first decisive comparison.

use crate::error::TableError;
use crate::sort::registry::{self, BuiltinComparator};
use crate::value::Cell;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A caller-supplied comparator: three-way comparison of two rows at a
/// column index. Must be side-effect-free with respect to the table.
pub type RowComparator = dyn Fn(&[Cell], &[Cell], usize) -> Ordering;

/// A sorter spec: either a registry key for a built-in comparator, or a
/// custom comparator function.
///
/// The distinction is resolved once during chain compilation; the executor
/// never type-sniffs at comparison time.
pub enum SortKey {
    /// A built-in comparator key (`"<num"`, `">num"`, `"<str"`, `">str"`).
    Builtin(String),
    /// A custom three-way comparator.
    Custom(Box<RowComparator>),
}

impl SortKey {
    /// Wrap a closure as a custom sorter.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[Cell], &[Cell], usize) -> Ordering + 'static,
    {
        SortKey::Custom(Box::new(f))
    }
}

impl From<&str> for SortKey {
    fn from(key: &str) -> Self {
        SortKey::Builtin(key.to_string())
    }
}

impl From<String> for SortKey {
    fn from(key: String) -> Self {
        SortKey::Builtin(key)
    }
}

impl std::fmt::Debug for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Builtin(key) => f.debug_tuple("Builtin").field(key).finish(),
            SortKey::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
        }
    }
}

enum Resolved<'a> {
    Builtin(BuiltinComparator),
    Custom(&'a RowComparator),
}

/// One compiled entry: a column index paired with its comparator.
pub struct ChainEntry<'a> {
    column: usize,
    comparator: Resolved<'a>,
}

impl std::fmt::Debug for ChainEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let comparator = match self.comparator {
            Resolved::Builtin(_) => "Builtin",
            Resolved::Custom(_) => "Custom",
        };
        f.debug_struct("ChainEntry")
            .field("column", &self.column)
            .field("comparator", &comparator)
            .finish()
    }
}

impl ChainEntry<'_> {
    /// The column index this entry compares.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Evaluate this entry's comparator on two rows.
    pub fn compare(&self, a: &[Cell], b: &[Cell]) -> Ordering {
        match &self.comparator {
            Resolved::Builtin(f) => f(a, b, self.column),
            Resolved::Custom(f) => f(a, b, self.column),
        }
    }
}

/// An ordered sequence of compiled entries. The first entry is the primary
/// sort key. Chains are ephemeral: built fresh per sort call, never stored.
pub type Chain<'a> = Vec<ChainEntry<'a>>;

/// Compile a chain spec against a header index.
///
/// Resolves each column name via `index` ([`TableError::UnknownColumn`] if
/// absent) and each sorter spec via the registry
/// ([`TableError::UnknownSorterKey`] for unregistered keys). Entry order is
/// preserved, defining sort priority. Pure: no rows are touched.
pub fn compile_chain<'a, S: AsRef<str>>(
    index: &HashMap<String, usize>,
    spec: &'a [(S, SortKey)],
) -> Result<Chain<'a>, TableError> {
    spec.iter()
        .map(|(name, key)| {
            let name = name.as_ref();
            let column = *index
                .get(name)
                .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
            let comparator = match key {
                SortKey::Builtin(key) => Resolved::Builtin(registry::lookup(key)?),
                SortKey::Custom(f) => Resolved::Custom(f.as_ref()),
            };
            Ok(ChainEntry { column, comparator })
        })
        .collect()
}

/// Compare two rows under a compiled chain.
///
/// Entries are evaluated strictly in order and the first non-equal result
/// wins; later entries are not evaluated once a decision is made. A full tie
/// returns `Equal` — relative order of tied rows is then up to the caller's
/// sort algorithm (the table uses a stable sort, so ties keep their order).
pub fn compare_rows(a: &[Cell], b: &[Cell], chain: &Chain<'_>) -> Ordering {
    for entry in chain {
        let ord = entry.compare(a, b);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(names: &[&str]) -> HashMap<String, usize> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), i))
            .collect()
    }

    #[test]
    fn compile_preserves_priority_order() {
        let idx = index(&["ts", "evname", "time"]);
        let spec = vec![("time", SortKey::from(">num")), ("ts", SortKey::from("<num"))];
        let chain = compile_chain(&idx, &spec).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].column(), 2);
        assert_eq!(chain[1].column(), 0);
    }

    #[test]
    fn compile_unknown_column() {
        let idx = index(&["a"]);
        let spec = vec![("missing", SortKey::from("<num"))];
        let err = compile_chain(&idx, &spec).unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn(name) if name == "missing"));
    }

    #[test]
    fn compile_unknown_sorter_key() {
        let idx = index(&["a"]);
        let spec = vec![("a", SortKey::from("~num"))];
        let err = compile_chain(&idx, &spec).unwrap_err();
        assert!(matches!(err, TableError::UnknownSorterKey(key) if key == "~num"));
    }

    #[test]
    fn primary_key_decides_regardless_of_secondary() {
        let idx = index(&["a", "b"]);
        let spec = vec![("a", SortKey::from("<num")), ("b", SortKey::from("<num"))];
        let chain = compile_chain(&idx, &spec).unwrap();

        let r1 = vec![Cell::Int(1), Cell::Int(99)];
        let r2 = vec![Cell::Int(2), Cell::Int(0)];
        assert_eq!(compare_rows(&r1, &r2, &chain), Ordering::Less);
        assert_eq!(compare_rows(&r2, &r1, &chain), Ordering::Greater);
    }

    #[test]
    fn tie_falls_through_to_secondary() {
        let idx = index(&["a", "b"]);
        let spec = vec![("a", SortKey::from("<num")), ("b", SortKey::from(">num"))];
        let chain = compile_chain(&idx, &spec).unwrap();

        let r1 = vec![Cell::Int(1), Cell::Int(5)];
        let r2 = vec![Cell::Int(1), Cell::Int(7)];
        // a ties, descending b decides: 7 before 5.
        assert_eq!(compare_rows(&r1, &r2, &chain), Ordering::Greater);
    }

    #[test]
    fn full_tie_is_equal() {
        let idx = index(&["a"]);
        let spec = vec![("a", SortKey::from("<str"))];
        let chain = compile_chain(&idx, &spec).unwrap();

        let r = vec![Cell::Str("same".into())];
        assert_eq!(compare_rows(&r, &r.clone(), &chain), Ordering::Equal);
    }

    #[test]
    fn short_circuits_after_decision() {
        use std::cell::Cell as StdCell;
        use std::rc::Rc;

        let calls = Rc::new(StdCell::new(0usize));
        let counter = Rc::clone(&calls);

        let idx = index(&["a", "b"]);
        let spec = vec![
            ("a", SortKey::from("<num")),
            (
                "b",
                SortKey::custom(move |_, _, _| {
                    counter.set(counter.get() + 1);
                    Ordering::Equal
                }),
            ),
        ];
        let chain = compile_chain(&idx, &spec).unwrap();

        let r1 = vec![Cell::Int(1), Cell::Int(0)];
        let r2 = vec![Cell::Int(2), Cell::Int(0)];
        // Primary decides: the custom secondary must not run.
        assert_eq!(compare_rows(&r1, &r2, &chain), Ordering::Less);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn custom_comparator_receives_column_index() {
        let idx = index(&["x", "y"]);
        let spec = vec![(
            "y",
            SortKey::custom(|a: &[Cell], b: &[Cell], i: usize| {
                assert_eq!(i, 1);
                a[i].to_string().cmp(&b[i].to_string())
            }),
        )];
        let chain = compile_chain(&idx, &spec).unwrap();

        let r1 = vec![Cell::Int(0), Cell::Str("a".into())];
        let r2 = vec![Cell::Int(0), Cell::Str("b".into())];
        assert_eq!(compare_rows(&r1, &r2, &chain), Ordering::Less);
    }
}
