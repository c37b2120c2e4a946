//! Built-in comparator registry.
//!
//! A fixed, process-wide map from short sorter keys to three-way comparators
//! over two rows at a column index. The map is built once behind a
//! [`Lazy`] and never mutated, so it is safe to share across all tables.

use crate::error::TableError;
use crate::value::Cell;
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Signature shared by all built-in comparators: three-way comparison of two
/// rows at a column index.
pub type BuiltinComparator = fn(&[Cell], &[Cell], usize) -> Ordering;

/// Key for the ascending numeric comparator.
pub const ASC_NUM: &str = "<num";
/// Key for the descending numeric comparator.
pub const DESC_NUM: &str = ">num";
/// Key for the ascending string comparator.
pub const ASC_STR: &str = "<str";
/// Key for the descending string comparator.
pub const DESC_STR: &str = ">str";

static REGISTRY: Lazy<HashMap<&'static str, BuiltinComparator>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, BuiltinComparator> = HashMap::new();
    map.insert(ASC_NUM, asc_num);
    map.insert(DESC_NUM, desc_num);
    map.insert(ASC_STR, asc_str);
    map.insert(DESC_STR, desc_str);
    map
});

/// Look up a built-in comparator by key.
///
/// Fails with [`TableError::UnknownSorterKey`] for anything outside the
/// fixed set of built-ins.
pub fn lookup(key: &str) -> Result<BuiltinComparator, TableError> {
    REGISTRY
        .get(key)
        .copied()
        .ok_or_else(|| TableError::UnknownSorterKey(key.to_string()))
}

/// The registered sorter keys, for diagnostics.
pub fn keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = REGISTRY.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Ascending numeric comparison.
///
/// Cells that do not coerce to a number (strings, booleans, nulls, and any
/// NaN pairing) compare as equal rather than erroring.
fn asc_num(a: &[Cell], b: &[Cell], i: usize) -> Ordering {
    match (a[i].as_f64(), b[i].as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn desc_num(a: &[Cell], b: &[Cell], i: usize) -> Ordering {
    asc_num(a, b, i).reverse()
}

/// Ascending lexical comparison over the cells' text forms
/// (Unicode scalar order, Rust's default `str` ordering).
fn asc_str(a: &[Cell], b: &[Cell], i: usize) -> Ordering {
    match (&a[i], &b[i]) {
        (Cell::Str(x), Cell::Str(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}

fn desc_str(a: &[Cell], b: &[Cell], i: usize) -> Ordering {
    asc_str(a, b, i).reverse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: Vec<Cell>) -> Vec<Cell> {
        cells
    }

    #[test]
    fn lookup_known_keys() {
        for key in [ASC_NUM, DESC_NUM, ASC_STR, DESC_STR] {
            assert!(lookup(key).is_ok(), "missing builtin '{}'", key);
        }
    }

    #[test]
    fn lookup_unknown_key_fails() {
        let err = lookup("<bogus").unwrap_err();
        assert!(matches!(err, TableError::UnknownSorterKey(k) if k == "<bogus"));
    }

    #[test]
    fn numeric_ascending() {
        let a = row(vec![Cell::Int(1)]);
        let b = row(vec![Cell::Float(2.5)]);
        assert_eq!(asc_num(&a, &b, 0), Ordering::Less);
        assert_eq!(asc_num(&b, &a, 0), Ordering::Greater);
        assert_eq!(asc_num(&a, &a, 0), Ordering::Equal);
    }

    #[test]
    fn numeric_descending_is_negation() {
        let a = row(vec![Cell::Int(1)]);
        let b = row(vec![Cell::Int(2)]);
        assert_eq!(desc_num(&a, &b, 0), Ordering::Greater);
        assert_eq!(desc_num(&b, &a, 0), Ordering::Less);
    }

    #[test]
    fn nan_and_non_numeric_compare_equal() {
        let nan = row(vec![Cell::Float(f64::NAN)]);
        let num = row(vec![Cell::Int(1)]);
        let text = row(vec![Cell::Str("9".into())]);
        assert_eq!(asc_num(&nan, &nan, 0), Ordering::Equal);
        assert_eq!(asc_num(&nan, &num, 0), Ordering::Equal);
        assert_eq!(asc_num(&text, &num, 0), Ordering::Equal);
    }

    #[test]
    fn string_ordering() {
        let a = row(vec![Cell::Str("apple".into())]);
        let b = row(vec![Cell::Str("banana".into())]);
        assert_eq!(asc_str(&a, &b, 0), Ordering::Less);
        assert_eq!(desc_str(&a, &b, 0), Ordering::Greater);
        assert_eq!(asc_str(&a, &a, 0), Ordering::Equal);
    }

    #[test]
    fn string_ordering_coerces_non_strings() {
        // 10 vs "9": lexical, so "10" < "9".
        let a = row(vec![Cell::Int(10)]);
        let b = row(vec![Cell::Str("9".into())]);
        assert_eq!(asc_str(&a, &b, 0), Ordering::Less);
    }

    #[test]
    fn registry_keys_are_fixed() {
        assert_eq!(keys(), vec![ASC_NUM, ASC_STR, DESC_NUM, DESC_STR]);
    }
}
