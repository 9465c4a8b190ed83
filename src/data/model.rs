use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the sensor table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred from the CSV text.
/// Used in `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for numeric aggregation and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

static NULL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// Record – one row of the CSV
// ---------------------------------------------------------------------------

/// A single sensor reading (one row of the source CSV).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Column name (after renaming) → value.
    pub cells: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
///
/// Immutable once built; every filtered or sampled subset is a [`View`].
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows), in file order.
    pub records: Vec<Record>,
    /// Column names in header order.
    pub columns: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build column indices from the loaded records.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = columns
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        for rec in &records {
            for (col, set) in unique_values.iter_mut() {
                set.insert(rec.get(col).cloned().unwrap_or(CellValue::Null));
            }
        }

        Dataset {
            records,
            columns,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// A view over every record.
    pub fn view(&self) -> View<'_> {
        View {
            dataset: self,
            indices: (0..self.records.len()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// View – a read-only subset of a Dataset
// ---------------------------------------------------------------------------

/// Ordered row indices into a borrowed [`Dataset`].
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> View<'a> {
    /// Build a view from indices. Out-of-range indices are dropped.
    pub fn from_indices(dataset: &'a Dataset, mut indices: Vec<usize>) -> Self {
        indices.retain(|&i| i < dataset.records.len());
        View { dataset, indices }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.dataset.has_column(column)
    }

    /// Records in view order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Cells of one column in view order; a record without the cell yields `Null`.
    pub fn column<'b>(&'b self, column: &'b str) -> impl Iterator<Item = &'a CellValue> + 'b {
        self.records()
            .map(move |r| r.get(column).unwrap_or(&NULL))
    }

    /// The first `n` rows of the view.
    pub fn head(&self, n: usize) -> View<'a> {
        View {
            dataset: self.dataset,
            indices: self.indices.iter().copied().take(n).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["Type".into(), "RPM".into()],
            vec![
                Record::from_iter([("Type", CellValue::from("L")), ("RPM", 1500i64.into())]),
                Record::from_iter([("Type", CellValue::from("M"))]),
                Record::from_iter([("Type", CellValue::from("L")), ("RPM", 1700i64.into())]),
            ],
        )
    }

    #[test]
    fn unique_values_are_collected_per_column() {
        let ds = dataset();
        let types: Vec<_> = ds.unique_values["Type"].iter().cloned().collect();
        assert_eq!(types, vec![CellValue::from("L"), CellValue::from("M")]);
        // the record without an RPM cell contributes Null
        assert_eq!(ds.unique_values["RPM"].len(), 3);
    }

    #[test]
    fn missing_cells_read_as_null() {
        let ds = dataset();
        let view = ds.view();
        let rpm: Vec<_> = view.column("RPM").cloned().collect();
        assert_eq!(
            rpm,
            vec![CellValue::Integer(1500), CellValue::Null, CellValue::Integer(1700)]
        );
    }

    #[test]
    fn head_is_capped_at_view_length() {
        let ds = dataset();
        assert_eq!(ds.view().head(2).indices(), &[0, 1]);
        assert_eq!(ds.view().head(10).len(), 3);
    }

    #[test]
    fn values_of_different_kinds_order_by_kind_first() {
        assert!(CellValue::Null < CellValue::Integer(-5));
        assert!(CellValue::Integer(9) < CellValue::Float(0.0));
        assert!(CellValue::Float(1e9) < CellValue::from("a"));
    }
}
