use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Dataset, View};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Filter predicate: which values are accepted per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of accepted values.
/// If a column is absent or its set is empty, it means "no filter" (show all).
pub type FilterSpec = BTreeMap<String, BTreeSet<CellValue>>;

/// Columns a filter constrains that the dataset does not have.
///
/// These constraints are skipped by [`apply`]; the errors exist so callers can
/// report or prune stale selections (e.g. after loading another file).
pub fn stale_columns(dataset: &Dataset, filters: &FilterSpec) -> Vec<FilterError> {
    filters
        .keys()
        .filter(|col| !dataset.has_column(col))
        .map(|col| FilterError::UnknownColumn(col.clone()))
        .collect()
}

/// Return the rows of `view` that pass all active filters, in view order.
///
/// A row passes a column filter when:
/// * The column is not present in `filters` → passes (no constraint)
/// * The filter set for that column is empty → passes (no constraint)
/// * The column is unknown to the dataset → passes (stale selection)
/// * The row's value for that column is in the selected set → passes
pub fn apply<'a>(view: &View<'a>, filters: &FilterSpec) -> View<'a> {
    let dataset = view.dataset();

    let active: Vec<(&String, &BTreeSet<CellValue>)> = filters
        .iter()
        .filter(|(col, selected)| {
            if selected.is_empty() {
                return false;
            }
            if !dataset.has_column(col) {
                log::warn!("{}", FilterError::UnknownColumn((*col).clone()));
                return false;
            }
            // Every known value selected → no effective filter
            match dataset.unique_values.get(*col) {
                Some(all_vals) => !all_vals.is_subset(selected),
                None => true,
            }
        })
        .collect();

    if active.is_empty() {
        return view.clone();
    }

    let indices: Vec<usize> = view
        .indices()
        .iter()
        .copied()
        .filter(|&i| {
            let record = &dataset.records[i];
            active.iter().all(|(col, selected)| match record.get(col.as_str()) {
                Some(val) => selected.contains(val),
                // record doesn't have this column → include only if Null is selected
                None => selected.contains(&CellValue::Null),
            })
        })
        .collect();

    log::debug!("filter kept {} of {} rows", indices.len(), view.len());
    View::from_indices(dataset, indices)
}

/// Filter the whole dataset.
pub fn filter_dataset<'a>(dataset: &'a Dataset, filters: &FilterSpec) -> View<'a> {
    apply(&dataset.view(), filters)
}
