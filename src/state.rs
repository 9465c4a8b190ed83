use std::collections::BTreeSet;

use pdm_dashboard::color::ColorMap;
use pdm_dashboard::data::aggregate::{FAILURE_TYPE, TARGET};
use pdm_dashboard::data::filter::{stale_columns, FilterSpec};
use pdm_dashboard::data::model::{CellValue, Dataset};
use pdm_dashboard::pipeline::{self, DashboardSnapshot, RenderOptions};

/// Columns offered as multi-select filters, in panel order.
pub const FILTER_COLUMNS: [&str; 3] = ["Type", FAILURE_TYPE, TARGET];

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset. Replaced wholesale by File → Open, never edited.
    pub dataset: Dataset,

    /// Per-column filter selections (empty set = everything).
    pub filters: FilterSpec,

    /// Interactive rendering profile.
    pub options: RenderOptions,

    /// Metrics, charts and preview of the current filters (cached).
    pub snapshot: DashboardSnapshot,

    /// Colours of the `Target` values in the scatter plot.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, options: RenderOptions) -> Self {
        let filters = FilterSpec::new();
        let snapshot = pipeline::run(&dataset, &filters, &options);
        let color_map = target_colors(&dataset);
        Self {
            dataset,
            filters,
            options,
            snapshot,
            color_map,
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset, keeping selections that still apply.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let stale = stale_columns(&dataset, &self.filters);
        for err in &stale {
            log::warn!("{err}; dropping selection");
        }
        self.filters.retain(|col, _| dataset.has_column(col));

        self.color_map = target_colors(&dataset);
        self.dataset = dataset;
        self.status_message = (!stale.is_empty()).then(|| {
            let names: Vec<String> = stale.iter().map(|e| e.to_string()).collect();
            names.join("; ")
        });
        self.refilter();
    }

    /// Recompute the snapshot after a filter change.
    pub fn refilter(&mut self) {
        self.snapshot = pipeline::run(&self.dataset, &self.filters, &self.options);
    }

    /// Filter columns present in the dataset.
    pub fn filter_columns(&self) -> Vec<&'static str> {
        FILTER_COLUMNS
            .into_iter()
            .filter(|c| self.dataset.has_column(c))
            .collect()
    }

    /// Selectable values of a filter column (nulls are not offered).
    pub fn filter_options(&self, column: &str) -> Vec<CellValue> {
        self.dataset
            .unique_values
            .get(column)
            .map(|vals| vals.iter().filter(|v| !v.is_null()).cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_selected(&self, column: &str, value: &CellValue) -> bool {
        self.filters
            .get(column)
            .is_some_and(|selected| selected.contains(value))
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Drop every selection of a column (show all).
    pub fn clear_filter(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.refilter();
    }
}

fn target_colors(dataset: &Dataset) -> ColorMap {
    ColorMap::new(
        dataset
            .unique_values
            .get(TARGET)
            .into_iter()
            .flatten()
            .filter(|v| !v.is_null()),
    )
}
