use std::collections::BTreeMap;

use super::model::View;

pub const TARGET: &str = "Target";
pub const RPM: &str = "RPM";
pub const TORQUE: &str = "Torque";
pub const FAILURE_TYPE: &str = "FailureType";

/// Summary statistics of one view. Recomputed on every filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub count: usize,
    /// Share of failing records (non-zero `Target`) in percent, 0..=100.
    pub failure_rate_pct: f64,
    /// `None` when the column is absent or has no numeric value.
    pub mean_rpm: Option<f64>,
    pub mean_torque: Option<f64>,
    /// Failure label → occurrences, most frequent first.
    /// `None` when the dataset has no `FailureType` column.
    pub failure_type_counts: Option<Vec<(String, usize)>>,
}

/// Compute the summary of a view.
pub fn aggregate(view: &View<'_>) -> AggregateResult {
    AggregateResult {
        count: view.len(),
        failure_rate_pct: failure_rate_pct(view),
        mean_rpm: column_mean(view, RPM),
        mean_torque: column_mean(view, TORQUE),
        failure_type_counts: value_counts(view, FAILURE_TYPE),
    }
}

fn failure_rate_pct(view: &View<'_>) -> f64 {
    if !view.has_column(TARGET) {
        return 0.0;
    }
    let (failures, labelled) = view
        .column(TARGET)
        .filter_map(|v| v.as_f64())
        .filter(|x| !x.is_nan())
        .fold((0usize, 0usize), |(failures, n), label| {
            (failures + usize::from(label != 0.0), n + 1)
        });
    if labelled == 0 {
        0.0
    } else {
        failures as f64 / labelled as f64 * 100.0
    }
}

/// Arithmetic mean over the numeric cells of `column`.
pub fn column_mean(view: &View<'_>, column: &str) -> Option<f64> {
    if !view.has_column(column) {
        return None;
    }
    let (sum, n) = view
        .column(column)
        .filter_map(|v| v.as_f64())
        .filter(|x| !x.is_nan())
        .fold((0.0, 0usize), |(sum, n), x| (sum + x, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Occurrences of each non-null value of `column`, most frequent first
/// (ties broken by label).
pub fn value_counts(view: &View<'_>, column: &str) -> Option<Vec<(String, usize)>> {
    if !view.has_column(column) {
        return None;
    }
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in view.column(column).filter(|v| !v.is_null()) {
        *counts.entry(value.to_string()).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Some(counts)
}

// ---------------------------------------------------------------------------
// Metric formatting for the dashboards
// ---------------------------------------------------------------------------

/// `10000` → `"10,000"`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl AggregateResult {
    /// Display cards `(label, value)` in page order. Absent means are skipped.
    pub fn metric_cards(&self) -> Vec<(&'static str, String)> {
        let mut cards = vec![
            ("Records", format_count(self.count)),
            ("Failure rate", format!("{:.2}%", self.failure_rate_pct)),
        ];
        if let Some(rpm) = self.mean_rpm {
            cards.push(("Mean RPM", format!("{rpm:.0}")));
        }
        if let Some(torque) = self.mean_torque {
            cards.push(("Mean torque", format!("{torque:.2} Nm")));
        }
        cards
    }
}
