//! Chart specifications: which columns go on which axis, packaged with the
//! data they need. Rendering happens elsewhere (`plotly` for the HTML page,
//! `egui_plot` in the desktop window).

pub mod plotly;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{CellValue, View};
use crate::error::EncodingError;

/// Column name of the frequency axis in bar charts.
pub const COUNT_FIELD: &str = "count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Box,
    Bar,
}

/// Visual encoding of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub x: String,
    pub y: String,
    /// Column whose values pick the mark colour.
    pub color: Option<String>,
    /// Overlay every observation on box plots.
    pub all_points: bool,
    /// Marker opacity, 0.0..=1.0.
    pub opacity: f32,
}

impl Encoding {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Encoding {
            x: x.into(),
            y: y.into(),
            color: None,
            all_points: false,
            opacity: 1.0,
        }
    }

    pub fn color(mut self, column: impl Into<String>) -> Self {
        self.color = Some(column.into());
        self
    }

    pub fn all_points(mut self, all_points: bool) -> Self {
        self.all_points = all_points;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// The data packaged with a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// One entry per row, in view order.
    Series {
        x: Vec<CellValue>,
        y: Vec<CellValue>,
        color: Option<Vec<CellValue>>,
    },
    /// Label → count, in display order.
    Counts(Vec<(String, usize)>),
}

/// A renderer-agnostic figure request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub encoding: Encoding,
    pub data: ChartData,
}

/// Package the encoded columns of `view` into a chart.
///
/// Fails with [`EncodingError::MissingField`] naming the first encoded field
/// the dataset does not have. Bar charts are rejected with
/// [`EncodingError::FrequencyTableRequired`]; use [`build_bar_chart`].
pub fn build_chart(
    view: &View<'_>,
    kind: ChartKind,
    title: &str,
    encoding: Encoding,
) -> Result<ChartSpec, EncodingError> {
    if kind == ChartKind::Bar {
        return Err(EncodingError::FrequencyTableRequired);
    }

    let fields = [Some(&encoding.x), Some(&encoding.y), encoding.color.as_ref()];
    if let Some(missing) = fields.into_iter().flatten().find(|f| !view.has_column(f)) {
        return Err(EncodingError::MissingField(missing.clone()));
    }

    let collect = |col: &str| view.column(col).cloned().collect::<Vec<_>>();
    let data = ChartData::Series {
        x: collect(encoding.x.as_str()),
        y: collect(encoding.y.as_str()),
        color: encoding.color.as_deref().map(collect),
    };

    Ok(ChartSpec {
        kind,
        title: title.to_string(),
        encoding,
        data,
    })
}

/// Bar chart over a frequency table, e.g. `AggregateResult::failure_type_counts`.
///
/// `None` means the counted column does not exist, which is reported as a
/// missing `encoding.x` so the caller can show a placeholder.
pub fn build_bar_chart(
    counts: Option<&[(String, usize)]>,
    title: &str,
    encoding: Encoding,
) -> Result<ChartSpec, EncodingError> {
    let counts = counts.ok_or_else(|| EncodingError::MissingField(encoding.x.clone()))?;
    Ok(ChartSpec {
        kind: ChartKind::Bar,
        title: title.to_string(),
        encoding,
        data: ChartData::Counts(counts.to_vec()),
    })
}

// ---------------------------------------------------------------------------
// Derived geometry shared by the renderers
// ---------------------------------------------------------------------------

/// Points of a scatter chart sharing one colour value.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup {
    /// `Null` when the chart has no colour encoding.
    pub key: CellValue,
    pub points: Vec<[f64; 2]>,
}

/// Five-number summary of one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

/// One box of a box plot: all y values sharing an x value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub key: CellValue,
    /// Sorted ascending.
    pub values: Vec<f64>,
    pub stats: BoxStats,
}

impl ChartSpec {
    /// Numeric (x, y) pairs grouped by colour value. Rows with a non-numeric
    /// coordinate are skipped.
    pub fn point_groups(&self) -> Vec<PointGroup> {
        let ChartData::Series { x, y, color } = &self.data else {
            return Vec::new();
        };
        let mut groups: BTreeMap<CellValue, Vec<[f64; 2]>> = BTreeMap::new();
        for (i, (xv, yv)) in x.iter().zip(y).enumerate() {
            let (Some(xf), Some(yf)) = (xv.as_f64(), yv.as_f64()) else {
                continue;
            };
            let key = color
                .as_ref()
                .and_then(|c| c.get(i).cloned())
                .unwrap_or(CellValue::Null);
            groups.entry(key).or_default().push([xf, yf]);
        }
        groups
            .into_iter()
            .map(|(key, points)| PointGroup { key, points })
            .collect()
    }

    /// Numeric y values grouped by x value, with their box statistics.
    pub fn box_groups(&self) -> Vec<BoxGroup> {
        let ChartData::Series { x, y, .. } = &self.data else {
            return Vec::new();
        };
        let mut groups: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
        for (xv, yv) in x.iter().zip(y) {
            if let Some(yf) = yv.as_f64() {
                groups.entry(xv.clone()).or_default().push(yf);
            }
        }
        groups
            .into_iter()
            .filter_map(|(key, mut values)| {
                values.sort_by(f64::total_cmp);
                let stats = box_stats(&values)?;
                Some(BoxGroup { key, values, stats })
            })
            .collect()
    }
}

/// Linear-interpolated quartiles with Tukey whiskers (1.5 × IQR, clamped to
/// observed values). `sorted` must be ascending; `None` when empty.
pub fn box_stats(sorted: &[f64]) -> Option<BoxStats> {
    if sorted.is_empty() {
        return None;
    }
    let q1 = quantile(sorted, 0.25);
    let median = quantile(sorted, 0.5);
    let q3 = quantile(sorted, 0.75);
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= lo_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= hi_fence)
        .unwrap_or(q3);

    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
    })
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
