//! One dashboard render: filter → (sample) → aggregate → chart specs.
//!
//! Both dashboards run this on every request or filter change; they differ
//! only in their [`RenderOptions`].

use crate::chart::{self, build_bar_chart, build_chart, ChartKind, ChartSpec, Encoding};
use crate::config::DashboardConfig;
use crate::data::aggregate::{aggregate, AggregateResult, FAILURE_TYPE, RPM, TARGET, TORQUE};
use crate::data::filter::{filter_dataset, FilterSpec};
use crate::data::model::Dataset;
use crate::data::sample::sample;
use crate::error::EncodingError;

pub const TOOL_WEAR: &str = "ToolWear";

pub const SCATTER_TITLE: &str = "RPM vs Torque (color = Target)";
pub const BOX_TITLE: &str = "Tool wear by machine state (Target)";
pub const BAR_TITLE: &str = "Failure type frequency";

/// Where the two dashboards differ.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Cap on scatter points; `None` plots every filtered row.
    pub sample_size: Option<usize>,
    pub seed: u64,
    pub scatter_opacity: f32,
    pub box_all_points: bool,
    /// One colour per failure label in the bar chart.
    pub bar_colored: bool,
    /// Leading rows of the filtered view listed in the preview table.
    pub preview_rows: usize,
}

impl RenderOptions {
    /// Profile of the static HTML page.
    pub fn static_page(config: &DashboardConfig) -> Self {
        Self {
            sample_size: Some(config.sample_size),
            seed: config.sample_seed,
            scatter_opacity: 0.6,
            box_all_points: true,
            bar_colored: true,
            preview_rows: 0,
        }
    }

    /// Profile of the desktop window.
    pub fn interactive(config: &DashboardConfig) -> Self {
        Self {
            sample_size: None,
            seed: config.sample_seed,
            scatter_opacity: 1.0,
            box_all_points: true,
            bar_colored: false,
            preview_rows: config.preview_rows,
        }
    }
}

/// Everything a dashboard needs to draw one frame/page.
///
/// Each chart fails independently; an `Err` is shown as a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub aggregate: AggregateResult,
    pub scatter: Result<ChartSpec, EncodingError>,
    pub box_plot: Result<ChartSpec, EncodingError>,
    pub bar: Result<ChartSpec, EncodingError>,
    /// Dataset row indices of the preview table.
    pub preview: Vec<usize>,
}

impl DashboardSnapshot {
    pub fn charts(&self) -> [&Result<ChartSpec, EncodingError>; 3] {
        [&self.scatter, &self.box_plot, &self.bar]
    }
}

/// Run the pipeline once over the shared dataset.
pub fn run(dataset: &Dataset, filters: &FilterSpec, options: &RenderOptions) -> DashboardSnapshot {
    let view = filter_dataset(dataset, filters);
    let aggregate = aggregate(&view);

    let scatter_view = match options.sample_size {
        Some(n) => sample(&view, n, options.seed),
        None => view.clone(),
    };

    let scatter = build_chart(
        &scatter_view,
        ChartKind::Scatter,
        SCATTER_TITLE,
        Encoding::new(RPM, TORQUE)
            .color(TARGET)
            .opacity(options.scatter_opacity),
    );

    let box_plot = build_chart(
        &view,
        ChartKind::Box,
        BOX_TITLE,
        Encoding::new(TARGET, TOOL_WEAR).all_points(options.box_all_points),
    );

    let mut bar_encoding = Encoding::new(FAILURE_TYPE, chart::COUNT_FIELD);
    if options.bar_colored {
        bar_encoding = bar_encoding.color(FAILURE_TYPE);
    }
    let bar = build_bar_chart(aggregate.failure_type_counts.as_deref(), BAR_TITLE, bar_encoding);

    for (name, result) in [("scatter", &scatter), ("box", &box_plot), ("bar", &bar)] {
        if let Err(e) = result {
            log::warn!("{name} chart unavailable: {e}");
        }
    }

    DashboardSnapshot {
        preview: view.head(options.preview_rows).into_indices(),
        aggregate,
        scatter,
        box_plot,
        bar,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::chart::ChartData;
    use crate::data::loader::load_reader;
    use crate::data::model::CellValue;

    fn fleet(n: usize) -> Dataset {
        let mut csv = String::from(
            "Type,Rotational speed [rpm],Torque [Nm],Tool wear [min],Target,Failure Type\n",
        );
        for i in 0..n {
            let kind = ["L", "M", "H"][i % 3];
            let target = usize::from(i % 10 == 0);
            let failure = if target == 1 { "Power Failure" } else { "No Failure" };
            csv.push_str(&format!(
                "{kind},{},{}.5,{},{target},{failure}\n",
                1300 + i,
                30 + i % 20,
                i % 240
            ));
        }
        load_reader(csv.as_bytes()).unwrap()
    }

    fn series_len(chart: &Result<ChartSpec, EncodingError>) -> usize {
        match &chart.as_ref().unwrap().data {
            ChartData::Series { x, .. } => x.len(),
            ChartData::Counts(c) => c.len(),
        }
    }

    #[test]
    fn static_page_samples_only_the_scatter() {
        let ds = fleet(5000);
        let options = RenderOptions::static_page(&DashboardConfig::default());
        let snap = run(&ds, &FilterSpec::new(), &options);
        assert_eq!(snap.aggregate.count, 5000);
        assert_eq!(series_len(&snap.scatter), 3000);
        assert_eq!(series_len(&snap.box_plot), 5000);
        assert!(snap.preview.is_empty());
        assert_eq!(snap.scatter.as_ref().unwrap().encoding.opacity, 0.6);
    }

    #[test]
    fn interactive_uses_every_filtered_row() {
        let ds = fleet(300);
        let filters: FilterSpec =
            [("Type".to_string(), BTreeSet::from([CellValue::from("L")]))].into();
        let snap = run(&ds, &filters, &RenderOptions::interactive(&DashboardConfig::default()));
        assert_eq!(snap.aggregate.count, 100);
        assert_eq!(series_len(&snap.scatter), 100);
        assert_eq!(snap.preview.len(), 50);
        assert!(snap.preview.iter().all(|&i| i % 3 == 0));
    }

    #[test]
    fn same_request_same_page() {
        let ds = fleet(4000);
        let options = RenderOptions::static_page(&DashboardConfig::default());
        let a = run(&ds, &FilterSpec::new(), &options);
        let b = run(&ds, &FilterSpec::new(), &options);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_failure_type_only_breaks_the_bar_chart() {
        let csv = "\
Type,Rotational speed [rpm],Torque [Nm],Tool wear [min],Target
L,1500,40.0,10,0
";
        let ds = load_reader(csv.as_bytes()).unwrap();
        let options = RenderOptions::interactive(&DashboardConfig::default());
        let snap = run(&ds, &FilterSpec::new(), &options);
        assert_eq!(snap.aggregate.failure_type_counts, None);
        assert_eq!(
            snap.bar,
            Err(EncodingError::MissingField("FailureType".into()))
        );
        assert!(snap.scatter.is_ok());
        assert!(snap.box_plot.is_ok());
    }

    #[test]
    fn missing_tool_wear_only_breaks_the_box_plot() {
        let csv = "\
Rotational speed [rpm],Torque [Nm],Target,Failure Type
1500,40.0,0,No Failure
";
        let ds = load_reader(csv.as_bytes()).unwrap();
        let options = RenderOptions::static_page(&DashboardConfig::default());
        let snap = run(&ds, &FilterSpec::new(), &options);
        assert_eq!(
            snap.box_plot,
            Err(EncodingError::MissingField("ToolWear".into()))
        );
        assert!(snap.scatter.is_ok());
        assert!(snap.bar.is_ok());
    }
}
