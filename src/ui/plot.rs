use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use pdm_dashboard::chart::{ChartData, ChartSpec};
use pdm_dashboard::color::ColorMap;
use pdm_dashboard::error::EncodingError;

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// RPM against Torque, one point series per colour value.
pub fn scatter_plot(ui: &mut Ui, chart: &Result<ChartSpec, EncodingError>, colors: &ColorMap) {
    let Some(spec) = chart_or_placeholder(ui, chart) else {
        return;
    };
    let opacity = spec.encoding.opacity;

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.encoding.x.as_str())
        .y_axis_label(spec.encoding.y.as_str())
        .show(ui, |plot_ui| {
            for group in spec.point_groups() {
                let name = if group.key.is_null() {
                    spec.encoding.y.clone()
                } else {
                    group.key.to_string()
                };
                let color = colors.color_for(&group.key).gamma_multiply(opacity);
                plot_ui.points(
                    Points::new(PlotPoints::from(group.points))
                        .name(name)
                        .color(color)
                        .radius(2.0),
                );
            }
        });
}

/// One box per x value, optionally with every observation overlaid.
pub fn box_plot(ui: &mut Ui, chart: &Result<ChartSpec, EncodingError>) {
    let Some(spec) = chart_or_placeholder(ui, chart) else {
        return;
    };
    let groups = spec.box_groups();

    Plot::new("box_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.encoding.x.as_str())
        .y_axis_label(spec.encoding.y.as_str())
        .show(ui, |plot_ui| {
            for (i, group) in groups.iter().enumerate() {
                let position = group.key.as_f64().unwrap_or(i as f64);
                let label = format!("{} = {}", spec.encoding.x, group.key);
                let s = group.stats;

                let elem = BoxElem::new(
                    position,
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                )
                .name(&label)
                .box_width(0.5);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&label));

                if spec.encoding.all_points {
                    let points: PlotPoints = group.values.iter().map(|&v| [position, v]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&label)
                            .color(Color32::GRAY.gamma_multiply(0.5))
                            .radius(1.5),
                    );
                }
            }
        });
}

/// Frequency of each failure label.
pub fn bar_chart(ui: &mut Ui, chart: &Result<ChartSpec, EncodingError>) {
    let Some(spec) = chart_or_placeholder(ui, chart) else {
        return;
    };
    let ChartData::Counts(counts) = &spec.data else {
        return;
    };

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, n))| Bar::new(i as f64, *n as f64).name(label).width(0.6))
        .collect();

    Plot::new("bar_chart")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.encoding.x.as_str())
        .y_axis_label(spec.encoding.y.as_str())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(spec.encoding.x.as_str()));
        });
}

/// Title of a chart, or a placeholder message when it could not be built.
fn chart_or_placeholder<'a>(
    ui: &mut Ui,
    chart: &'a Result<ChartSpec, EncodingError>,
) -> Option<&'a ChartSpec> {
    match chart {
        Ok(spec) => {
            ui.strong(spec.title.as_str());
            Some(spec)
        }
        Err(e) => {
            ui.label(RichText::new(format!("No data for this chart: {e}")).italics().weak());
            None
        }
    }
}
