//! Static HTML dashboard page.
//!
//! A self-contained document: inline CSS, Plotly.js from its CDN, one
//! `<div>` per chart. A chart that cannot be built is replaced by a short
//! placeholder paragraph so the rest of the page still renders.

use crate::chart::{plotly, ChartSpec};
use crate::data::aggregate::AggregateResult;
use crate::error::EncodingError;
use crate::pipeline::DashboardSnapshot;

pub const PAGE_TITLE: &str = "Predictive Maintenance Dashboard";

/// Render a snapshot as a complete HTML document.
pub fn render_page(snapshot: &DashboardSnapshot) -> String {
    let charts: String = snapshot
        .charts()
        .iter()
        .zip(["scatter", "box", "bar"])
        .map(|(chart, id)| format!("<div class=\"chart\">{}</div>\n", render_chart(chart, id)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{plotly}"></script>
    <style>{css}</style>
</head>
<body>
    <h1>Machine Predictive Maintenance - Dashboard</h1>
    <p>Sensor readings from the predictive maintenance classification dataset.</p>
    {metrics}
    {charts}
    <footer>Served by pdm-dashboard {version}</footer>
</body>
</html>"#,
        title = PAGE_TITLE,
        plotly = plotly::PLOTLY_CDN,
        css = inline_css(),
        metrics = render_metrics(&snapshot.aggregate),
        charts = charts,
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn render_metrics(aggregate: &AggregateResult) -> String {
    let cards: String = aggregate
        .metric_cards()
        .into_iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="metric"><span class="label">{}</span><span class="value">{}</span></div>"#,
                html_escape(label),
                html_escape(&value)
            )
        })
        .collect();
    format!(r#"<section class="metrics">{cards}</section>"#)
}

fn render_chart(chart: &Result<ChartSpec, EncodingError>, div_id: &str) -> String {
    match chart {
        Ok(spec) => plotly::embed(spec, div_id),
        Err(e) => format!(
            r#"<p class="placeholder">No data for this chart: {}</p>"#,
            html_escape(&e.to_string())
        ),
    }
}

fn inline_css() -> &'static str {
    r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #004d80; }
        .metrics { display: flex; gap: 16px; margin: 20px 0; }
        .metric { border: 1px solid #d0d7de; border-radius: 6px; padding: 10px 16px; }
        .metric .label { display: block; color: gray; font-size: 12px; }
        .metric .value { font-size: 22px; font-weight: bold; }
        .chart { margin-bottom: 50px; }
        .placeholder { color: #8a6d3b; font-style: italic; }
        footer { margin-top: 40px; color: gray; font-size: 12px; }
    "#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
