//! Plotly.js figures for the static HTML page.
//!
//! A [`ChartSpec`] becomes `{"data": [...traces], "layout": {...}}` and is
//! embedded as a `<div>` plus a `Plotly.newPlot` call.

use serde_json::{json, Value as JsonValue};

use super::{ChartData, ChartKind, ChartSpec};
use crate::color::{hex, ColorMap};
use crate::data::model::CellValue;

/// Plotly.js bundle loaded by the page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Build the Plotly figure for a chart.
pub fn figure(spec: &ChartSpec) -> JsonValue {
    let traces = match spec.kind {
        ChartKind::Scatter => scatter_traces(spec),
        ChartKind::Box => box_traces(spec),
        ChartKind::Bar => bar_traces(spec),
    };

    let encoding = &spec.encoding;
    let mut layout = json!({
        "title": { "text": spec.title },
        "xaxis": { "title": { "text": encoding.x } },
        "yaxis": { "title": { "text": encoding.y } },
        "margin": { "t": 60, "r": 20, "b": 60, "l": 60 },
    });
    if let Some(color) = &encoding.color {
        layout["legend"] = json!({ "title": { "text": color } });
    }

    json!({ "data": traces, "layout": layout })
}

/// `<div>` + `<script>` snippet drawing the chart into `div_id`.
pub fn embed(spec: &ChartSpec, div_id: &str) -> String {
    let fig = figure(spec);
    format!(
        r#"<div id="{id}" class="plot"></div>
<script>Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true}});</script>"#,
        id = div_id,
        data = script_json(&fig["data"]),
        layout = script_json(&fig["layout"]),
    )
}

/// Serialize JSON for inclusion inside a `<script>` element.
fn script_json(value: &JsonValue) -> String {
    value.to_string().replace("</", "<\\/")
}

fn scatter_traces(spec: &ChartSpec) -> Vec<JsonValue> {
    let groups = spec.point_groups();
    let colors = ColorMap::new(groups.iter().map(|g| &g.key));
    let opacity = spec.encoding.opacity;

    groups
        .iter()
        .map(|group| {
            let (xs, ys): (Vec<f64>, Vec<f64>) = group.points.iter().map(|p| (p[0], p[1])).unzip();
            let mut trace = json!({
                "type": spec.kind,
                "mode": "markers",
                "x": xs,
                "y": ys,
                "marker": { "color": hex(colors.color_for(&group.key)), "opacity": opacity },
            });
            if !group.key.is_null() {
                trace["name"] = json!(group.key.to_string());
            }
            trace
        })
        .collect()
}

fn box_traces(spec: &ChartSpec) -> Vec<JsonValue> {
    let ChartData::Series { x, y, .. } = &spec.data else {
        return Vec::new();
    };
    vec![json!({
        "type": spec.kind,
        "x": x,
        "y": y,
        "name": spec.encoding.y,
        "boxpoints": if spec.encoding.all_points { json!("all") } else { json!(false) },
        "marker": { "opacity": spec.encoding.opacity },
    })]
}

fn bar_traces(spec: &ChartSpec) -> Vec<JsonValue> {
    let ChartData::Counts(counts) = &spec.data else {
        return Vec::new();
    };

    if spec.encoding.color.is_none() {
        let (labels, values): (Vec<&str>, Vec<usize>) =
            counts.iter().map(|(l, n)| (l.as_str(), *n)).unzip();
        return vec![json!({ "type": spec.kind, "x": labels, "y": values })];
    }

    let keys: Vec<CellValue> = counts.iter().map(|(l, _)| CellValue::from(l.as_str())).collect();
    let colors = ColorMap::new(&keys);
    counts
        .iter()
        .zip(&keys)
        .map(|((label, n), key)| {
            json!({
                "type": spec.kind,
                "name": label,
                "x": [label],
                "y": [n],
                "marker": { "color": hex(colors.color_for(key)) },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_bar_chart, Encoding, COUNT_FIELD};

    fn scatter() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Scatter,
            title: "RPM vs Torque".into(),
            encoding: Encoding::new("RPM", "Torque").color("Target").opacity(0.6),
            data: ChartData::Series {
                x: vec![1500i64.into(), 1600i64.into(), CellValue::Null],
                y: vec![40.0.into(), 50.0.into(), 45.0.into()],
                color: Some(vec![0i64.into(), 1i64.into(), 0i64.into()]),
            },
        }
    }

    #[test]
    fn scatter_has_one_trace_per_colour() {
        let fig = figure(&scatter());
        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["type"], "scatter");
        assert_eq!(data[0]["name"], "0");
        // the row with a null x is dropped
        assert_eq!(data[0]["x"], json!([1500.0]));
        assert_eq!(data[1]["marker"]["opacity"], json!(0.6f32));
        assert_eq!(fig["layout"]["legend"]["title"]["text"], "Target");
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "RPM");
    }

    #[test]
    fn box_trace_keeps_all_points() {
        let spec = ChartSpec {
            kind: ChartKind::Box,
            title: "Tool wear".into(),
            encoding: Encoding::new("Target", "ToolWear").all_points(true),
            data: ChartData::Series {
                x: vec![0i64.into(), 1i64.into()],
                y: vec![12i64.into(), CellValue::Null],
                color: None,
            },
        };
        let fig = figure(&spec);
        assert_eq!(fig["data"][0]["type"], "box");
        assert_eq!(fig["data"][0]["boxpoints"], "all");
        assert_eq!(fig["data"][0]["y"], json!([12, null]));
    }

    #[test]
    fn coloured_bars_are_split_per_label() {
        let counts = vec![("No Failure".to_string(), 9652), ("Power Failure".to_string(), 95)];
        let plain = build_bar_chart(
            Some(counts.as_slice()),
            "",
            Encoding::new("FailureType", COUNT_FIELD),
        )
        .unwrap();
        assert_eq!(figure(&plain)["data"].as_array().unwrap().len(), 1);
        assert_eq!(figure(&plain)["data"][0]["y"], json!([9652, 95]));

        let coloured = build_bar_chart(
            Some(counts.as_slice()),
            "",
            Encoding::new("FailureType", COUNT_FIELD).color("FailureType"),
        )
        .unwrap();
        let fig = figure(&coloured);
        assert_eq!(fig["data"].as_array().unwrap().len(), 2);
        assert_eq!(fig["data"][1]["name"], "Power Failure");
    }

    #[test]
    fn embedded_json_cannot_close_the_script() {
        let mut spec = scatter();
        spec.title = "</script><b>".into();
        let html = embed(&spec, "scatter");
        assert!(html.starts_with(r#"<div id="scatter" class="plot"></div>"#));
        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r"<\/script><b>"));
    }
}
