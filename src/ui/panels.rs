use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use pdm_dashboard::data::aggregate::{AggregateResult, TARGET};
use pdm_dashboard::data::loader;
use pdm_dashboard::data::model::CellValue;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label(RichText::new("Nothing ticked = no filter").small().weak());
    ui.separator();

    // Clicks are applied after the loop so the state is not borrowed while drawing.
    let mut toggled: Option<(&'static str, CellValue)> = None;
    let mut cleared: Option<&'static str> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in state.filter_columns() {
                let values = state.filter_options(col);
                let n_selected = values
                    .iter()
                    .filter(|v| state.is_selected(col, v))
                    .count();
                let header_text = if n_selected == 0 {
                    format!("{col}  (all)")
                } else {
                    format!("{col}  ({n_selected}/{})", values.len())
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("Clear").clicked() {
                            cleared = Some(col);
                        }

                        for val in &values {
                            let mut text = RichText::new(val.to_string());
                            if col == TARGET {
                                text = text.color(state.color_map.color_for(val));
                            }

                            let mut checked = state.is_selected(col, val);
                            if ui.checkbox(&mut checked, text).changed() {
                                toggled = Some((col, val.clone()));
                            }
                        }
                    });
            }
        });

    if let Some(col) = cleared {
        state.clear_filter(col);
    }
    if let Some((col, val)) = toggled {
        state.toggle_filter_value(col, &val);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.snapshot.aggregate.count
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metrics and preview
// ---------------------------------------------------------------------------

/// One card per summary metric.
pub fn metrics_row(ui: &mut Ui, aggregate: &AggregateResult) {
    ui.horizontal(|ui: &mut Ui| {
        for (label, value) in aggregate.metric_cards() {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(label).small().weak());
                    ui.label(RichText::new(value).size(22.0).strong());
                });
            });
        }
    });
}

/// The first rows of the filtered view.
pub fn preview_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Samples (preview)");

    let columns = &state.dataset.columns;
    let records = &state.dataset.records;

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), columns.len())
                .header(20.0, |mut header| {
                    for col in columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|mut body| {
                    for &idx in &state.snapshot.preview {
                        let Some(record) = records.get(idx) else {
                            continue;
                        };
                        body.row(18.0, |mut row| {
                            for col in columns {
                                row.col(|ui| {
                                    let text = match record.get(col) {
                                        Some(v) if !v.is_null() => v.to_string(),
                                        _ => String::new(),
                                    };
                                    ui.label(text);
                                });
                            }
                        });
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sensor data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path).with_context(|| format!("loading {}", path.display())) {
            Ok(dataset) => {
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
