use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let state = &self.state;
                    panels::metrics_row(ui, &state.snapshot.aggregate);
                    ui.separator();

                    ui.columns(2, |cols| {
                        plot::scatter_plot(&mut cols[0], &state.snapshot.scatter, &state.color_map);
                        plot::box_plot(&mut cols[1], &state.snapshot.box_plot);
                    });
                    ui.separator();

                    plot::bar_chart(ui, &state.snapshot.bar);
                    ui.separator();

                    panels::preview_table(ui, state);
                });
        });
    }
}
