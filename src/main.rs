mod app;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::DashboardApp;
use eframe::egui;

use pdm_dashboard::config::DashboardConfig;
use pdm_dashboard::data::loader;
use pdm_dashboard::pipeline::RenderOptions;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("reading configuration")?;
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading dataset {}", config.data_path.display()))?;
    let state = AppState::new(dataset, RenderOptions::interactive(&config));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Predictive Maintenance HMI",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("window closed with error: {e}"))
}
