use anyhow::{Context, Result};
use tokio::net::TcpListener;

use pdm_dashboard::config::DashboardConfig;
use pdm_dashboard::data::loader;
use pdm_dashboard::pipeline::RenderOptions;
use pdm_dashboard::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("reading configuration")?;
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading dataset {}", config.data_path.display()))?;

    let app = build_router(AppState::new(dataset, RenderOptions::static_page(&config)));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("Serving dashboard on http://{addr}/");

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
