//! HTTP host of the static dashboard: a single `GET /` route.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::data::filter::FilterSpec;
use crate::data::model::Dataset;
use crate::pipeline::{self, RenderOptions};
use crate::report;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub options: Arc<RenderOptions>,
}

impl AppState {
    pub fn new(dataset: Dataset, options: RenderOptions) -> Self {
        Self {
            dataset: Arc::new(dataset),
            options: Arc::new(options),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .with_state(state)
}

async fn dashboard_handler(State(state): State<AppState>) -> Html<String> {
    let snapshot = pipeline::run(&state.dataset, &FilterSpec::new(), &state.options);
    log::info!(
        "GET / rendered {} records ({:.2}% failures)",
        snapshot.aggregate.count,
        snapshot.aggregate.failure_rate_pct
    );
    Html(report::render_page(&snapshot))
}
