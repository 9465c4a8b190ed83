//! Predictive-maintenance dashboards over a sensor CSV.
//!
//! The data pipeline (`data`, `chart`, `pipeline`) is shared by the desktop
//! window (`pdm-dashboard` binary) and the static HTML server (`pdm-serve`).

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod server;
