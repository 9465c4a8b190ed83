//! Runtime configuration, read from the environment once at startup.

use std::path::PathBuf;
use std::str::FromStr;

use crate::data::sample::DEFAULT_SEED;
use crate::error::ConfigError;

pub const DEFAULT_DATA_PATH: &str = "data/predictive_maintenance.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SAMPLE_SIZE: usize = 3000;
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// Settings shared by both dashboards.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// CSV file loaded at startup (`PDM_DATA_PATH`).
    pub data_path: PathBuf,
    /// Bind address of the HTML server (`PDM_HOST`).
    pub host: String,
    /// Listening port of the HTML server (`PORT`).
    pub port: u16,
    /// Scatter sample cap on the HTML page (`PDM_SAMPLE_SIZE`).
    pub sample_size: usize,
    /// Seed of the scatter sample (`PDM_SAMPLE_SEED`).
    pub sample_seed: u64,
    /// Rows shown in the desktop preview table (`PDM_PREVIEW_ROWS`).
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            sample_size: DEFAULT_SAMPLE_SIZE,
            sample_seed: DEFAULT_SEED,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl DashboardConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any `name → value` source; unset or blank names keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            data_path: lookup_var(&lookup, "PDM_DATA_PATH", defaults.data_path)?,
            host: lookup_var(&lookup, "PDM_HOST", defaults.host)?,
            port: lookup_var(&lookup, "PORT", defaults.port)?,
            sample_size: lookup_var(&lookup, "PDM_SAMPLE_SIZE", defaults.sample_size)?,
            sample_seed: lookup_var(&lookup, "PDM_SAMPLE_SEED", defaults.sample_seed)?,
            preview_rows: lookup_var(&lookup, "PDM_PREVIEW_ROWS", defaults.preview_rows)?,
        })
    }

    /// `host:port` for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn lookup_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
                name: name.to_string(),
                value: raw,
            })
        }
        _ => Ok(default),
    }
}
