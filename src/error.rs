//! Error types for loading, filtering, charting and configuration.
//!
//! Every failure of the data pipeline has its own enum so callers can decide
//! what is fatal (loading, configuration) and what only degrades one part of
//! the dashboard (chart encodings, stale filters).

use std::path::PathBuf;

use thiserror::Error;

/// The dataset could not be read. Fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist.
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Only comma-separated files are understood.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// The file is empty or its first line is blank.
    #[error("CSV has no header row")]
    MissingHeader,

    /// The CSV reader rejected the input (ragged rows, bad UTF-8, I/O).
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A chart could not be encoded from the data it was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("no such column: '{0}'")]
    MissingField(String),

    /// Bar charts take a precomputed frequency table, not raw rows.
    #[error("bar charts are built from a frequency table, see build_bar_chart")]
    FrequencyTableRequired,
}

/// A filter names a column the dataset does not have.
///
/// Never fatal: the constraint is skipped and the error is only reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("filter references unknown column '{0}'")]
    UnknownColumn(String),
}

/// An environment variable held a value that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: String, value: String },
}
