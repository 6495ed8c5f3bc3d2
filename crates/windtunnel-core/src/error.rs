// crates/windtunnel-core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;
use windtunnel_parser::{ParserError, Resistance};

use crate::types::Configuration;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no test configuration registered for blade design '{blade_design}' at skew '{skew_angle}'")]
    ConfigurationNotFound {
        blade_design: String,
        skew_angle: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    #[error("file I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input at {}: {message}", path.display())]
    InvalidInput { path: PathBuf, message: String },

    #[error("{configuration}: oscilloscope table has {found} columns but the test matrix lists {expected} labels")]
    ColumnCountMismatch {
        configuration: Configuration,
        expected: usize,
        found: usize,
    },

    #[error("could not parse run metadata from '{file_name}': {source}")]
    MetadataParse {
        file_name: String,
        #[source]
        source: ParserError,
    },

    #[error("{configuration}: no oscilloscope channel recorded for {resistance} ohms")]
    MissingChannel {
        configuration: Configuration,
        resistance: Resistance,
    },

    #[error("run '{file_name}' has no positive rpm samples")]
    NoValidRpmSamples { file_name: String },

    #[error("run '{file_name}' produced a non-physical free-stream velocity ({velocity})")]
    DegenerateVelocity { file_name: String, velocity: f64 },

    #[error("settings error: {0}")]
    Settings(String),

    #[error("settings file could not be parsed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("plot rendering failed: {0}")]
    Plot(String),
}

impl PipelineError {
    /// True for the unreadable / malformed input family.
    pub fn is_file_read(&self) -> bool {
        matches!(
            self,
            PipelineError::FileRead { .. } | PipelineError::Io { .. } | PipelineError::InvalidInput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
