use std::path::Path;

use polars::prelude::*;
use tracing::debug;
use windtunnel_parser::{parse_oscilloscope_channel, OscilloscopeChannel, Resistance};

use crate::error::{PipelineError, Result};
use crate::files::{file_name, list_csv_files, read_text};
use crate::test_matrix::{TestMatrix, TestMatrixEntry, TIME_AXIS_LABEL};
use crate::types::Configuration;

/// Time-aligned voltage traces for one configuration, one column per load.
#[derive(Debug, Clone)]
pub struct OscilloscopeTable {
    configuration: Configuration,
    resistances: Vec<Resistance>,
    df: DataFrame,
}

impl OscilloscopeTable {
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn resistances(&self) -> &[Resistance] {
        &self.resistances
    }

    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    pub fn time(&self) -> Result<&Float64Chunked> {
        Ok(self.df.column(TIME_AXIS_LABEL)?.f64()?)
    }

    pub fn voltage(&self, resistance: Resistance) -> Result<&Float64Chunked> {
        if !self.resistances.contains(&resistance) {
            return Err(self.missing(resistance));
        }
        Ok(self.df.column(&resistance.to_string())?.f64()?)
    }

    /// Mean over the full recorded series.
    pub fn volt_mean(&self, resistance: Resistance) -> Result<f64> {
        self.voltage(resistance)?
            .mean()
            .ok_or_else(|| self.missing(resistance))
    }

    fn missing(&self, resistance: Resistance) -> PipelineError {
        PipelineError::MissingChannel {
            configuration: self.configuration,
            resistance,
        }
    }
}

/// Each load was recorded twice back to back; keep the first of every pair.
pub fn retain_first_recordings<T>(channels: &[T]) -> Vec<&T> {
    channels.iter().step_by(2).collect()
}

/// Shared file-name prefix of a channel export, e.g. `oscope3` for `oscope3_7.csv`.
pub fn channel_prefix(file_name: &str) -> &str {
    file_name.split('_').next().unwrap_or(file_name)
}

pub fn load_oscilloscope_table(
    dir: &Path,
    configuration: Configuration,
    matrix: &TestMatrix,
) -> Result<OscilloscopeTable> {
    let entry = matrix.lookup(configuration)?;
    let files = list_csv_files(dir)?;
    let first = files.first().ok_or_else(|| PipelineError::InvalidInput {
        path: dir.to_path_buf(),
        message: "no oscilloscope channel files found".to_string(),
    })?;
    let prefix = channel_prefix(file_name(first)?).to_string();

    // Directory listings are not in channel order, so walk the numeric suffixes.
    let mut channels = Vec::with_capacity(files.len());
    for idx in 0..files.len() {
        let path = dir.join(format!("{prefix}_{idx}.csv"));
        let content = read_text(&path)?;
        let channel = parse_oscilloscope_channel(&content).map_err(|source| {
            PipelineError::FileRead {
                path: path.clone(),
                source,
            }
        })?;

        if let Some(reference) = channels.first().map(OscilloscopeChannel::sample_count) {
            if channel.sample_count() != reference {
                return Err(PipelineError::InvalidInput {
                    path,
                    message: format!(
                        "channel has {} samples but channel 0 has {reference}",
                        channel.sample_count()
                    ),
                });
            }
        }
        channels.push(channel);
    }

    debug!(
        configuration = %configuration,
        channels = channels.len(),
        prefix = %prefix,
        "oscilloscope channels read"
    );

    assemble_oscilloscope_table(configuration, entry, &channels)
}

/// Builds the labelled table from channels in recording order.
pub fn assemble_oscilloscope_table(
    configuration: Configuration,
    entry: &TestMatrixEntry,
    channels: &[OscilloscopeChannel],
) -> Result<OscilloscopeTable> {
    let retained = retain_first_recordings(channels);
    let found = if retained.is_empty() { 0 } else { retained.len() + 1 };
    if found != entry.label_count() {
        return Err(PipelineError::ColumnCountMismatch {
            configuration,
            expected: entry.label_count(),
            found,
        });
    }

    let mut columns: Vec<Column> = Vec::with_capacity(found);
    let time = retained[0].time()?.clone().with_name(TIME_AXIS_LABEL.into());
    columns.push(time.into_series().into());

    for (resistance, channel) in entry.resistances().iter().zip(&retained) {
        let volts = channel
            .volts()?
            .clone()
            .with_name(resistance.to_string().into());
        columns.push(volts.into_series().into());
    }

    let df = DataFrame::new(columns)?;

    Ok(OscilloscopeTable {
        configuration,
        resistances: entry.resistances().to_vec(),
        df,
    })
}
