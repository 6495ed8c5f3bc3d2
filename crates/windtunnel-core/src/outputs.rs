use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::Deserialize;
use tracing::info;
use windtunnel_parser::Resistance;

use crate::error::{PipelineError, Result};
use crate::types::Configuration;

pub const INDEX_COLUMN: &str = "index";
pub const BLADE_COLUMN: &str = "blade#";
pub const RESISTOR_COLUMN: &str = "resistor_type";
pub const DYNAMIC_PRESSURE_COLUMN: &str = "dynamic_pressure(lb/sqft)";
pub const VELOCITY_COLUMN: &str = "velocity(m/s)";
pub const RADIANS_COLUMN: &str = "radians/sec";
pub const TIP_SPEED_RATIO_COLUMN: &str = "tip_speed_ratio";
pub const COEFFICIENT_POWER_COLUMN: &str = "coefficient_power";
pub const BLADE_DESIGN_COLUMN: &str = "blade_design";
pub const SKEW_ANGLE_COLUMN: &str = "skew_angle";

/// One reduced balance run.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub blade_id: String,
    pub resistance: Resistance,
    pub dynamic_pressure_psf: f64,
    pub velocity_m_s: f64,
    pub radians_per_second: f64,
    pub tip_speed_ratio: f64,
    pub coefficient_power: f64,
}

/// Rows for one configuration, in balance-file order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    configuration: Configuration,
    rows: Vec<OutputRow>,
}

impl OutputTable {
    pub fn new(configuration: Configuration, rows: Vec<OutputRow>) -> Self {
        Self {
            configuration,
            rows,
        }
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let len = self.rows.len() as u32;
        let f64_column = |name: &str, value: fn(&OutputRow) -> f64| -> Column {
            Series::new(name.into(), self.rows.iter().map(value).collect::<Vec<f64>>()).into()
        };

        DataFrame::new(vec![
            Series::new(INDEX_COLUMN.into(), (0..len).collect::<Vec<u32>>()).into(),
            Series::new(
                BLADE_COLUMN.into(),
                self.rows
                    .iter()
                    .map(|row| row.blade_id.as_str())
                    .collect::<Vec<&str>>(),
            )
            .into(),
            // labels as recorded: `4`, `0.8`, `0`
            Series::new(
                RESISTOR_COLUMN.into(),
                self.rows
                    .iter()
                    .map(|row| row.resistance.to_string())
                    .collect::<Vec<String>>(),
            )
            .into(),
            f64_column(DYNAMIC_PRESSURE_COLUMN, |row| row.dynamic_pressure_psf),
            f64_column(VELOCITY_COLUMN, |row| row.velocity_m_s),
            f64_column(RADIANS_COLUMN, |row| row.radians_per_second),
            f64_column(TIP_SPEED_RATIO_COLUMN, |row| row.tip_speed_ratio),
            f64_column(COEFFICIENT_POWER_COLUMN, |row| row.coefficient_power),
        ])
    }
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut file = File::create(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Writes `{blade}{skew}Output.csv` into `output_dir` and returns its path.
pub fn export_output_table(table: &OutputTable, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(table.configuration().output_file_name());
    let mut df = table.to_dataframe()?;
    write_csv(&mut df, &path)?;

    info!(
        configuration = %table.configuration(),
        rows = table.len(),
        path = %path.display(),
        "configuration exported"
    );
    Ok(path)
}

// Row layout of an exported file. Kept flat: the csv crate cannot infer
// column types through `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
struct ExportedRow {
    #[serde(rename = "index")]
    _index: u32,
    #[serde(rename = "blade#")]
    blade_id: String,
    #[serde(rename = "resistor_type")]
    resistance: Resistance,
    #[serde(rename = "dynamic_pressure(lb/sqft)")]
    dynamic_pressure_psf: f64,
    #[serde(rename = "velocity(m/s)")]
    velocity_m_s: f64,
    #[serde(rename = "radians/sec")]
    radians_per_second: f64,
    tip_speed_ratio: f64,
    coefficient_power: f64,
}

impl From<ExportedRow> for OutputRow {
    fn from(row: ExportedRow) -> Self {
        Self {
            blade_id: row.blade_id,
            resistance: row.resistance,
            dynamic_pressure_psf: row.dynamic_pressure_psf,
            velocity_m_s: row.velocity_m_s,
            radians_per_second: row.radians_per_second,
            tip_speed_ratio: row.tip_speed_ratio,
            coefficient_power: row.coefficient_power,
        }
    }
}

/// Reads a table written by [`export_output_table`].
pub fn read_output_table(path: &Path) -> Result<Vec<OutputRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<ExportedRow>() {
        rows.push(record?.into());
    }
    Ok(rows)
}

/// Stacks per-configuration tables into one frame tagged with `blade_design`
/// and `skew_angle`.
pub fn combine_output_tables(tables: &[OutputTable]) -> Result<DataFrame> {
    let mut combined: Option<DataFrame> = None;

    for table in tables {
        let rows = table.len();
        let configuration = table.configuration();
        let frame = table.to_dataframe()?.drop(INDEX_COLUMN)?;

        let mut columns: Vec<Column> = vec![
            Series::new(
                BLADE_DESIGN_COLUMN.into(),
                vec![configuration.blade_design.as_str(); rows],
            )
            .into(),
            Series::new(
                SKEW_ANGLE_COLUMN.into(),
                vec![configuration.skew_angle.degrees(); rows],
            )
            .into(),
        ];
        columns.extend(frame.get_columns().iter().cloned());
        let frame = DataFrame::new(columns)?;

        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&frame)?;
            }
            None => combined = Some(frame),
        }
    }

    Ok(combined.unwrap_or_default())
}

/// Keeps only the columns the performance plot needs.
pub fn project_performance(df: &DataFrame) -> Result<DataFrame> {
    Ok(df.select([
        BLADE_DESIGN_COLUMN,
        SKEW_ANGLE_COLUMN,
        TIP_SPEED_RATIO_COLUMN,
        COEFFICIENT_POWER_COLUMN,
    ])?)
}

pub fn write_combined(df: &DataFrame, path: &Path) -> Result<()> {
    let mut df = df.clone();
    write_csv(&mut df, path)?;
    info!(rows = df.height(), path = %path.display(), "combined table written");
    Ok(())
}
