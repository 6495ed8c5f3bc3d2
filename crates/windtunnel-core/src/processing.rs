use tracing::{debug, info, warn};
use windtunnel_parser::{parse_run_name, BalanceRun};

use crate::balance::load_balance_runs;
use crate::calculator::{compute_rotor_metrics, RunConditions};
use crate::error::{PipelineError, Result};
use crate::oscilloscope::{load_oscilloscope_table, OscilloscopeTable};
use crate::outputs::{OutputRow, OutputTable};
use crate::settings::Settings;
use crate::test_matrix::TestMatrix;
use crate::types::Configuration;

/// Raw inputs of one configuration, read but not yet reduced.
#[derive(Debug, Clone)]
pub struct LoadedConfiguration {
    pub configuration: Configuration,
    pub oscilloscope: OscilloscopeTable,
    pub runs: Vec<BalanceRun>,
}

impl LoadedConfiguration {
    pub fn process(&self) -> Result<OutputTable> {
        process_tables(self.configuration, &self.oscilloscope, &self.runs)
    }
}

pub fn load_configuration(
    settings: &Settings,
    matrix: &TestMatrix,
    configuration: Configuration,
) -> Result<LoadedConfiguration> {
    let oscilloscope =
        load_oscilloscope_table(&settings.oscilloscope_dir(configuration), configuration, matrix)?;
    let runs = load_balance_runs(&settings.balance_dir(configuration))?;

    Ok(LoadedConfiguration {
        configuration,
        oscilloscope,
        runs,
    })
}

/// Loads and reduces one configuration.
pub fn process_configuration(
    settings: &Settings,
    matrix: &TestMatrix,
    configuration: Configuration,
) -> Result<OutputTable> {
    load_configuration(settings, matrix, configuration)?.process()
}

/// Reduces every balance run against the configuration's oscilloscope table.
///
/// Any failing run aborts the whole configuration.
pub fn process_tables(
    configuration: Configuration,
    oscilloscope: &OscilloscopeTable,
    runs: &[BalanceRun],
) -> Result<OutputTable> {
    if runs.is_empty() {
        warn!(configuration = %configuration, "no balance runs to process");
    }

    let rows = runs
        .iter()
        .map(|run| process_run(oscilloscope, run))
        .collect::<Result<Vec<_>>>()?;

    info!(
        configuration = %configuration,
        rows = rows.len(),
        "configuration processed"
    );

    Ok(OutputTable::new(configuration, rows))
}

fn process_run(oscilloscope: &OscilloscopeTable, run: &BalanceRun) -> Result<OutputRow> {
    let metadata = parse_run_name(&run.file_name).map_err(|source| PipelineError::MetadataParse {
        file_name: run.file_name.clone(),
        source,
    })?;

    let conditions = RunConditions {
        temperature_f: metadata.temperature_f,
        atm_pressure_psi: metadata.atm_pressure_psi,
        dynamic_pressure_psf: metadata.dynamic_pressure_psf,
        resistance: metadata.resistance,
        volt_mean: oscilloscope.volt_mean(metadata.resistance)?,
    };
    let metrics = compute_rotor_metrics(run, &conditions)?;

    debug!(
        file = %run.file_name,
        resistance = %metadata.resistance,
        volt_mean = conditions.volt_mean,
        tip_speed_ratio = metrics.tip_speed_ratio,
        coefficient_power = metrics.coefficient_power,
        "run reduced"
    );

    Ok(OutputRow {
        blade_id: metadata.blade_id,
        resistance: metadata.resistance,
        dynamic_pressure_psf: metadata.dynamic_pressure_psf,
        velocity_m_s: metrics.velocity_m_s,
        radians_per_second: metrics.radians_per_second,
        tip_speed_ratio: metrics.tip_speed_ratio,
        coefficient_power: metrics.coefficient_power,
    })
}
