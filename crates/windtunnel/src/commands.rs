use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};
use windtunnel_core::outputs::{
    combine_output_tables, export_output_table, project_performance, write_combined, OutputTable,
};
use windtunnel_core::plot::{render_performance_plot, PerformanceFacets};
use windtunnel_core::processing::{load_configuration, process_configuration};
use windtunnel_core::settings::Settings;
use windtunnel_core::test_matrix::TestMatrix;
use windtunnel_core::Configuration;

/// Processes and exports each configuration. A failure is logged and the
/// remaining configurations still run; returns false if any failed.
pub fn process(
    settings: &Settings,
    matrix: &TestMatrix,
    configurations: &[Configuration],
) -> Result<bool> {
    let mut failed = 0usize;

    for &configuration in configurations {
        let outcome = process_configuration(settings, matrix, configuration)
            .and_then(|table| export_output_table(&table, &settings.output_dir));
        if let Err(err) = outcome {
            failed += 1;
            error!(
                configuration = %configuration,
                file_read = err.is_file_read(),
                error = %err,
                "configuration failed"
            );
        }
    }

    info!(
        processed = configurations.len() - failed,
        failed,
        "processing finished"
    );
    Ok(failed == 0)
}

pub fn plot(
    settings: &Settings,
    matrix: &TestMatrix,
    out: &Path,
    combined_path: Option<&Path>,
) -> Result<()> {
    let tables = Configuration::standard()
        .into_iter()
        .map(|configuration| {
            process_configuration(settings, matrix, configuration)
                .with_context(|| format!("processing {configuration}"))
        })
        .collect::<Result<Vec<OutputTable>>>()?;

    let combined = combine_output_tables(&tables)?;
    if let Some(path) = combined_path {
        write_combined(&combined, path)?;
    }

    let facets = PerformanceFacets::from_frame(&project_performance(&combined)?)?;
    render_performance_plot(&facets, out)
        .with_context(|| format!("rendering {}", out.display()))?;
    Ok(())
}

pub fn preview(settings: &Settings, matrix: &TestMatrix, configuration: Configuration) -> Result<()> {
    let loaded = load_configuration(settings, matrix, configuration)
        .with_context(|| format!("loading {configuration}"))?;
    println!("{configuration} oscilloscope table:");
    println!("{}", loaded.oscilloscope.df().head(Some(10)));

    let table = loaded.process()?;
    println!("{configuration} output table:");
    println!("{}", table.to_dataframe()?);
    Ok(())
}
