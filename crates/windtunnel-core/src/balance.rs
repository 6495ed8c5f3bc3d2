use std::path::Path;

use tracing::debug;
use windtunnel_parser::{parse_balance_run, BalanceRun};

use crate::error::{PipelineError, Result};
use crate::files::{file_name, list_csv_files, read_text};

/// Reads every run file in `dir`, in file-name order.
pub fn load_balance_runs(dir: &Path) -> Result<Vec<BalanceRun>> {
    let files = list_csv_files(dir)?;
    let mut runs = Vec::with_capacity(files.len());

    for path in files {
        let name = file_name(&path)?.to_string();
        let content = read_text(&path)?;
        let run = parse_balance_run(&name, &content)
            .map_err(|source| PipelineError::FileRead { path, source })?;
        debug!(file = %name, samples = run.df.height(), "balance run read");
        runs.push(run);
    }

    Ok(runs)
}
