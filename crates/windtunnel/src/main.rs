use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use windtunnel_core::settings::{Settings, DEFAULT_SETTINGS_FILE};
use windtunnel_core::Configuration;

mod commands;

/// Reduces wind-tunnel oscilloscope and force-balance recordings to rotor
/// performance tables.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file describing the data roots
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(flatten)]
    roots: RootOverrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct RootOverrides {
    /// Overrides `oscilloscope_root` from the settings file
    #[arg(long, global = true)]
    oscilloscope_root: Option<PathBuf>,
    /// Overrides `balance_root` from the settings file
    #[arg(long, global = true)]
    balance_root: Option<PathBuf>,
    /// Overrides `output_dir` from the settings file
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process and export each configuration
    Process {
        /// Limit to these configurations, e.g. `QBlade:0`
        #[arg(long)]
        only: Vec<Configuration>,
    },
    /// Process the standard configurations and render the comparison plot
    Plot {
        /// PNG destination; defaults to `plot_path` from the settings file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write the combined table as CSV
        #[arg(long)]
        combined: Option<PathBuf>,
    },
    /// Print the loaded oscilloscope table and the output table
    Preview {
        #[arg(long)]
        only: Configuration,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_settings(path: &Path, roots: RootOverrides) -> Result<Settings> {
    let mut settings = Settings::load(path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    if let Some(root) = roots.oscilloscope_root {
        settings.oscilloscope_root = root;
    }
    if let Some(root) = roots.balance_root {
        settings.balance_root = root;
    }
    if let Some(dir) = roots.output_dir {
        settings.output_dir = dir;
    }
    Ok(settings)
}

fn run(cli: Cli) -> Result<bool> {
    let settings = load_settings(&cli.config, cli.roots)?;
    let matrix = settings.test_matrix()?;

    match cli.command {
        Command::Process { only } => {
            let configurations = if only.is_empty() {
                Configuration::standard()
            } else {
                only
            };
            commands::process(&settings, &matrix, &configurations)
        }
        Command::Plot { out, combined } => {
            let out = out
                .or_else(|| settings.plot_path.clone())
                .context("no plot destination: pass --out or set plot_path")?;
            commands::plot(&settings, &matrix, &out, combined.as_deref())?;
            Ok(true)
        }
        Command::Preview { only } => {
            commands::preview(&settings, &matrix, only)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = ?err, "windtunnel failed");
            ExitCode::FAILURE
        }
    }
}
