use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::test_matrix::{TestMatrix, TestMatrixEntry};
use crate::types::{BladeDesign, Configuration, SkewAngle};

pub const DEFAULT_SETTINGS_FILE: &str = "windtunnel.toml";
pub const DEFAULT_OSCILLOSCOPE_DIR_TEMPLATE: &str = "MAE{blade}{skew}Degree(pt32psf)";
pub const DEFAULT_BALANCE_DIR_TEMPLATE: &str = "20 Deg {blade} {skew} skew 0.32PSF";

fn default_oscilloscope_template() -> String {
    DEFAULT_OSCILLOSCOPE_DIR_TEMPLATE.to_string()
}

fn default_balance_template() -> String {
    DEFAULT_BALANCE_DIR_TEMPLATE.to_string()
}

/// Replaces a standard sweep for one configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestMatrixOverride {
    pub blade_design: BladeDesign,
    pub skew_angle: SkewAngle,
    pub resistances: Vec<f64>,
}

/// Where the raw data lives and where results go.
///
/// Directory templates are expanded per configuration: `{blade}` becomes the
/// blade design name and `{skew}` the skew angle in degrees.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub oscilloscope_root: PathBuf,
    pub balance_root: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub plot_path: Option<PathBuf>,
    #[serde(default = "default_oscilloscope_template")]
    pub oscilloscope_dir_template: String,
    #[serde(default = "default_balance_template")]
    pub balance_dir_template: String,
    #[serde(default)]
    pub test_matrix: Vec<TestMatrixOverride>,
}

impl Settings {
    pub fn new(
        oscilloscope_root: impl Into<PathBuf>,
        balance_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            oscilloscope_root: oscilloscope_root.into(),
            balance_root: balance_root.into(),
            output_dir: output_dir.into(),
            plot_path: None,
            oscilloscope_dir_template: default_oscilloscope_template(),
            balance_dir_template: default_balance_template(),
            test_matrix: Vec::new(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.test_matrix()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Standard sweeps with any configured overrides applied.
    pub fn test_matrix(&self) -> Result<TestMatrix> {
        let mut matrix = TestMatrix::standard().clone();
        for entry in &self.test_matrix {
            let configuration = Configuration::new(entry.blade_design, entry.skew_angle);
            let sweep = TestMatrixEntry::from_ohms(&entry.resistances).map_err(|message| {
                PipelineError::Settings(format!("test_matrix entry for {configuration}: {message}"))
            })?;
            matrix.insert(configuration, sweep);
        }
        Ok(matrix)
    }

    pub fn oscilloscope_dir(&self, configuration: Configuration) -> PathBuf {
        self.oscilloscope_root
            .join(expand_template(&self.oscilloscope_dir_template, configuration))
    }

    pub fn balance_dir(&self, configuration: Configuration) -> PathBuf {
        self.balance_root
            .join(expand_template(&self.balance_dir_template, configuration))
    }

    pub fn output_path(&self, configuration: Configuration) -> PathBuf {
        self.output_dir.join(configuration.output_file_name())
    }
}

fn expand_template(template: &str, configuration: Configuration) -> String {
    template
        .replace("{blade}", configuration.blade_design.as_str())
        .replace("{skew}", &configuration.skew_angle.to_string())
}
