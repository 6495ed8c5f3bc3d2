use std::fmt;

use polars::prelude::*;
use serde::Deserialize;

use crate::formats::schema::{OSCILLOSCOPE_TIME_COLUMN, OSCILLOSCOPE_VOLT_COLUMN, RPM_COLUMN};

/// Electrical load connected across the generator during a run.
///
/// A value of zero is the short-circuit sentinel: those runs were physically
/// recorded across 0.03 ohms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "f64")]
pub struct Resistance(f64);

impl Resistance {
    pub const SHORT_CIRCUIT_OHMS: f64 = 0.03;

    pub fn new(ohms: f64) -> Result<Self, String> {
        if !ohms.is_finite() {
            return Err(format!("resistance must be finite, got {ohms}"));
        }
        if ohms < 0.0 {
            return Err(format!("resistance must not be negative, got {ohms}"));
        }
        // -0.0 collapses to the sentinel
        Ok(Self(if ohms == 0.0 { 0.0 } else { ohms }))
    }

    pub fn ohms(&self) -> f64 {
        self.0
    }

    pub fn is_short_circuit(&self) -> bool {
        self.0 == 0.0
    }

    /// Load actually present in the circuit.
    pub fn effective_ohms(&self) -> f64 {
        if self.is_short_circuit() {
            Self::SHORT_CIRCUIT_OHMS
        } else {
            self.0
        }
    }
}

impl fmt::Display for Resistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Resistance {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Resistance::new(value)
    }
}

impl From<Resistance> for f64 {
    fn from(value: Resistance) -> Self {
        value.0
    }
}

impl TryFrom<&str> for Resistance {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("missing resistance value".to_string());
        }
        let ohms = trimmed
            .parse::<f64>()
            .map_err(|err| format!("'{trimmed}' is not a number: {err}"))?;
        Resistance::new(ohms)
    }
}

/// One oscilloscope channel: the `second` time axis and the `Volt` samples.
#[derive(Debug, Clone)]
pub struct OscilloscopeChannel {
    pub df: DataFrame,
}

impl OscilloscopeChannel {
    pub fn sample_count(&self) -> usize {
        self.df.height()
    }

    pub fn time(&self) -> PolarsResult<&Float64Chunked> {
        self.df.column(OSCILLOSCOPE_TIME_COLUMN)?.f64()
    }

    pub fn volts(&self) -> PolarsResult<&Float64Chunked> {
        self.df.column(OSCILLOSCOPE_VOLT_COLUMN)?.f64()
    }
}

/// One force-balance recording, keyed by the file it was read from.
#[derive(Debug, Clone)]
pub struct BalanceRun {
    pub file_name: String,
    pub df: DataFrame,
}

impl BalanceRun {
    pub fn rpm(&self) -> PolarsResult<&Float64Chunked> {
        self.df.column(RPM_COLUMN)?.f64()
    }
}

/// Experimental conditions encoded in a balance file name.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetadata {
    pub blade_id: String,
    pub resistance: Resistance,
    pub temperature_f: f64,
    pub atm_pressure_psi: f64,
    pub dynamic_pressure_psf: f64,
    pub dynamic_pressure_unit: Option<String>,
}
