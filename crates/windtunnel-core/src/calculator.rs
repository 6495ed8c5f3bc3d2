use std::f64::consts::PI;

use polars::prelude::*;
use windtunnel_parser::{BalanceRun, Resistance};

use crate::error::{PipelineError, Result};

pub const PROPELLER_LENGTH_M: f64 = 0.15;
pub const HUB_LENGTH_M: f64 = 0.0127;
pub const ROTOR_RADIUS_M: f64 = PROPELLER_LENGTH_M + HUB_LENGTH_M;
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8314.45;
pub const MOLAR_MASS_AIR: f64 = 28.96;
pub const RPM_TO_RAD_PER_S: f64 = 0.104719755;
pub const PSI_TO_PASCAL: f64 = 6895.0;
pub const PSF_TO_PASCAL: f64 = 47.88;

/// Scalar conditions of one run, taken from the file name and the matching
/// oscilloscope trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConditions {
    pub temperature_f: f64,
    pub atm_pressure_psi: f64,
    pub dynamic_pressure_psf: f64,
    pub resistance: Resistance,
    pub volt_mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorMetrics {
    pub velocity_m_s: f64,
    pub radians_per_second: f64,
    pub tip_speed_ratio: f64,
    pub coefficient_power: f64,
    pub air_density_kg_m3: f64,
    pub power_watts: f64,
}

/// Mean of the positive rpm samples; zero and negative readings are dropouts.
pub fn average_positive_rpm(rpm: &Float64Chunked) -> Option<f64> {
    let recorded: Vec<f64> = rpm.into_iter().flatten().filter(|value| *value > 0.0).collect();
    if recorded.is_empty() {
        return None;
    }
    Some(recorded.iter().sum::<f64>() / recorded.len() as f64)
}

pub fn fahrenheit_to_kelvin(temperature_f: f64) -> f64 {
    ((temperature_f - 32.0) * 5.0 / 9.0) + 273.15
}

/// Ideal-gas density of dry air, kg/m³.
pub fn air_density(temperature_f: f64, atm_pressure_psi: f64) -> f64 {
    let pressure_pa = atm_pressure_psi * PSI_TO_PASCAL;
    pressure_pa / ((UNIVERSAL_GAS_CONSTANT / MOLAR_MASS_AIR) * fahrenheit_to_kelvin(temperature_f))
}

pub fn electrical_power_watts(volt_mean: f64, resistance: Resistance) -> f64 {
    volt_mean.powf(2.0) / resistance.effective_ohms()
}

pub fn swept_area_m2() -> f64 {
    PI * ROTOR_RADIUS_M.powf(2.0)
}

/// Free-stream velocity from dynamic pressure in lb/ft², m/s.
pub fn free_stream_velocity(dynamic_pressure_psf: f64, density: f64) -> f64 {
    ((2.0 * (dynamic_pressure_psf * PSF_TO_PASCAL)) / density).sqrt()
}

/// Reduces one balance run to tip-speed ratio and coefficient of power.
pub fn compute_rotor_metrics(run: &BalanceRun, conditions: &RunConditions) -> Result<RotorMetrics> {
    let rpm_average =
        average_positive_rpm(run.rpm()?).ok_or_else(|| PipelineError::NoValidRpmSamples {
            file_name: run.file_name.clone(),
        })?;
    let radians_per_second = rpm_average * RPM_TO_RAD_PER_S;

    let power_watts = electrical_power_watts(conditions.volt_mean, conditions.resistance);
    let density = air_density(conditions.temperature_f, conditions.atm_pressure_psi);
    let velocity_m_s = free_stream_velocity(conditions.dynamic_pressure_psf, density);

    if !density.is_finite() || density <= 0.0 || !velocity_m_s.is_finite() || velocity_m_s <= 0.0 {
        return Err(PipelineError::DegenerateVelocity {
            file_name: run.file_name.clone(),
            velocity: velocity_m_s,
        });
    }

    let coefficient_power =
        power_watts / ((0.5 * density) * swept_area_m2() * velocity_m_s.powf(3.0));
    let tip_speed_ratio = (ROTOR_RADIUS_M * radians_per_second) / velocity_m_s;

    Ok(RotorMetrics {
        velocity_m_s,
        radians_per_second,
        tip_speed_ratio,
        coefficient_power,
        air_density_kg_m3: density,
        power_watts,
    })
}
