use std::path::Path;

use crate::errors::ParserError;
use crate::model::{Resistance, RunMetadata};

/// Parser for balance run file names of the form
/// `{blade}_{resistor}_{temp}_{pressure}_{dynpressure} {unit}.csv`.
pub struct RunNameParser;

impl Default for RunNameParser {
    fn default() -> Self {
        Self
    }
}

impl RunNameParser {
    const NAME: &'static str = "RUN_NAME";
    const FIELD_COUNT: usize = 5;

    fn error(field: &'static str, message: impl Into<String>) -> ParserError {
        ParserError::FileName {
            parser: Self::NAME,
            field,
            message: message.into(),
        }
    }

    fn parse_float(field: &'static str, value: &str) -> Result<f64, ParserError> {
        let trimmed = value.trim();
        trimmed
            .parse::<f64>()
            .map_err(|err| Self::error(field, format!("'{trimmed}' is not a number: {err}")))
    }

    pub fn parse(&self, file_name: &str) -> Result<RunMetadata, ParserError> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| Self::error("file_name", format!("'{file_name}' has no file stem")))?;

        let fields: Vec<&str> = stem.split('_').collect();
        if fields.len() != Self::FIELD_COUNT {
            return Err(Self::error(
                "file_name",
                format!(
                    "expected {} underscore-separated fields in '{stem}', found {}",
                    Self::FIELD_COUNT,
                    fields.len()
                ),
            ));
        }

        let blade_token = fields[0].trim();
        let blade_id = blade_token.strip_prefix('B').unwrap_or(blade_token);
        if blade_id.is_empty() {
            return Err(Self::error("blade", format!("'{blade_token}' has no blade number")));
        }

        let resistance =
            Resistance::try_from(fields[1]).map_err(|message| Self::error("resistor", message))?;
        let temperature_f = Self::parse_float("temperature", fields[2])?;
        let atm_pressure_psi = Self::parse_float("pressure", fields[3])?;

        // The last field carries a unit suffix after the first space, e.g. "10 psf".
        let (value, unit) = match fields[4].split_once(' ') {
            Some((value, unit)) => (value, Some(unit.trim()).filter(|u| !u.is_empty())),
            None => (fields[4], None),
        };
        let dynamic_pressure_psf = Self::parse_float("dynamic_pressure", value)?;

        Ok(RunMetadata {
            blade_id: blade_id.to_string(),
            resistance,
            temperature_f,
            atm_pressure_psi,
            dynamic_pressure_psf,
            dynamic_pressure_unit: unit.map(str::to_string),
        })
    }
}
