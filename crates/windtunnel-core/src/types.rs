use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum BladeDesign {
    QBlade,
    That,
}

impl BladeDesign {
    pub const ALL: [BladeDesign; 2] = [BladeDesign::QBlade, BladeDesign::That];

    pub fn as_str(&self) -> &'static str {
        match self {
            BladeDesign::QBlade => "QBlade",
            BladeDesign::That => "THAT",
        }
    }
}

impl fmt::Display for BladeDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BladeDesign {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "qblade" => Ok(BladeDesign::QBlade),
            "that" => Ok(BladeDesign::That),
            other => Err(format!("unknown blade design '{other}'")),
        }
    }
}

impl TryFrom<String> for BladeDesign {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BladeDesign::try_from(value.as_str())
    }
}

impl From<BladeDesign> for String {
    fn from(value: BladeDesign) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u32")]
pub enum SkewAngle {
    Zero,
    Ten,
    Twenty,
}

impl SkewAngle {
    pub const ALL: [SkewAngle; 3] = [SkewAngle::Zero, SkewAngle::Ten, SkewAngle::Twenty];

    pub fn degrees(&self) -> u32 {
        match self {
            SkewAngle::Zero => 0,
            SkewAngle::Ten => 10,
            SkewAngle::Twenty => 20,
        }
    }
}

impl fmt::Display for SkewAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl TryFrom<u32> for SkewAngle {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SkewAngle::Zero),
            10 => Ok(SkewAngle::Ten),
            20 => Ok(SkewAngle::Twenty),
            other => Err(format!("unsupported skew angle {other}")),
        }
    }
}

impl From<SkewAngle> for u32 {
    fn from(value: SkewAngle) -> Self {
        value.degrees()
    }
}

/// One experimental setup: a blade design run at one skew angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct Configuration {
    pub blade_design: BladeDesign,
    pub skew_angle: SkewAngle,
}

impl Configuration {
    pub fn new(blade_design: BladeDesign, skew_angle: SkewAngle) -> Self {
        Self {
            blade_design,
            skew_angle,
        }
    }

    /// Resolves raw blade/skew values, rejecting pairs outside the test programme.
    pub fn resolve(blade_design: &str, skew_angle: &str) -> Result<Self, PipelineError> {
        let not_found = || PipelineError::ConfigurationNotFound {
            blade_design: blade_design.trim().to_string(),
            skew_angle: skew_angle.trim().to_string(),
        };
        let blade = BladeDesign::try_from(blade_design).map_err(|_| not_found())?;
        let skew = skew_angle
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|degrees| SkewAngle::try_from(degrees).ok())
            .ok_or_else(not_found)?;
        Ok(Self::new(blade, skew))
    }

    /// The six configurations of the full test programme.
    pub fn standard() -> Vec<Configuration> {
        BladeDesign::ALL
            .iter()
            .flat_map(|blade| {
                SkewAngle::ALL
                    .iter()
                    .map(move |skew| Configuration::new(*blade, *skew))
            })
            .collect()
    }

    pub fn output_file_name(&self) -> String {
        format!("{self}Output.csv")
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.blade_design, self.skew_angle)
    }
}

/// Accepts `QBlade:10` style identifiers.
impl FromStr for Configuration {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((blade, skew)) => Configuration::resolve(blade, skew),
            None => Err(PipelineError::ConfigurationNotFound {
                blade_design: s.trim().to_string(),
                skew_angle: String::new(),
            }),
        }
    }
}
