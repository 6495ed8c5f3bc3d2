use std::collections::HashMap;

use once_cell::sync::Lazy;
use windtunnel_parser::Resistance;

use crate::error::{PipelineError, Result};
use crate::types::{BladeDesign, Configuration, SkewAngle};

/// Label of the oscilloscope time axis, always the first column.
pub const TIME_AXIS_LABEL: &str = "second";

const TWELVE_LOAD_SWEEP: [f64; 12] = [50.0, 25.0, 10.0, 8.0, 6.0, 4.0, 2.0, 0.8, 0.6, 0.4, 0.2, 0.0];

const QBLADE_20_SWEEP: [f64; 19] = [
    100.0, 50.0, 25.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.8, 0.6, 0.4, 0.2, 0.1,
    0.0,
];

const THAT_20_SWEEP: [f64; 14] = [
    100.0, 50.0, 25.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0,
];

/// Ordered resistance loads swept during one configuration, in recording order.
#[derive(Debug, Clone, PartialEq)]
pub struct TestMatrixEntry {
    resistances: Vec<Resistance>,
}

impl TestMatrixEntry {
    pub fn new(resistances: Vec<Resistance>) -> std::result::Result<Self, String> {
        if resistances.is_empty() {
            return Err("test matrix entry lists no resistances".to_string());
        }
        for (idx, resistance) in resistances.iter().enumerate() {
            if resistances[..idx].contains(resistance) {
                return Err(format!("resistance {resistance} is listed more than once"));
            }
        }
        Ok(Self { resistances })
    }

    pub fn from_ohms(ohms: &[f64]) -> std::result::Result<Self, String> {
        let resistances = ohms
            .iter()
            .map(|value| Resistance::new(*value))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::new(resistances)
    }

    pub fn resistances(&self) -> &[Resistance] {
        &self.resistances
    }

    /// Time axis plus one label per resistance.
    pub fn label_count(&self) -> usize {
        self.resistances.len() + 1
    }

    pub fn labels(&self) -> Vec<String> {
        std::iter::once(TIME_AXIS_LABEL.to_string())
            .chain(self.resistances.iter().map(Resistance::to_string))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestMatrix {
    entries: HashMap<Configuration, TestMatrixEntry>,
}

static STANDARD: Lazy<TestMatrix> = Lazy::new(|| {
    use BladeDesign::*;
    use SkewAngle::*;

    let sweeps: [(BladeDesign, SkewAngle, &[f64]); 6] = [
        (QBlade, Zero, &TWELVE_LOAD_SWEEP),
        (QBlade, Ten, &TWELVE_LOAD_SWEEP),
        (QBlade, Twenty, &QBLADE_20_SWEEP),
        (That, Zero, &TWELVE_LOAD_SWEEP),
        (That, Ten, &TWELVE_LOAD_SWEEP),
        (That, Twenty, &THAT_20_SWEEP),
    ];

    let mut matrix = TestMatrix::default();
    for (blade, skew, ohms) in sweeps {
        let entry = TestMatrixEntry::from_ohms(ohms).expect("standard sweep literals are valid");
        matrix.insert(Configuration::new(blade, skew), entry);
    }
    matrix
});

impl TestMatrix {
    /// The sweeps run in the March 2024 tunnel campaign.
    pub fn standard() -> &'static TestMatrix {
        &STANDARD
    }

    pub fn insert(&mut self, configuration: Configuration, entry: TestMatrixEntry) {
        self.entries.insert(configuration, entry);
    }

    pub fn with_entry(mut self, configuration: Configuration, entry: TestMatrixEntry) -> Self {
        self.insert(configuration, entry);
        self
    }

    pub fn lookup(&self, configuration: Configuration) -> Result<&TestMatrixEntry> {
        self.entries
            .get(&configuration)
            .ok_or_else(|| PipelineError::ConfigurationNotFound {
                blade_design: configuration.blade_design.to_string(),
                skew_angle: configuration.skew_angle.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
