pub mod balance;
pub mod calculator;
pub mod error;
mod files;
pub mod oscilloscope;
pub mod outputs;
pub mod plot;
pub mod processing;
pub mod settings;
pub mod test_matrix;
pub mod types;

pub use error::{PipelineError, Result};
pub use types::{BladeDesign, Configuration, SkewAngle};
pub use windtunnel_parser::Resistance;
