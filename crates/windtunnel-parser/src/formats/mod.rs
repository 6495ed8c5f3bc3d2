mod balance;
mod common;
mod oscilloscope;
mod run_name;
pub mod schema;

pub use balance::BalanceParser;
pub use oscilloscope::OscilloscopeParser;
pub use run_name::RunNameParser;

pub(crate) use common::{parse_optional_f64, parse_required_f64, reader_builder};
