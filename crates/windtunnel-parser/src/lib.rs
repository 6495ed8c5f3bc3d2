pub mod errors;
pub mod formats;
pub mod model;

pub use errors::ParserError;
pub use formats::{BalanceParser, OscilloscopeParser, RunNameParser};
pub use model::{BalanceRun, OscilloscopeChannel, Resistance, RunMetadata};

/// Parses one oscilloscope channel export (the fixed 12-row preamble variant).
pub fn parse_oscilloscope_channel(content: &str) -> Result<OscilloscopeChannel, ParserError> {
    OscilloscopeParser.parse(content)
}

/// Parses one headerless force-balance run recorded under `file_name`.
pub fn parse_balance_run(file_name: &str, content: &str) -> Result<BalanceRun, ParserError> {
    BalanceParser.parse(file_name, content)
}

/// Decomposes a balance file name into its run metadata fields.
pub fn parse_run_name(file_name: &str) -> Result<RunMetadata, ParserError> {
    RunNameParser.parse(file_name)
}

#[cfg(test)]
mod tests;
