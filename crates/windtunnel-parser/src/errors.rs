use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{parser} CSV error: {source}")]
    Csv {
        parser: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{parser} header row {row_index} is missing column '{column}'")]
    MissingColumn {
        parser: &'static str,
        row_index: usize,
        column: &'static str,
    },

    #[error("{parser} file ended before header row {row_index}")]
    MissingHeader {
        parser: &'static str,
        row_index: usize,
    },

    #[error("{parser} data row {line_index} invalid: {message}")]
    DataRow {
        parser: &'static str,
        line_index: usize,
        message: String,
    },

    #[error("{parser} data row {line_index} has {found} fields, expected {expected}")]
    FieldCount {
        parser: &'static str,
        line_index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{parser} validation error: {message}")]
    Validation {
        parser: &'static str,
        message: String,
    },

    #[error("{parser} file did not contain any data rows")]
    EmptyData { parser: &'static str },

    #[error("{parser} field '{field}' invalid: {message}")]
    FileName {
        parser: &'static str,
        field: &'static str,
        message: String,
    },
}
