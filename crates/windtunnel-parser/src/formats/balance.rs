use polars::prelude::*;

use crate::errors::ParserError;
use crate::model::BalanceRun;

use super::schema::BALANCE_COLUMNS;
use super::{parse_optional_f64, reader_builder};

pub struct BalanceParser;

impl Default for BalanceParser {
    fn default() -> Self {
        Self
    }
}

impl BalanceParser {
    const NAME: &'static str = "BALANCE";

    pub fn parse(&self, file_name: &str, content: &str) -> Result<BalanceRun, ParserError> {
        let mut reader = reader_builder().from_reader(content.as_bytes());
        let mut channels: Vec<Vec<Option<f64>>> = vec![Vec::new(); BALANCE_COLUMNS.len()];

        for (line_index, record) in reader.records().enumerate() {
            let record = record.map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;

            if record.len() != BALANCE_COLUMNS.len() {
                return Err(ParserError::FieldCount {
                    parser: Self::NAME,
                    line_index,
                    expected: BALANCE_COLUMNS.len(),
                    found: record.len(),
                });
            }

            for ((values, column), raw) in channels.iter_mut().zip(BALANCE_COLUMNS).zip(&record) {
                values.push(parse_optional_f64(Self::NAME, raw, line_index, column)?);
            }
        }

        if channels[0].is_empty() {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        let columns: Vec<Column> = channels
            .into_iter()
            .zip(BALANCE_COLUMNS)
            .map(|(values, name)| Series::new(name.into(), values).into())
            .collect();

        let df = DataFrame::new(columns).map_err(|err| ParserError::Validation {
            parser: Self::NAME,
            message: format!("failed to build balance dataframe: {err}"),
        })?;

        Ok(BalanceRun {
            file_name: file_name.to_string(),
            df,
        })
    }
}
