use csv::StringRecord;
use polars::prelude::*;

use crate::errors::ParserError;
use crate::model::OscilloscopeChannel;

use super::schema::{
    OSCILLOSCOPE_HEADER_ROW, OSCILLOSCOPE_SKIPPED_ROWS, OSCILLOSCOPE_TIME_COLUMN,
    OSCILLOSCOPE_VOLT_COLUMN,
};
use super::{parse_required_f64, reader_builder};

pub struct OscilloscopeParser;

impl Default for OscilloscopeParser {
    fn default() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy)]
struct ChannelColumns {
    time: usize,
    volt: usize,
}

impl OscilloscopeParser {
    const NAME: &'static str = "OSCILLOSCOPE";

    fn locate_columns(header: &StringRecord) -> Result<ChannelColumns, ParserError> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|field| field == column)
                .ok_or(ParserError::MissingColumn {
                    parser: Self::NAME,
                    row_index: OSCILLOSCOPE_HEADER_ROW,
                    column,
                })
        };

        Ok(ChannelColumns {
            time: find(OSCILLOSCOPE_TIME_COLUMN)?,
            volt: find(OSCILLOSCOPE_VOLT_COLUMN)?,
        })
    }

    fn field<'r>(
        record: &'r StringRecord,
        index: usize,
        line_index: usize,
        column: &str,
    ) -> Result<&'r str, ParserError> {
        record.get(index).ok_or_else(|| ParserError::DataRow {
            parser: Self::NAME,
            line_index,
            message: format!("missing value for column '{column}'"),
        })
    }

    pub fn parse(&self, content: &str) -> Result<OscilloscopeChannel, ParserError> {
        let mut reader = reader_builder().from_reader(content.as_bytes());

        let mut columns: Option<ChannelColumns> = None;
        let mut seconds = Vec::new();
        let mut volts = Vec::new();

        for (row_index, record) in reader.records().enumerate() {
            let record = record.map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;

            if row_index == OSCILLOSCOPE_HEADER_ROW {
                columns = Some(Self::locate_columns(&record)?);
                continue;
            }
            if OSCILLOSCOPE_SKIPPED_ROWS.contains(&row_index) {
                continue;
            }

            let layout = columns.ok_or(ParserError::MissingHeader {
                parser: Self::NAME,
                row_index: OSCILLOSCOPE_HEADER_ROW,
            })?;

            let time = Self::field(&record, layout.time, row_index, OSCILLOSCOPE_TIME_COLUMN)?;
            let volt = Self::field(&record, layout.volt, row_index, OSCILLOSCOPE_VOLT_COLUMN)?;
            seconds.push(parse_required_f64(
                Self::NAME,
                time,
                row_index,
                OSCILLOSCOPE_TIME_COLUMN,
            )?);
            volts.push(parse_required_f64(
                Self::NAME,
                volt,
                row_index,
                OSCILLOSCOPE_VOLT_COLUMN,
            )?);
        }

        if columns.is_none() {
            return Err(ParserError::MissingHeader {
                parser: Self::NAME,
                row_index: OSCILLOSCOPE_HEADER_ROW,
            });
        }
        if seconds.is_empty() {
            return Err(ParserError::EmptyData { parser: Self::NAME });
        }

        let df = DataFrame::new(vec![
            Series::new(OSCILLOSCOPE_TIME_COLUMN.into(), seconds).into(),
            Series::new(OSCILLOSCOPE_VOLT_COLUMN.into(), volts).into(),
        ])
        .map_err(|err| ParserError::Validation {
            parser: Self::NAME,
            message: format!("failed to build channel dataframe: {err}"),
        })?;

        Ok(OscilloscopeChannel { df })
    }
}
