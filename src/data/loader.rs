//! CSV Data Loader Module
//! Loads the traffic CSV with Polars, parses months and drops incomplete rows.

use crate::data::schema::{FlightRecord, FlightTable, SchemaError, MONTH_COLUMN};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Cell contents read as missing, matching the usual spreadsheet/pandas exports.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Row {row}: cannot parse month {value:?}, expected MM/YYYY")]
    InvalidMonth { row: usize, value: String },
}

/// Handles CSV file loading with Polars and row cleaning.
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    lenient_months: bool,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat unparseable months as missing instead of failing the load.
    pub fn with_lenient_months(mut self, lenient: bool) -> Self {
        self.lenient_months = lenient;
        self
    }

    /// Load a CSV file into a cleaned, month-sorted table.
    ///
    /// Column types are inferred from the whole file and a cell that does not
    /// fit its column fails the load.
    pub fn load_csv(&self, file_path: impl AsRef<Path>) -> Result<FlightTable, LoaderError> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(None)
            .with_null_values(Some(NullValues::AllColumns(
                NA_TOKENS.iter().map(|t| (*t).into()).collect(),
            )))
            .finish()?
            .collect()?;

        tracing::debug!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "CSV read"
        );

        self.clean(&df)
    }

    /// Convert a raw frame into a [`FlightTable`].
    ///
    /// A row is dropped when any of its cells is null (or NaN), whether or not
    /// that column ends up in the table.
    pub fn clean(&self, df: &DataFrame) -> Result<FlightTable, LoaderError> {
        let months = self.parse_months(df)?;
        let mut complete = vec![true; df.height()];

        let mut fields: Vec<String> = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = Vec::new();

        for column in df.get_columns() {
            let name = column.name().to_string();
            if name == MONTH_COLUMN {
                continue;
            }

            if Self::is_numeric(column.dtype()) {
                let value_f64 = column.cast(&DataType::Float64)?;
                let value_ca = value_f64.f64()?;
                let values: Vec<Option<f64>> = value_ca
                    .into_iter()
                    .map(|v| v.filter(|x| !x.is_nan()))
                    .collect();

                fields.push(name);
                columns.push(values);
            } else {
                if column.null_count() > 0 {
                    for (i, keep) in complete.iter_mut().enumerate() {
                        if column.get(i)?.is_null() {
                            *keep = false;
                        }
                    }
                }
                tracing::info!(column = %name, dtype = %column.dtype(), "Ignoring non-numeric column");
            }
        }

        let mut records = Vec::with_capacity(df.height());
        for (i, month) in months.into_iter().enumerate() {
            if !complete[i] {
                continue;
            }
            let Some(month) = month else {
                continue;
            };
            let Some(values) = columns.iter().map(|c| c[i]).collect::<Option<Vec<f64>>>() else {
                continue;
            };
            records.push(FlightRecord::new(month, values));
        }

        let dropped = df.height() - records.len();
        if dropped > 0 {
            tracing::info!(dropped, "Dropped rows with missing values");
        }

        Ok(FlightTable::new(fields, records)?)
    }

    fn parse_months(&self, df: &DataFrame) -> Result<Vec<Option<NaiveDate>>, LoaderError> {
        let column = df
            .column(MONTH_COLUMN)
            .map_err(|_| SchemaError::MissingField(MONTH_COLUMN.to_string()))?;

        let as_text = column.cast(&DataType::String)?;
        let series = as_text.as_materialized_series();
        let text_ca = series.str()?;

        text_ca
            .into_iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                None => Ok(None),
                Some(text) => match parse_month(text) {
                    Some(month) => Ok(Some(month)),
                    None if self.lenient_months => {
                        tracing::debug!(row = i + 1, value = text, "Unparseable month, dropping row");
                        Ok(None)
                    }
                    None => Err(LoaderError::InvalidMonth {
                        row: i + 1,
                        value: text.to_string(),
                    }),
                },
            })
            .collect()
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }
}

/// Parse an `MM/YYYY` cell into the first day of that month.
pub fn parse_month(text: &str) -> Option<NaiveDate> {
    let (month, year) = text.trim().split_once('/')?;
    let (month, year) = (month.trim(), year.trim());

    if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_accepts_mm_yyyy() {
        assert_eq!(parse_month("01/2021"), NaiveDate::from_ymd_opt(2021, 1, 1));
        assert_eq!(parse_month(" 12/1999 "), NaiveDate::from_ymd_opt(1999, 12, 1));
        assert_eq!(parse_month("7/2020"), NaiveDate::from_ymd_opt(2020, 7, 1));
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert_eq!(parse_month("13/2021"), None);
        assert_eq!(parse_month("00/2021"), None);
        assert_eq!(parse_month("2021-01"), None);
        assert_eq!(parse_month("01/21"), None);
        assert_eq!(parse_month("Jan/2021"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = DataLoader::new()
            .load_csv("/definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }
}
