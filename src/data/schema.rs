//! Flight Table Schema
//! Typed representation of the cleaned monthly traffic table.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use thiserror::Error;

/// Month column, formatted `MM/YYYY` in the source file.
pub const MONTH_COLUMN: &str = "Month";
/// Weight load factor in percent.
pub const WEIGHT_LOAD_FACTOR: &str = "Weight Load Factor %";
/// Total cargo carried.
pub const TOTAL_CARGO: &str = "Total CC";
/// Passengers carried.
pub const PASSENGERS_CARRIED: &str = "No Carried(P)";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Record has {found} values but the table has {expected} fields")]
    RecordWidth { expected: usize, found: usize },
}

/// Calendar month key; the day of month is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the source file after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    /// Always the 1st of the month.
    pub month: NaiveDate,
    /// Numeric values aligned with [`FlightTable::fields`].
    pub values: Vec<f64>,
}

impl FlightRecord {
    pub fn new(month: NaiveDate, values: Vec<f64>) -> Self {
        Self { month, values }
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::from(self.month)
    }
}

/// Cleaned, chronologically sorted flight statistics.
///
/// Built once at startup and only ever borrowed afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightTable {
    fields: Vec<String>,
    records: Vec<FlightRecord>,
}

impl FlightTable {
    /// Build a table, checking every record against the field list.
    ///
    /// Records are stably sorted by month so equal months keep file order.
    pub fn new(fields: Vec<String>, mut records: Vec<FlightRecord>) -> Result<Self, SchemaError> {
        if let Some(bad) = records.iter().find(|r| r.values.len() != fields.len()) {
            return Err(SchemaError::RecordWidth {
                expected: fields.len(),
                found: bad.values.len(),
            });
        }

        records.sort_by_key(|r| r.month);
        Ok(Self { fields, records })
    }

    /// Numeric field names in file order (the month column is not a field).
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Position of a field in each record's values.
    pub fn field_index(&self, name: &str) -> Result<usize, SchemaError> {
        self.fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| SchemaError::MissingField(name.to_string()))
    }

    /// All values of one field, in record order.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, SchemaError> {
        let idx = self.field_index(name)?;
        Ok(self.records.iter().map(|r| r.values[idx]).collect())
    }

    /// Earliest and latest month, if any rows survived cleaning.
    pub fn month_span(&self) -> Option<(YearMonth, YearMonth)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.year_month(), last.year_month()))
    }
}
