//! Monthly Aggregator Module
//! Groups flight records by calendar month and reduces columns per month.

use crate::data::{FlightTable, YearMonth};
use rayon::prelude::*;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Required columns are missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("No columns requested")]
    NoColumns,
}

/// How a month's values collapse into one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Mean,
    Sum,
}

impl Reduction {
    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            Reduction::Mean => values.iter().mean(),
            Reduction::Sum => values.iter().sum(),
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Mean => f.write_str("mean"),
            Reduction::Sum => f.write_str("sum"),
        }
    }
}

/// One column to aggregate and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReduction {
    pub column: String,
    pub reduction: Reduction,
}

impl ColumnReduction {
    pub fn new(column: impl Into<String>, reduction: Reduction) -> Self {
        Self {
            column: column.into(),
            reduction,
        }
    }

    pub fn mean(column: impl Into<String>) -> Self {
        Self::new(column, Reduction::Mean)
    }

    pub fn sum(column: impl Into<String>) -> Self {
        Self::new(column, Reduction::Sum)
    }
}

/// Reduced values for a single calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub month: YearMonth,
    /// Number of source records in this month.
    pub count: usize,
    /// Reduced values aligned with [`MonthlyTable::columns`].
    pub values: Vec<f64>,
}

/// One row per month, ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTable {
    columns: Vec<String>,
    rows: Vec<MonthlyAggregate>,
}

impl MonthlyTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MonthlyAggregate] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn months(&self) -> Vec<YearMonth> {
        self.rows.iter().map(|r| r.month).collect()
    }

    /// Per-month values of one aggregated column.
    pub fn series(&self, column: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    pub fn get(&self, month: YearMonth, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.month == month)
            .map(|r| r.values[idx])
    }
}

/// Turns a cleaned [`FlightTable`] into per-month aggregates.
pub struct Aggregator;

impl Aggregator {
    /// Aggregate the requested columns by calendar month.
    ///
    /// Every missing column is reported at once; the table is only borrowed.
    pub fn aggregate(
        table: &FlightTable,
        requests: &[ColumnReduction],
    ) -> Result<MonthlyTable, AggregateError> {
        if requests.is_empty() {
            return Err(AggregateError::NoColumns);
        }

        let missing: Vec<String> = requests
            .iter()
            .filter(|r| !table.has_field(&r.column))
            .map(|r| r.column.clone())
            .collect();
        if !missing.is_empty() {
            return Err(AggregateError::MissingColumns(missing));
        }

        let indices: Vec<usize> = requests
            .iter()
            .filter_map(|r| table.field_index(&r.column).ok())
            .collect();

        let groups = Self::group_by_month(table);
        let records = table.records();

        // Use rayon for parallel computation, one task per column
        let reduced: Vec<Vec<f64>> = requests
            .par_iter()
            .zip(indices.par_iter())
            .map(|(request, &idx)| {
                groups
                    .iter()
                    .map(|(_, rows)| {
                        let values: Vec<f64> =
                            rows.iter().map(|&i| records[i].values[idx]).collect();
                        request.reduction.apply(&values)
                    })
                    .collect()
            })
            .collect();

        let rows = groups
            .iter()
            .enumerate()
            .map(|(g, (month, members))| MonthlyAggregate {
                month: *month,
                count: members.len(),
                values: reduced.iter().map(|column| column[g]).collect(),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            months = rows.len(),
            columns = requests.len(),
            "Aggregated by month"
        );

        Ok(MonthlyTable {
            columns: requests.iter().map(|r| r.column.clone()).collect(),
            rows,
        })
    }

    /// Record indices per month, months ascending, file order within a month.
    fn group_by_month(table: &FlightTable) -> Vec<(YearMonth, Vec<usize>)> {
        let mut groups: BTreeMap<YearMonth, Vec<usize>> = BTreeMap::new();
        for (i, record) in table.records().iter().enumerate() {
            groups.entry(record.year_month()).or_default().push(i);
        }
        groups.into_iter().collect()
    }
}
