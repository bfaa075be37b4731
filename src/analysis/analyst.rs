//! Comparison Runner
//! Aggregates the shared table for one comparison and hands the chart to the plotter.

use crate::analysis::Comparison;
use crate::charts::{PlotError, TrendPlotter};
use crate::data::FlightTable;
use crate::stats::AggregateError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// Executes a comparison; the menu only knows this seam.
pub trait ComparisonRunner {
    fn run(&mut self, comparison: Comparison) -> Result<PathBuf, ComparisonError>;
}

/// Runs comparisons against a table loaded once at startup.
pub struct Analyst<'a> {
    table: &'a FlightTable,
    plotter: TrendPlotter,
    delay_column: Option<String>,
}

impl<'a> Analyst<'a> {
    pub fn new(table: &'a FlightTable, plotter: TrendPlotter) -> Self {
        Self {
            table,
            plotter,
            delay_column: None,
        }
    }

    pub fn with_delay_column(mut self, delay_column: Option<String>) -> Self {
        self.delay_column = delay_column;
        self
    }
}

impl ComparisonRunner for Analyst<'_> {
    fn run(&mut self, comparison: Comparison) -> Result<PathBuf, ComparisonError> {
        let spec = comparison.spec(self.table, self.delay_column.as_deref());
        let monthly = spec.aggregate(self.table)?;
        tracing::debug!(?comparison, months = monthly.len(), reduction = %spec.reduction, "Comparison aggregated");

        let chart = spec.chart(&monthly);
        Ok(self.plotter.plot(&chart, comparison.file_name())?)
    }
}
