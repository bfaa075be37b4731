//! Analysis module - Comparisons and the runner that executes them

mod analyst;
mod comparison;

pub use analyst::{Analyst, ComparisonError, ComparisonRunner};
pub use comparison::{Comparison, ComparisonSpec, SeriesSpec};
