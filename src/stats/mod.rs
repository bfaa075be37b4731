//! Stats module - Monthly aggregation

mod aggregator;

pub use aggregator::{
    AggregateError, Aggregator, ColumnReduction, MonthlyAggregate, MonthlyTable, Reduction,
};
