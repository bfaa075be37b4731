//! Data module - CSV loading and the flight table schema

mod loader;
mod schema;

pub use loader::{parse_month, DataLoader, LoaderError};
pub use schema::{
    FlightRecord, FlightTable, SchemaError, YearMonth, MONTH_COLUMN, PASSENGERS_CARRIED,
    TOTAL_CARGO, WEIGHT_LOAD_FACTOR,
};
