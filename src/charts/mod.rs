//! Charts module - Chart rendering

mod plotter;

pub use plotter::{PlotError, TrendChart, TrendPlotter, TrendSeries, PALETTE, PRIMARY_COLOR};
