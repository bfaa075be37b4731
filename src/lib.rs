//! Flight Traffic - Monthly civil-aviation traffic trends
//!
//! Loads a monthly statistics CSV, aggregates columns by calendar month and
//! renders comparison charts from an interactive menu.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod menu;
pub mod stats;
