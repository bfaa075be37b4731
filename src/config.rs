//! Application Configuration
//! JSON settings file with defaults; CLI flags override individual fields.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Chart size must be non-zero, got {width}x{height}")]
    ChartSize { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV file with the monthly statistics.
    pub data_path: PathBuf,
    /// Directory rendered charts are written to.
    pub output_dir: PathBuf,
    /// Open each chart in the system image viewer after rendering.
    pub open_plots: bool,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Drop rows with unparseable months instead of failing the load.
    pub lenient_months: bool,
    /// Optional delay column plotted next to the load factor.
    pub delay_column: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("DGCA_DATA.csv"),
            output_dir: PathBuf::from("plots"),
            open_plots: true,
            chart_width: 1200,
            chart_height: 800,
            lenient_months: false,
            delay_column: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigError::ChartSize {
                width: self.chart_width,
                height: self.chart_height,
            });
        }
        Ok(())
    }
}
