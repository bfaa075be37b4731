//! Trend Plotter Module
//! Renders monthly series as line charts with plotters and opens them.

use crate::data::YearMonth;
use crate::stats::MonthlyTable;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),
    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),
    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),
    #[error("Failed to open plot viewer for {}: {source}", path.display())]
    Viewer {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Colour of the first (target) series.
pub const PRIMARY_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue

pub const PALETTE: [RGBColor; 10] = [
    RGBColor(46, 204, 113), // Green
    RGBColor(231, 76, 60),  // Red
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(255, 87, 34),  // Deep Orange
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

/// Month labels beyond this count are thinned out by the mesh.
const MAX_X_LABELS: usize = 36;

/// One line of a trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Option<RGBColor>,
}

impl TrendSeries {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            color: None,
        }
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub months: Vec<YearMonth>,
    pub series: Vec<TrendSeries>,
}

impl TrendChart {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>, monthly: &MonthlyTable) -> Self {
        Self {
            title: title.into(),
            x_label: "Month".to_string(),
            y_label: y_label.into(),
            months: monthly.months(),
            series: Vec::new(),
        }
    }

    pub fn push(&mut self, series: TrendSeries) {
        self.series.push(series);
    }

    /// Check shape and return the padded y range.
    pub fn validate(&self) -> Result<(f64, f64)> {
        if self.months.is_empty() {
            return Err(PlotError::InvalidData("No months to plot".to_string()));
        }
        if self.series.is_empty() {
            return Err(PlotError::InvalidData("No series to plot".to_string()));
        }

        for s in &self.series {
            if s.values.len() != self.months.len() {
                return Err(PlotError::InvalidData(format!(
                    "Series '{}' has {} values for {} months",
                    s.label,
                    s.values.len(),
                    self.months.len()
                )));
            }
        }

        let (min, max) = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if min > max {
            return Err(PlotError::InvalidData(
                "Series contain no finite values".to_string(),
            ));
        }

        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        Ok((min - pad, max + pad))
    }
}

/// Creates trend line charts as PNG files.
#[derive(Debug, Clone)]
pub struct TrendPlotter {
    output_dir: PathBuf,
    width: u32,
    height: u32,
    open_plots: bool,
}

impl TrendPlotter {
    pub fn new(output_dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            width,
            height,
            open_plots: true,
        }
    }

    /// Whether rendered charts are handed to the system image viewer.
    pub fn with_open_plots(mut self, open_plots: bool) -> Self {
        self.open_plots = open_plots;
        self
    }

    /// Render `chart` to `<output_dir>/<file_name>` and show it.
    pub fn plot(&self, chart: &TrendChart, file_name: &str) -> Result<PathBuf> {
        chart.validate()?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        self.render(chart, &path)?;
        tracing::info!(path = %path.display(), title = %chart.title, "Chart rendered");

        if self.open_plots {
            open::that(&path).map_err(|source| PlotError::Viewer {
                path: path.clone(),
                source,
            })?;
        }

        Ok(path)
    }

    /// Draw the chart into a PNG at `output_path`.
    pub fn render(&self, chart: &TrendChart, output_path: &Path) -> Result<()> {
        let (y_min, y_max) = chart.validate()?;

        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let n = chart.months.len();
        let mut context = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(90)
            .y_label_area_size(100)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        let labels: Vec<String> = chart.months.iter().map(ToString::to_string).collect();
        let month_label = |x: &f64| -> String {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        };

        context
            .configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(n.min(MAX_X_LABELS))
            .x_label_formatter(&month_label)
            .x_label_style(
                ("sans-serif", 14)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .label_style(("sans-serif", 14))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        for (i, series) in chart.series.iter().enumerate() {
            let color = series.color.unwrap_or(PALETTE[i % PALETTE.len()]);
            let points: Vec<(f64, f64)> = series
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(x, &y)| (x as f64, y))
                .collect();

            context
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(|e| PlotError::Drawing(e.to_string()))?
                .label(series.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        context
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 14))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        Ok(())
    }
}
