//! Comparison Definitions
//! The three monthly trend comparisons offered by the menu.

use crate::charts::{TrendChart, TrendSeries, PALETTE, PRIMARY_COLOR};
use crate::data::{FlightTable, MONTH_COLUMN, PASSENGERS_CARRIED, TOTAL_CARGO, WEIGHT_LOAD_FACTOR};
use crate::stats::{AggregateError, Aggregator, ColumnReduction, MonthlyTable, Reduction};
use plotters::style::RGBColor;

/// A named comparison selectable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Weight load factor against every other numeric column, monthly mean.
    LoadFactorVsOthers,
    /// Total cargo against passengers carried, monthly sum.
    CargoVsPassengers,
    /// Monthly mean load factor, with delays when available.
    LoadFactorTrend,
}

impl Comparison {
    pub const ALL: [Comparison; 3] = [
        Comparison::LoadFactorVsOthers,
        Comparison::CargoVsPassengers,
        Comparison::LoadFactorTrend,
    ];

    pub fn menu_label(self) -> &'static str {
        match self {
            Comparison::LoadFactorVsOthers => "Compare Weight Load Factor with Other Factors",
            Comparison::CargoVsPassengers => "Compare Cargo vs Passengers Trends",
            Comparison::LoadFactorTrend => "Compare Flight Delays with Load Factor",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Comparison::LoadFactorVsOthers => "load_factor_vs_others.png",
            Comparison::CargoVsPassengers => "cargo_vs_passengers.png",
            Comparison::LoadFactorTrend => "load_factor_trend.png",
        }
    }

    /// Resolve the comparison against the columns `table` actually has.
    pub fn spec(self, table: &FlightTable, delay_column: Option<&str>) -> ComparisonSpec {
        match self {
            Comparison::LoadFactorVsOthers => {
                let mut series = vec![SeriesSpec::new(WEIGHT_LOAD_FACTOR, WEIGHT_LOAD_FACTOR)
                    .with_color(PRIMARY_COLOR)];
                series.extend(
                    table
                        .fields()
                        .iter()
                        .filter(|f| f.as_str() != WEIGHT_LOAD_FACTOR)
                        .map(|f| SeriesSpec::new(f.as_str(), f.as_str())),
                );

                ComparisonSpec {
                    title: format!("Comparison of {WEIGHT_LOAD_FACTOR} with Other Factors Over Time"),
                    y_label: "Values".to_string(),
                    reduction: Reduction::Mean,
                    series,
                }
            }
            Comparison::CargoVsPassengers => ComparisonSpec {
                title: "Comparison of Total Cargo and Passengers Over Time".to_string(),
                y_label: "Total (Cargo / Passengers)".to_string(),
                reduction: Reduction::Sum,
                series: vec![
                    SeriesSpec::new(TOTAL_CARGO, "Total Cargo").with_color(PRIMARY_COLOR),
                    SeriesSpec::new(PASSENGERS_CARRIED, "Total Passengers").with_color(PALETTE[0]),
                ],
            },
            Comparison::LoadFactorTrend => {
                let load_factor =
                    SeriesSpec::new(WEIGHT_LOAD_FACTOR, "Load Factor (%)").with_color(PRIMARY_COLOR);

                match delay_column.filter(|c| table.has_field(c)) {
                    Some(delay) => ComparisonSpec {
                        title: "Comparison of Flight Delays with Load Factor Over Time".to_string(),
                        y_label: "Load Factor (%) / Delays".to_string(),
                        reduction: Reduction::Mean,
                        series: vec![load_factor, SeriesSpec::new(delay, delay).with_color(PALETTE[1])],
                    },
                    None => {
                        if let Some(delay) = delay_column {
                            tracing::info!(column = delay, "Delay column not present, plotting load factor only");
                        }
                        ComparisonSpec {
                            title: "Load Factor Over Time".to_string(),
                            y_label: "Load Factor (%)".to_string(),
                            reduction: Reduction::Mean,
                            series: vec![load_factor],
                        }
                    }
                }
            }
        }
    }
}

/// One plotted column: source field, legend label and optional colour.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub column: String,
    pub label: String,
    pub color: Option<RGBColor>,
}

impl SeriesSpec {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Declarative description of a comparison: which columns, how reduced, how drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSpec {
    pub title: String,
    pub y_label: String,
    pub reduction: Reduction,
    pub series: Vec<SeriesSpec>,
}

impl ComparisonSpec {
    /// The time axis; months are parsed once at load.
    pub fn time_column(&self) -> &'static str {
        MONTH_COLUMN
    }

    pub fn requests(&self) -> Vec<ColumnReduction> {
        self.series
            .iter()
            .map(|s| ColumnReduction::new(s.column.as_str(), self.reduction))
            .collect()
    }

    pub fn aggregate(&self, table: &FlightTable) -> Result<MonthlyTable, AggregateError> {
        Aggregator::aggregate(table, &self.requests())
    }

    /// Build the chart for an aggregate produced by [`ComparisonSpec::aggregate`].
    pub fn chart(&self, monthly: &MonthlyTable) -> TrendChart {
        let mut chart = TrendChart::new(self.title.as_str(), self.y_label.as_str(), monthly);
        chart.x_label = self.time_column().to_string();

        for spec in &self.series {
            let Some(values) = monthly.series(&spec.column) else {
                continue;
            };
            let mut series = TrendSeries::new(spec.label.as_str(), values);
            if let Some(color) = spec.color {
                series = series.with_color(color);
            }
            chart.push(series);
        }

        chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FlightRecord, YearMonth};
    use chrono::NaiveDate;

    fn sample_table() -> FlightTable {
        let fields = vec![
            WEIGHT_LOAD_FACTOR.to_string(),
            TOTAL_CARGO.to_string(),
            PASSENGERS_CARRIED.to_string(),
        ];
        let jan = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
        FlightTable::new(
            fields,
            vec![
                FlightRecord::new(jan, vec![70.0, 100.0, 1000.0]),
                FlightRecord::new(jan, vec![80.0, 200.0, 2000.0]),
                FlightRecord::new(feb, vec![60.0, 50.0, 500.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cargo_vs_passengers_sums_per_month() {
        let table = sample_table();
        let spec = Comparison::CargoVsPassengers.spec(&table, None);
        let monthly = spec.aggregate(&table).unwrap();

        let jan = YearMonth::new(2021, 1);
        let feb = YearMonth::new(2021, 2);
        assert_eq!(monthly.get(jan, TOTAL_CARGO), Some(300.0));
        assert_eq!(monthly.get(jan, PASSENGERS_CARRIED), Some(3000.0));
        assert_eq!(monthly.get(feb, TOTAL_CARGO), Some(50.0));
        assert_eq!(monthly.get(feb, PASSENGERS_CARRIED), Some(500.0));
    }

    #[test]
    fn test_load_factor_trend_means_per_month() {
        let table = sample_table();
        let spec = Comparison::LoadFactorTrend.spec(&table, None);
        let monthly = spec.aggregate(&table).unwrap();

        let values = monthly.series(WEIGHT_LOAD_FACTOR).unwrap();
        assert!((values[0] - 75.0).abs() < 1e-9);
        assert!((values[1] - 60.0).abs() < 1e-9);
        assert_eq!(spec.series.len(), 1);
    }

    #[test]
    fn test_load_factor_vs_others_covers_every_field() {
        let table = sample_table();
        let spec = Comparison::LoadFactorVsOthers.spec(&table, None);

        let columns: Vec<&str> = spec.series.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(columns, vec![WEIGHT_LOAD_FACTOR, TOTAL_CARGO, PASSENGERS_CARRIED]);
        assert_eq!(spec.reduction, Reduction::Mean);

        let chart = spec.chart(&spec.aggregate(&table).unwrap());
        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[0].color, Some(PRIMARY_COLOR));
        assert_eq!(chart.x_label, MONTH_COLUMN);
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn test_missing_target_column_is_reported() {
        let jan = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let table = FlightTable::new(
            vec![TOTAL_CARGO.to_string()],
            vec![FlightRecord::new(jan, vec![1.0])],
        )
        .unwrap();

        let err = Comparison::CargoVsPassengers
            .spec(&table, None)
            .aggregate(&table)
            .unwrap_err();
        assert_eq!(
            err,
            AggregateError::MissingColumns(vec![PASSENGERS_CARRIED.to_string()])
        );

        let err = Comparison::LoadFactorVsOthers
            .spec(&table, None)
            .aggregate(&table)
            .unwrap_err();
        assert_eq!(
            err,
            AggregateError::MissingColumns(vec![WEIGHT_LOAD_FACTOR.to_string()])
        );
    }

    #[test]
    fn test_delay_column_used_only_when_present() {
        let table = sample_table();

        let spec = Comparison::LoadFactorTrend.spec(&table, Some("Delay"));
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.title, "Load Factor Over Time");

        let spec = Comparison::LoadFactorTrend.spec(&table, Some(TOTAL_CARGO));
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[1].column, TOTAL_CARGO);
    }
}
