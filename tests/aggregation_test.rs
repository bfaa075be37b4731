//! Tests for monthly aggregation and the comparison scenarios

mod common;

use chrono::NaiveDate;
use flight_traffic::analysis::Comparison;
use flight_traffic::data::{
    DataLoader, FlightRecord, FlightTable, YearMonth, PASSENGERS_CARRIED, TOTAL_CARGO,
    WEIGHT_LOAD_FACTOR,
};
use flight_traffic::stats::{AggregateError, Aggregator, ColumnReduction};
use proptest::prelude::*;

#[test]
fn test_cargo_vs_passengers_from_csv() {
    let csv = common::sample_csv();
    let table = DataLoader::new().load_csv(csv.path()).unwrap();

    let monthly = Comparison::CargoVsPassengers
        .spec(&table, None)
        .aggregate(&table)
        .unwrap();

    assert_eq!(
        monthly.months(),
        vec![YearMonth::new(2021, 1), YearMonth::new(2021, 2)]
    );
    assert_eq!(monthly.series(TOTAL_CARGO).unwrap(), vec![300.0, 50.0]);
    assert_eq!(monthly.series(PASSENGERS_CARRIED).unwrap(), vec![3000.0, 500.0]);
}

#[test]
fn test_load_factor_trend_from_csv() {
    let csv = common::sample_csv();
    let table = DataLoader::new().load_csv(csv.path()).unwrap();

    let monthly = Comparison::LoadFactorTrend
        .spec(&table, None)
        .aggregate(&table)
        .unwrap();
    let values = monthly.series(WEIGHT_LOAD_FACTOR).unwrap();

    assert_eq!(values.len(), 2);
    assert!((values[0] - 75.0).abs() < 1e-9);
    assert!((values[1] - 60.0).abs() < 1e-9);
}

#[test]
fn test_missing_columns_leave_table_untouched() {
    let csv = common::write_csv("Month,Total CC", &["01/2021,5", "02/2021,6"]);
    let table = DataLoader::new().load_csv(csv.path()).unwrap();
    let before = table.clone();

    for comparison in Comparison::ALL {
        let err = comparison.spec(&table, None).aggregate(&table).unwrap_err();
        assert!(matches!(err, AggregateError::MissingColumns(_)));
    }
    assert_eq!(table, before);
}

fn single_month_table(values: &[f64]) -> FlightTable {
    let jan = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let records = values
        .iter()
        .map(|&v| FlightRecord::new(jan, vec![v]))
        .collect();
    FlightTable::new(vec!["x".to_string()], records).unwrap()
}

proptest! {
    #[test]
    fn prop_mean_matches_arithmetic_mean(values in prop::collection::vec(-1e6f64..1e6, 1..60)) {
        let table = single_month_table(&values);
        let monthly = Aggregator::aggregate(&table, &[ColumnReduction::mean("x")]).unwrap();

        let expected = values.iter().sum::<f64>() / values.len() as f64;
        let got = monthly.series("x").unwrap()[0];
        prop_assert!((got - expected).abs() <= 1e-6 * expected.abs().max(1.0));
    }

    #[test]
    fn prop_sum_matches_exact_sum(values in prop::collection::vec(0u32..1_000_000, 1..60)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let table = single_month_table(&values);
        let monthly = Aggregator::aggregate(&table, &[ColumnReduction::sum("x")]).unwrap();

        prop_assert_eq!(monthly.series("x").unwrap()[0], values.iter().sum::<f64>());
        prop_assert_eq!(monthly.rows()[0].count, values.len());
    }

    #[test]
    fn prop_one_row_per_month_ascending(months in prop::collection::vec((2015i32..2025, 1u32..=12), 1..50)) {
        let records = months
            .iter()
            .map(|&(y, m)| FlightRecord::new(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), vec![1.0]))
            .collect();
        let table = FlightTable::new(vec!["x".to_string()], records).unwrap();
        let monthly = Aggregator::aggregate(&table, &[ColumnReduction::sum("x")]).unwrap();

        let keys = monthly.months();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let total: f64 = monthly.series("x").unwrap().iter().sum();
        prop_assert_eq!(total as usize, months.len());
    }
}
