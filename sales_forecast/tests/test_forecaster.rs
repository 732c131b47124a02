use approx::assert_relative_eq;
use rstest::rstest;
use sales_forecast::{
    simple_forecast, simple_forecast_from_strs, ForecastConfig, ForecastError, GapPolicy,
    MonthlySeries, SalesRecord, TrendForecaster, YearMonth,
};

fn record(date: &str, revenue: f64) -> SalesRecord {
    SalesRecord::parse(date, revenue).unwrap()
}

fn three_month_ramp() -> Vec<SalesRecord> {
    vec![
        record("2024-01-10", 100.0),
        record("2024-02-10", 200.0),
        record("2024-03-10", 300.0),
    ]
}

#[test]
fn test_exact_line_is_extended() {
    let forecast = simple_forecast(&three_month_ramp(), 2).unwrap();
    assert_eq!(forecast, vec![400.0, 500.0]);
}

#[test]
fn test_same_month_records_are_summed() {
    let records = vec![
        record("2024-01-03", 50.0),
        record("2024-01-28", 70.0),
        record("2024-02-14", 140.0),
    ];

    let series = MonthlySeries::from_records(&records, GapPolicy::SkipAbsent);
    assert_eq!(series.len(), 2);
    assert_eq!(series.totals(), vec![120.0, 140.0]);

    // Line through (0, 120) and (1, 140)
    let forecast = simple_forecast(&records, 1).unwrap();
    assert_relative_eq!(forecast[0], 160.0);
}

#[test]
fn test_input_order_does_not_matter() {
    let mut records = three_month_ramp();
    records.reverse();
    assert_eq!(simple_forecast(&records, 2).unwrap(), vec![400.0, 500.0]);
}

#[test]
fn test_single_month_is_insufficient() {
    let records = vec![record("2024-05-01", 10.0), record("2024-05-20", 30.0)];
    assert!(matches!(
        simple_forecast(&records, 3),
        Err(ForecastError::InsufficientData { needed: 2, got: 1 })
    ));
}

#[test]
fn test_empty_input_is_insufficient() {
    assert!(matches!(
        simple_forecast(&[], 3),
        Err(ForecastError::InsufficientData { needed: 2, got: 0 })
    ));
}

#[test]
fn test_zero_periods_is_invalid() {
    assert!(matches!(
        simple_forecast(&three_month_ramp(), 0),
        Err(ForecastError::InvalidArgument(_))
    ));
}

#[test]
fn test_unparseable_date_is_parse_error() {
    let rows = [("2024-01-01", 10.0), ("the first of feb", 20.0)];
    assert!(matches!(
        simple_forecast_from_strs(&rows, 2),
        Err(ForecastError::ParseError(_))
    ));
}

#[test]
fn test_forecast_from_strs() {
    let rows = [
        ("2024-01-01", 100.0),
        ("2024-02-01", 200.0),
        ("2024-03-01", 300.0),
    ];
    assert_eq!(
        simple_forecast_from_strs(&rows, 2).unwrap(),
        vec![400.0, 500.0]
    );
}

#[rstest]
#[case(1)]
#[case(6)]
#[case(24)]
fn test_output_length_matches_periods(#[case] periods: usize) {
    let forecast = simple_forecast(&three_month_ramp(), periods).unwrap();
    assert_eq!(forecast.len(), periods);
}

#[rstest]
#[case(GapPolicy::SkipAbsent, vec![100.0, 300.0], 500.0)]
#[case(GapPolicy::FillZero, vec![100.0, 0.0, 300.0], 1000.0 / 3.0)]
fn test_gap_policy(
    #[case] gap_policy: GapPolicy,
    #[case] expected_totals: Vec<f64>,
    #[case] expected_next: f64,
) {
    // No sales in February
    let records = vec![record("2024-01-15", 100.0), record("2024-03-15", 300.0)];
    let forecaster = TrendForecaster::new(ForecastConfig {
        periods: 1,
        gap_policy,
        floor_at_zero: false,
    });

    assert_eq!(forecaster.monthly_series(&records).totals(), expected_totals);

    let result = forecaster.forecast(&records).unwrap();
    assert_relative_eq!(result.values()[0], expected_next, epsilon = 1e-9);
    assert_eq!(result.months(), &[YearMonth::new(2024, 4).unwrap()]);
}

#[test]
fn test_floor_at_zero_policy() {
    let records = vec![
        record("2024-01-15", 300.0),
        record("2024-02-15", 200.0),
        record("2024-03-15", 100.0),
    ];

    let raw = simple_forecast(&records, 3).unwrap();
    assert_eq!(raw, vec![0.0, -100.0, -200.0]);

    let floored = TrendForecaster::new(ForecastConfig {
        periods: 3,
        gap_policy: GapPolicy::SkipAbsent,
        floor_at_zero: true,
    })
    .forecast(&records)
    .unwrap();
    assert_eq!(floored.values(), &[0.0, 0.0, 0.0]);
}

#[test]
fn test_result_carries_fit_parameters() {
    let result = TrendForecaster::new(ForecastConfig::with_periods(2))
        .forecast(&three_month_ramp())
        .unwrap();

    assert_eq!(result.horizons(), 2);
    assert_eq!(result.slope(), 100.0);
    assert_eq!(result.intercept(), 100.0);
    assert_relative_eq!(result.r_squared().unwrap(), 1.0);

    let json = result.to_json().unwrap();
    assert!(json.contains("\"slope\""));
    assert!(json.contains("\"year\": 2024"));
}

#[test]
fn test_year_boundary_labels() {
    let records = vec![record("2023-11-02", 10.0), record("2023-12-02", 20.0)];
    let result = TrendForecaster::new(ForecastConfig::with_periods(2))
        .forecast(&records)
        .unwrap();

    let labels: Vec<String> = result.months().iter().map(|m| m.to_string()).collect();
    assert_eq!(labels, vec!["2024-01", "2024-02"]);
    assert_eq!(result.values(), &[30.0, 40.0]);
}

#[rstest]
#[case(usize::MAX)]
#[case(sales_forecast::config::MAX_PERIODS + 1)]
fn test_oversized_horizon_is_invalid(#[case] periods: usize) {
    let records = vec![record("2024-01-01", 100.0), record("2024-02-01", 200.0)];
    assert!(matches!(
        simple_forecast(&records, periods),
        Err(ForecastError::InvalidArgument(_))
    ));
}

#[test]
fn test_longest_horizon_is_accepted() {
    let periods = sales_forecast::config::MAX_PERIODS;
    let forecast = simple_forecast(&three_month_ramp(), periods).unwrap();
    assert_eq!(forecast.len(), periods);
}

#[test]
fn test_overflowing_month_total_is_data_error() {
    let records = vec![
        record("2024-01-05", f64::MAX),
        record("2024-01-20", f64::MAX),
        record("2024-02-05", 10.0),
    ];

    match simple_forecast(&records, 2) {
        Err(ForecastError::DataError(msg)) => assert!(msg.contains("2024-01"), "{}", msg),
        other => panic!("Expected DataError, got {:?}", other),
    }
}
