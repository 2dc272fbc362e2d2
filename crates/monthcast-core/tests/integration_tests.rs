//! Integration tests for monthcast-core
//!
//! These tests exercise the full CSV → analysis → chart workflow.

use monthcast_core::{
    analysis::Analyzer,
    chart::TrendChart,
    config::{parse_config, Config},
    import::parse_csv,
    Error, SinglePointPolicy,
};

/// A half year of household numbers with a steady income raise
fn half_year_csv() -> &'static str {
    r#"Month,Income,Expenses
January,"$3,000.00",2100
February,"$3,100.00",2450
March,"$3,200.00",1980
April,"$3,300.00",2600
May,"$3,400.00",2300
June,"$3,500.00",2210"#
}

#[test]
fn test_full_workflow() {
    let config = Config::default();
    let series = parse_csv(half_year_csv().as_bytes(), &config.columns).expect("parse CSV");
    assert_eq!(series.len(), 6);

    let analysis = Analyzer::new(&config.forecast)
        .analyze(&series)
        .expect("analyze series");

    // Income grows by exactly 100 per month
    assert!((analysis.income.value() - 3600.0).abs() < 1e-9);
    assert!((analysis.income.forecast.line.slope - 100.0).abs() < 1e-9);

    assert_eq!(analysis.extrema.max_income.period, "June");
    assert_eq!(analysis.extrema.min_income.period, "January");
    assert_eq!(analysis.extrema.max_expense.period, "April");
    assert_eq!(analysis.extrema.min_expense.period, "March");

    assert_eq!(analysis.balances[0], 900.0);
    assert_eq!(analysis.balances[3], 700.0);
    assert!(
        (analysis.projected_balance - (analysis.income.value() - analysis.expense.value())).abs()
            < 1e-12
    );

    let [expense_chart, income_chart] = TrendChart::pair(&analysis, &config.display);
    assert_eq!(expense_chart.actual.len(), 6);
    assert!(income_chart.to_svg().contains(">June</text>"));
}

#[test]
fn test_custom_columns_from_config() {
    let config = parse_config(
        r#"
[columns]
period = "Period"
income = "Earned"
expense = "Spent"
"#,
    )
    .unwrap();

    let csv = "Period,Spent,Earned\nW1,10,20\nW2,12,22";
    let series = parse_csv(csv.as_bytes(), &config.columns).unwrap();
    let analysis = Analyzer::new(&config.forecast).analyze(&series).unwrap();

    assert!((analysis.income.value() - 24.0).abs() < 1e-9);
    assert!((analysis.expense.value() - 14.0).abs() < 1e-9);
}

#[test]
fn test_header_only_file_is_invalid_input() {
    let config = Config::default();
    let series = parse_csv("Month,Income,Expenses\n".as_bytes(), &config.columns).unwrap();

    let err = Analyzer::new(&config.forecast)
        .analyze(&series)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(err.is_input_error());
}

#[test]
fn test_nan_cell_is_invalid_input() {
    let config = Config::default();
    let csv = "Month,Income,Expenses\nJan,100,50\nFeb,NaN,30";
    let series = parse_csv(csv.as_bytes(), &config.columns).unwrap();

    let err = Analyzer::new(&config.forecast)
        .analyze(&series)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_single_row_policies() {
    let csv = "Month,Income,Expenses\nX,500,200";
    let config = Config::default();
    let series = parse_csv(csv.as_bytes(), &config.columns).unwrap();

    let flat = Analyzer::new(&config.forecast).analyze(&series).unwrap();
    assert_eq!(flat.income.value(), 500.0);
    assert_eq!(flat.expense.value(), 200.0);

    let mut strict = config.forecast;
    strict.single_point = SinglePointPolicy::Reject;
    let err = Analyzer::new(&strict).analyze(&series).unwrap_err();
    assert!(matches!(err, Error::DegenerateFit(_)));
}

#[test]
fn test_malformed_file_is_import_error() {
    let config = Config::default();
    let err = parse_csv("Date,Amount\n2024-01-01,5".as_bytes(), &config.columns).unwrap_err();
    assert!(matches!(err, Error::Import(_)));
}
