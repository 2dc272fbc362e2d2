//! Extremum and balance scans over a series

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Series, Variable};

use super::types::{ExtremaReport, ExtremeKind, Extremum, Insights};

/// Find the highest or lowest observation for one column.
///
/// Ties resolve to the earliest row.
pub fn find_extremum(series: &Series, variable: Variable, kind: ExtremeKind) -> Result<Extremum> {
    let mut rows = series.indexed();
    let (first_index, first) = rows
        .next()
        .ok_or_else(|| Error::InvalidInput("extrema are undefined for an empty series".into()))?;

    let mut best_index = first_index;
    let mut best = first;
    for (index, obs) in rows {
        if kind.beats(variable.value_of(obs), variable.value_of(best)) {
            best_index = index;
            best = obs;
        }
    }

    Ok(Extremum::from_observation(variable, kind, best_index, best))
}

/// Build the four-way extrema report
pub fn extrema_report(series: &Series) -> Result<ExtremaReport> {
    series.validate()?;

    Ok(ExtremaReport {
        max_income: find_extremum(series, Variable::Income, ExtremeKind::Highest)?,
        min_income: find_extremum(series, Variable::Income, ExtremeKind::Lowest)?,
        max_expense: find_extremum(series, Variable::Expense, ExtremeKind::Highest)?,
        min_expense: find_extremum(series, Variable::Expense, ExtremeKind::Lowest)?,
    })
}

/// Extrema plus the per-period balance sequence
pub fn extract_insights(series: &Series) -> Result<Insights> {
    let extrema = extrema_report(series)?;
    let balances = series.balances();

    debug!(
        "Extracted insights over {} observations (max income: {}, max expense: {})",
        series.len(),
        extrema.max_income.period,
        extrema.max_expense.period
    );

    Ok(Insights { extrema, balances })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;

    fn quarter() -> Series {
        Series::new(vec![
            Observation::new("Jan", 100.0, 50.0),
            Observation::new("Feb", 200.0, 30.0),
            Observation::new("Mar", 150.0, 80.0),
        ])
    }

    #[test]
    fn test_extrema_selects_expected_periods() {
        let report = extrema_report(&quarter()).unwrap();

        assert_eq!(report.max_income.period, "Feb");
        assert_eq!(report.max_income.value, 200.0);
        assert_eq!(report.min_income.period, "Jan");
        assert_eq!(report.min_income.value, 100.0);
        assert_eq!(report.max_expense.period, "Mar");
        assert_eq!(report.max_expense.value, 80.0);
        assert_eq!(report.min_expense.period, "Feb");
        assert_eq!(report.min_expense.value, 30.0);

        assert_eq!(report.max_expense.index, 3);
        assert_eq!(report.min_expense.kind, ExtremeKind::Lowest);
        assert_eq!(report.min_expense.variable, Variable::Expense);
    }

    #[test]
    fn test_balances_in_order() {
        let insights = extract_insights(&quarter()).unwrap();
        assert_eq!(insights.balances, vec![50.0, 170.0, 70.0]);
    }

    #[test]
    fn test_ties_pick_first_occurrence() {
        let series = Series::new(vec![
            Observation::new("A", 100.0, 0.0),
            Observation::new("B", 100.0, 0.0),
        ]);

        for _ in 0..10 {
            let report = extrema_report(&series).unwrap();
            assert_eq!(report.max_income.period, "A");
            assert_eq!(report.min_income.period, "A");
            assert_eq!(report.max_expense.period, "A");
            assert_eq!(report.min_expense.period, "A");
        }
    }

    #[test]
    fn test_tie_after_a_better_value() {
        let series = Series::new(vec![
            Observation::new("A", 10.0, 5.0),
            Observation::new("B", 90.0, 1.0),
            Observation::new("C", 90.0, 1.0),
        ]);
        let report = extrema_report(&series).unwrap();
        assert_eq!(report.max_income.period, "B");
        assert_eq!(report.min_expense.period, "B");
    }

    #[test]
    fn test_empty_series_rejected() {
        let err = extract_insights(&Series::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = find_extremum(&Series::default(), Variable::Income, ExtremeKind::Highest)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_rejected() {
        let series = Series::new(vec![
            Observation::new("Jan", 1.0, 2.0),
            Observation::new("Feb", f64::INFINITY, 2.0),
        ]);
        assert!(matches!(
            extract_insights(&series),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_single_observation_is_every_extremum() {
        let series = Series::new(vec![Observation::new("X", 500.0, 200.0)]);
        let report = extrema_report(&series).unwrap();
        assert!(report.iter().all(|e| e.period == "X" && e.index == 1));
    }

    #[test]
    fn test_negative_values() {
        let series = Series::new(vec![
            Observation::new("Jan", -10.0, -5.0),
            Observation::new("Feb", -20.0, -1.0),
        ]);
        let report = extrema_report(&series).unwrap();
        assert_eq!(report.max_income.period, "Jan");
        assert_eq!(report.min_income.period, "Feb");
        assert_eq!(report.max_expense.period, "Feb");
        assert_eq!(report.min_expense.period, "Jan");
    }
}
