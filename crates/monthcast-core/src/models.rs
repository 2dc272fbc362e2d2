//! Data models for Monthcast

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of the uploaded table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Opaque period label (usually a month name)
    pub period: String,
    pub income: f64,
    pub expense: f64,
}

impl Observation {
    pub fn new(period: impl Into<String>, income: f64, expense: f64) -> Self {
        Self {
            period: period.into(),
            income,
            expense,
        }
    }

    /// Net balance for this period (income minus expense)
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Which column of the series a computation runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Income,
    Expense,
}

impl Variable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variable::Income => "income",
            Variable::Expense => "expense",
        }
    }

    /// Human-readable label used in charts and reports
    pub fn label(&self) -> &'static str {
        match self {
            Variable::Income => "Income",
            Variable::Expense => "Expenses",
        }
    }

    pub fn value_of(&self, obs: &Observation) -> f64 {
        match self {
            Variable::Income => obs.income,
            Variable::Expense => obs.expense,
        }
    }
}

/// Ordered observations for one upload.
///
/// Row order is the time axis: the observation at position `i` has index `i + 1`.
/// Periods are never parsed or re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Observations paired with their 1-based positional index
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Observation)> {
        self.observations.iter().enumerate().map(|(i, o)| (i + 1, o))
    }

    /// Values of one column, in series order
    pub fn values(&self, variable: Variable) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| variable.value_of(o))
            .collect()
    }

    pub fn incomes(&self) -> Vec<f64> {
        self.values(Variable::Income)
    }

    pub fn expenses(&self) -> Vec<f64> {
        self.values(Variable::Expense)
    }

    /// Per-period balance, in series order
    pub fn balances(&self) -> Vec<f64> {
        self.observations.iter().map(Observation::balance).collect()
    }

    /// Reject empty series and non-finite values
    pub fn validate(&self) -> Result<()> {
        if self.observations.is_empty() {
            return Err(Error::InvalidInput("series is empty".into()));
        }
        for (index, obs) in self.indexed() {
            if !obs.income.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "non-finite income {} for '{}' (row {})",
                    obs.income, obs.period, index
                )));
            }
            if !obs.expense.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "non-finite expense {} for '{}' (row {})",
                    obs.expense, obs.period, index
                )));
            }
        }
        Ok(())
    }
}

impl From<Vec<Observation>> for Series {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

impl FromIterator<Observation> for Series {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        Series::new(vec![
            Observation::new("Jan", 100.0, 50.0),
            Observation::new("Feb", 200.0, 30.0),
            Observation::new("Mar", 150.0, 80.0),
        ])
    }

    #[test]
    fn test_indexed_is_one_based() {
        let series = sample();
        let indices: Vec<usize> = series.indexed().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_balances() {
        assert_eq!(sample().balances(), vec![50.0, 170.0, 70.0]);
    }

    #[test]
    fn test_values_by_variable() {
        let series = sample();
        assert_eq!(series.incomes(), vec![100.0, 200.0, 150.0]);
        assert_eq!(series.expenses(), vec![50.0, 30.0, 80.0]);
    }

    #[test]
    fn test_validate_empty() {
        let err = Series::default().validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_validate_non_finite() {
        let series = Series::new(vec![
            Observation::new("Jan", 100.0, 50.0),
            Observation::new("Feb", f64::NAN, 30.0),
        ]);
        let err = series.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("Feb"));

        let series = Series::new(vec![Observation::new("Jan", 1.0, f64::INFINITY)]);
        assert!(series.validate().is_err());
    }

    #[test]
    fn test_variable_serializes_snake_case() {
        let json = serde_json::to_string(&Variable::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }
}
