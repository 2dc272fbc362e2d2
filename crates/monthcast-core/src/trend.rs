//! Trend Model
//!
//! Ordinary least-squares line through `(index, value)` pairs where the index
//! is the 1-based row position, extrapolated one step past the last row.
//!
//! Income and expense are fitted by separate invocations; nothing is shared
//! between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How to treat a series with a single observation, where the slope is undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinglePointPolicy {
    /// Zero slope through the single value (forecast repeats it)
    #[default]
    Flat,
    /// Fail with [`Error::DegenerateFit`]
    Reject,
}

impl SinglePointPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinglePointPolicy::Flat => "flat",
            SinglePointPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for SinglePointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SinglePointPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "flat" => Ok(SinglePointPolicy::Flat),
            "reject" => Ok(SinglePointPolicy::Reject),
            _ => Err(format!("Unknown single-point policy: {}", s)),
        }
    }
}

/// Least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedLine {
    /// Evaluate the line at a (1-based) index
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// A fitted line together with its one-step-ahead prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub line: FittedLine,
    /// Index the prediction was made at (`N + 1`)
    pub index: usize,
    pub value: f64,
}

/// Fits and extrapolates a single variable
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendModel {
    single_point: SinglePointPolicy,
}

impl TrendModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_single_point_policy(policy: SinglePointPolicy) -> Self {
        Self {
            single_point: policy,
        }
    }

    pub fn single_point_policy(&self) -> SinglePointPolicy {
        self.single_point
    }

    /// Fit the least-squares line over `x = 1..=N`
    pub fn fit(&self, values: &[f64]) -> Result<FittedLine> {
        check_values(values)?;

        let n = values.len() as f64;
        let mean_x = (n + 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = (i + 1) as f64 - mean_x;
            cov += dx * (y - mean_y);
            var += dx * dx;
        }

        // var(x) is zero only when N == 1
        if var == 0.0 {
            return match self.single_point {
                SinglePointPolicy::Flat => Ok(FittedLine {
                    slope: 0.0,
                    intercept: mean_y,
                }),
                SinglePointPolicy::Reject => Err(Error::DegenerateFit(
                    "slope is undefined for a single observation".into(),
                )),
            };
        }

        let slope = cov / var;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(Error::InvalidInput(
                "values are too large to fit a trend".into(),
            ));
        }
        Ok(FittedLine { slope, intercept })
    }

    /// Fit, then predict the value at index `N + 1`
    pub fn forecast(&self, values: &[f64]) -> Result<Forecast> {
        let line = self.fit(values)?;
        let index = values.len() + 1;
        let value = line.predict(index as f64);
        if !value.is_finite() {
            return Err(Error::InvalidInput(
                "forecast is out of the representable range".into(),
            ));
        }
        Ok(Forecast { line, index, value })
    }
}

fn check_values(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InvalidInput("cannot fit a trend to no values".into()));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "non-finite value {} at row {}",
            values[pos],
            pos + 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_exact_linear_forecast() {
        let model = TrendModel::new();
        for n in 2..=24 {
            let values: Vec<f64> = (1..=n).map(|i| 3.0 * i as f64 + 2.0).collect();
            let forecast = model.forecast(&values).unwrap();
            let expected = 3.0 * (n + 1) as f64 + 2.0;
            assert!(
                (forecast.value - expected).abs() < EPS,
                "n={}: got {}, expected {}",
                n,
                forecast.value,
                expected
            );
            assert!((forecast.line.slope - 3.0).abs() < EPS);
            assert!((forecast.line.intercept - 2.0).abs() < EPS);
            assert_eq!(forecast.index, n + 1);
        }
    }

    #[test]
    fn test_noisy_fit_matches_closed_form() {
        // x = 1..4, y = [1, 3, 2, 5]: slope = 1.1, intercept = 0.0
        let line = TrendModel::new().fit(&[1.0, 3.0, 2.0, 5.0]).unwrap();
        assert!((line.slope - 1.1).abs() < EPS);
        assert!(line.intercept.abs() < EPS);
        assert!((line.predict(5.0) - 5.5).abs() < EPS);
    }

    #[test]
    fn test_overflowing_values_are_invalid() {
        let model = TrendModel::new();
        let err = model.fit(&[-f64::MAX, f64::MAX]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        // The line itself is finite but the next point is not
        let err = model.forecast(&[0.0, f64::MAX / 2.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_constant_series_is_flat() {
        let forecast = TrendModel::new().forecast(&[42.0, 42.0, 42.0]).unwrap();
        assert!(forecast.line.slope.abs() < EPS);
        assert!((forecast.value - 42.0).abs() < EPS);
    }

    #[test]
    fn test_empty_values_rejected() {
        let err = TrendModel::new().forecast(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let model = TrendModel::new();
        assert!(matches!(
            model.fit(&[1.0, f64::NAN]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            model.fit(&[f64::NEG_INFINITY, 1.0]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_single_point_flat() {
        let forecast = TrendModel::new().forecast(&[500.0]).unwrap();
        assert_eq!(forecast.line.slope, 0.0);
        assert_eq!(forecast.value, 500.0);
        assert_eq!(forecast.index, 2);
    }

    #[test]
    fn test_single_point_reject() {
        let model = TrendModel::with_single_point_policy(SinglePointPolicy::Reject);
        let err = model.forecast(&[500.0]).unwrap_err();
        assert!(matches!(err, Error::DegenerateFit(_)));

        // Two points are always fine under either policy
        assert!(model.forecast(&[1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("flat".parse::<SinglePointPolicy>(), Ok(SinglePointPolicy::Flat));
        assert_eq!(
            "reject".parse::<SinglePointPolicy>(),
            Ok(SinglePointPolicy::Reject)
        );
        assert!("zero".parse::<SinglePointPolicy>().is_err());
    }
}
