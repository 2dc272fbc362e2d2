//! The analysis pass
//!
//! One pass takes a freshly loaded series and produces everything the UI
//! shows: both forecasts, the projected balance, the extrema and the balance
//! sequence. Passes keep no state; hosts re-run the whole pass on every
//! upload.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ForecastConfig;
use crate::error::{Error, Result};
use crate::insights::{extract_insights, ExtremaReport};
use crate::models::{Series, Variable};
use crate::trend::{Forecast, TrendModel};

/// Forecast for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendForecast {
    pub variable: Variable,
    #[serde(flatten)]
    pub forecast: Forecast,
}

impl TrendForecast {
    pub fn value(&self) -> f64 {
        self.forecast.value
    }
}

/// Result of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub series: Series,
    /// Income minus expense per observation, in series order
    pub balances: Vec<f64>,
    pub income: TrendForecast,
    pub expense: TrendForecast,
    /// Predicted income minus predicted expense
    pub projected_balance: f64,
    pub extrema: ExtremaReport,
}

impl Analysis {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn forecast_for(&self, variable: Variable) -> &TrendForecast {
        match variable {
            Variable::Income => &self.income,
            Variable::Expense => &self.expense,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs analysis passes with a fixed forecasting configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    model: TrendModel,
}

impl Analyzer {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            model: TrendModel::with_single_point_policy(config.single_point),
        }
    }

    /// Run a full pass. Any failure abandons the pass.
    pub fn analyze(&self, series: &Series) -> Result<Analysis> {
        series.validate()?;

        let income = self.forecast(series, Variable::Income)?;
        let expense = self.forecast(series, Variable::Expense)?;
        let insights = extract_insights(series)?;

        let projected_balance = income.value() - expense.value();
        if !projected_balance.is_finite() || insights.balances.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidInput(
                "balance is out of the representable range".into(),
            ));
        }

        debug!(
            "Analyzed {} observations: income forecast {:.2}, expense forecast {:.2}",
            series.len(),
            income.value(),
            expense.value()
        );

        Ok(Analysis {
            series: series.clone(),
            balances: insights.balances,
            income,
            expense,
            projected_balance,
            extrema: insights.extrema,
        })
    }

    fn forecast(&self, series: &Series, variable: Variable) -> Result<TrendForecast> {
        let forecast = self.model.forecast(&series.values(variable))?;
        Ok(TrendForecast { variable, forecast })
    }
}

/// Run a pass with the default configuration
pub fn analyze(series: &Series) -> Result<Analysis> {
    Analyzer::default().analyze(series)
}
