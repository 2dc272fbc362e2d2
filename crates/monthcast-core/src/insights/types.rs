//! Core types for the Insight Extractor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Observation, Variable};

/// Direction of an extremum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremeKind {
    Highest,
    Lowest,
}

impl ExtremeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtremeKind::Highest => "highest",
            ExtremeKind::Lowest => "lowest",
        }
    }

    /// Whether `candidate` strictly beats `current` in this direction.
    ///
    /// Strictness keeps the first occurrence on ties.
    pub fn beats(&self, candidate: f64, current: f64) -> bool {
        match self {
            ExtremeKind::Highest => candidate > current,
            ExtremeKind::Lowest => candidate < current,
        }
    }
}

impl fmt::Display for ExtremeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExtremeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highest" => Ok(ExtremeKind::Highest),
            "lowest" => Ok(ExtremeKind::Lowest),
            _ => Err(format!("Unknown extreme kind: {}", s)),
        }
    }
}

/// The observation selected as an extremum of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub variable: Variable,
    pub kind: ExtremeKind,
    /// 1-based position in the series
    pub index: usize,
    pub period: String,
    pub value: f64,
}

impl Extremum {
    pub(crate) fn from_observation(
        variable: Variable,
        kind: ExtremeKind,
        index: usize,
        obs: &Observation,
    ) -> Self {
        Self {
            variable,
            kind,
            index,
            period: obs.period.clone(),
            value: variable.value_of(obs),
        }
    }
}

/// Highest and lowest income and expense records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremaReport {
    pub max_income: Extremum,
    pub min_income: Extremum,
    pub max_expense: Extremum,
    pub min_expense: Extremum,
}

impl ExtremaReport {
    /// All four extrema, income first
    pub fn iter(&self) -> impl Iterator<Item = &Extremum> {
        [
            &self.max_income,
            &self.min_income,
            &self.max_expense,
            &self.min_expense,
        ]
        .into_iter()
    }
}

/// Output of the Insight Extractor for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub extrema: ExtremaReport,
    /// Income minus expense for every observation, in series order
    pub balances: Vec<f64>,
}
