//! Configuration for column mapping, forecasting and display
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. An explicit path (e.g. `--config`); a missing file is an error
//! 2. Otherwise the user override (~/.config/monthcast/config.toml on Linux),
//!    if it exists
//! 3. Otherwise the embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::trend::SinglePointPolicy;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/monthcast.toml");

/// CSV header names for the three required columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub period: String,
    pub income: String,
    pub expense: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            period: "Month".to_string(),
            income: "Income".to_string(),
            expense: "Expenses".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub single_point: SinglePointPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Symbol prefixed to amounts in reports
    pub currency: String,
    /// Label of the predicted point in trend charts
    pub next_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            next_label: "Next".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Format an amount with the currency symbol and two decimals
    pub fn money(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.currency, amount.abs())
        } else {
            format!("{}{:.2}", self.currency, amount)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub columns: ColumnConfig,
    pub forecast: ForecastConfig,
    pub display: DisplayConfig,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Embedded => write!(f, "built-in defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// Load configuration (explicit path, then user override, then embedded default)
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded)),
        }
    }

    fn load_file(path: &Path) -> Result<(Self, ConfigSource)> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        debug!("Loading config from {}", path.display());
        let config = parse_config(&content)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Serialize back to TOML (for `monthcast config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("monthcast").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    columns: Option<RawColumns>,
    forecast: Option<RawForecast>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawColumns {
    period: Option<String>,
    income: Option<String>,
    expense: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    single_point: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
    next_label: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(columns) = raw.columns {
        if let Some(period) = columns.period {
            config.columns.period = period;
        }
        if let Some(income) = columns.income {
            config.columns.income = income;
        }
        if let Some(expense) = columns.expense {
            config.columns.expense = expense;
        }
    }

    if let Some(forecast) = raw.forecast {
        if let Some(policy) = forecast.single_point {
            config.forecast.single_point = policy.parse().map_err(Error::Config)?;
        }
    }

    if let Some(display) = raw.display {
        if let Some(currency) = display.currency {
            config.display.currency = currency;
        }
        if let Some(next_label) = display.next_label {
            config.display.next_label = next_label;
        }
    }

    Ok(config)
}
