//! Monthcast Core Library
//!
//! Shared functionality for the Monthcast income and expense forecaster:
//! - CSV loader for monthly income/expense tables
//! - Trend model (least-squares fit, one-step-ahead forecast)
//! - Insight extractor (extrema and per-period balance)
//! - Analysis pass combining both for one upload
//! - SVG trend charts
//! - TOML configuration with user overrides

pub mod analysis;
pub mod chart;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod trend;

pub use analysis::{analyze, Analysis, Analyzer, TrendForecast};
pub use chart::{ChartPoint, TrendChart};
pub use config::{ColumnConfig, Config, ConfigSource, DisplayConfig, ForecastConfig};
pub use error::{Error, Result};
pub use import::parse_csv;
pub use insights::{extract_insights, ExtremaReport, ExtremeKind, Extremum, Insights};
pub use models::{Observation, Series, Variable};
pub use trend::{FittedLine, Forecast, SinglePointPolicy, TrendModel};
