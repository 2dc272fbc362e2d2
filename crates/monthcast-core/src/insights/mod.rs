//! Insight Extractor - Descriptive Statistics
//!
//! Scans a series for its highest and lowest income and expense periods and
//! derives the per-period balance (income minus expense). No fitting happens
//! here; the projection lives in [`crate::trend`].
//!
//! ## Usage
//!
//! ```rust
//! use monthcast_core::insights::extract_insights;
//! use monthcast_core::models::{Observation, Series};
//!
//! let series = Series::new(vec![
//!     Observation::new("Jan", 100.0, 50.0),
//!     Observation::new("Feb", 200.0, 30.0),
//! ]);
//! let insights = extract_insights(&series).unwrap();
//! assert_eq!(insights.extrema.max_income.period, "Feb");
//! ```

pub mod extrema;
pub mod types;

pub use extrema::{extract_insights, extrema_report, find_extremum};
pub use types::{ExtremaReport, ExtremeKind, Extremum, Insights};
