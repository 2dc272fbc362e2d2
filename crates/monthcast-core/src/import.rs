//! CSV loader for monthly income/expense tables

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::config::ColumnConfig;
use crate::error::{Error, Result};
use crate::models::{Observation, Series};

/// Positions of the configured columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndices {
    period: usize,
    income: usize,
    expense: usize,
}

/// Parse a CSV table into a series, keeping row order.
///
/// Extra columns are ignored. Non-finite amounts (`NaN`, `inf`) are passed
/// through; the analysis rejects them.
pub fn parse_csv<R: Read>(reader: R, columns: &ColumnConfig) -> Result<Series> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let indices = locate_columns(&headers, columns)?;

    let mut observations = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let row = row + 1;

        let period = record
            .get(indices.period)
            .ok_or_else(|| missing_cell(row, &columns.period))?
            .to_string();

        let income_str = record
            .get(indices.income)
            .ok_or_else(|| missing_cell(row, &columns.income))?;
        let income = parse_amount(income_str)
            .map_err(|e| Error::Import(format!("Row {}, column '{}': {}", row, columns.income, e)))?;

        let expense_str = record
            .get(indices.expense)
            .ok_or_else(|| missing_cell(row, &columns.expense))?;
        let expense = parse_amount(expense_str).map_err(|e| {
            Error::Import(format!("Row {}, column '{}': {}", row, columns.expense, e))
        })?;

        observations.push(Observation {
            period,
            income,
            expense,
        });
    }

    debug!("Parsed {} observations", observations.len());
    Ok(Series::new(observations))
}

fn missing_cell(row: usize, column: &str) -> Error {
    Error::Import(format!("Row {} is missing a value for '{}'", row, column))
}

/// Find the configured columns in the header row (case-insensitive)
fn locate_columns(headers: &StringRecord, columns: &ColumnConfig) -> Result<ColumnIndices> {
    let find = |name: &str| -> Result<usize> {
        let wanted = name.trim();
        headers
            .iter()
            .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::Import(format!(
                    "Missing column '{}' (found: {})",
                    wanted,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ))
            })
    };

    Ok(ColumnIndices {
        period: find(&columns.period)?,
        income: find(&columns.income)?,
        expense: find(&columns.expense)?,
    })
}

/// Parse an amount string, handling currency symbols and commas
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '€', '£', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    if cleaned.is_empty() {
        return Err(Error::Import("empty amount".into()));
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ColumnConfig {
        ColumnConfig::default()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("-123.45").unwrap(), -123.45);
        assert_eq!(parse_amount("(100.00)").unwrap(), -100.00);
        assert_eq!(parse_amount(" 42 ").unwrap(), 42.0);
        assert!(parse_amount("").is_err());
        assert!(parse_amount("twelve").is_err());
    }

    #[test]
    fn test_parse_amount_non_finite_passes_through() {
        assert!(parse_amount("NaN").unwrap().is_nan());
        assert!(parse_amount("inf").unwrap().is_infinite());
    }

    #[test]
    fn test_parse_basic_table() {
        let csv = "Month,Income,Expenses\nJan,100,50\nFeb,200,30\nMar,150,80";

        let series = parse_csv(csv.as_bytes(), &columns()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.observations()[0], Observation::new("Jan", 100.0, 50.0));
        assert_eq!(series.observations()[2], Observation::new("Mar", 150.0, 80.0));
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let csv = "Notes,Expenses,Month,Income\nrent due,\"$1,200.00\",January,\"$3,000\"\n,900,February,3100";

        let series = parse_csv(csv.as_bytes(), &columns()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0].period, "January");
        assert_eq!(series.observations()[0].expense, 1200.0);
        assert_eq!(series.observations()[0].income, 3000.0);
        assert_eq!(series.observations()[1].expense, 900.0);
    }

    #[test]
    fn test_headers_case_insensitive_and_trimmed() {
        let csv = " month , INCOME ,expenses\nJan, 10 , 5";
        let series = parse_csv(csv.as_bytes(), &columns()).unwrap();
        assert_eq!(series.observations()[0], Observation::new("Jan", 10.0, 5.0));
    }

    #[test]
    fn test_byte_order_mark_in_header() {
        let csv = "\u{feff}Month,Income,Expenses\nJan,10,5";
        let series = parse_csv(csv.as_bytes(), &columns()).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_custom_column_names() {
        let custom = ColumnConfig {
            period: "Period".to_string(),
            income: "In".to_string(),
            expense: "Out".to_string(),
        };
        let csv = "Period,In,Out\nQ1,10,4";
        let series = parse_csv(csv.as_bytes(), &custom).unwrap();
        assert_eq!(series.observations()[0], Observation::new("Q1", 10.0, 4.0));
    }

    #[test]
    fn test_missing_column() {
        let csv = "Month,Income\nJan,100";
        let err = parse_csv(csv.as_bytes(), &columns()).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
        let msg = err.to_string();
        assert!(msg.contains("Expenses"));
        assert!(msg.contains("Month, Income"));
    }

    #[test]
    fn test_bad_amount_names_row_and_column() {
        let csv = "Month,Income,Expenses\nJan,100,50\nFeb,lots,30";
        let err = parse_csv(csv.as_bytes(), &columns()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Row 2"));
        assert!(msg.contains("Income"));
    }

    #[test]
    fn test_short_row() {
        let csv = "Month,Income,Expenses\nJan,100";
        let err = parse_csv(csv.as_bytes(), &columns()).unwrap_err();
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn test_header_only_is_empty_series() {
        let series = parse_csv("Month,Income,Expenses\n".as_bytes(), &columns()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_rows_keep_file_order() {
        // Periods are labels; they are not re-sorted chronologically
        let csv = "Month,Income,Expenses\nMar,3,1\nJan,1,1\nFeb,2,1";
        let series = parse_csv(csv.as_bytes(), &columns()).unwrap();
        let periods: Vec<&str> = series
            .observations()
            .iter()
            .map(|o| o.period.as_str())
            .collect();
        assert_eq!(periods, vec!["Mar", "Jan", "Feb"]);
    }
}
