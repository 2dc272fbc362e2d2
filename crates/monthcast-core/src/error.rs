//! Error types for Monthcast

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Empty series or non-finite values reaching the trend model or insight extractor
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Single observation under the `reject` single-point policy
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error was caused by the uploaded data rather than the host
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::DegenerateFit(_) | Error::Import(_) | Error::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
