//! Error types for the admin client core.
//!
//! The query engine itself is infallible; these cover the remote boundary,
//! spreadsheet import, user input validation and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No scope selected")]
    MissingScope,
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unreadable spreadsheet: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Parse(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{field} must be less than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{field} cannot exceed {max}")]
    TooLarge { field: &'static str, max: f64 },

    #[error("{0} is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(&'static str),

    #[error("End date cannot be before start date")]
    EndBeforeStart,

    #[error("Maximum amount cannot be lower than minimum amount")]
    MaxBelowMin,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),

    #[error("Unknown spreadsheet date system: {0}")]
    InvalidDateSystem(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("The form has already been submitted")]
    AlreadyFinished,
}
