use crate::core::policy::PolicyViolation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CinemaError {
    #[error("Cinema registration rejected: {0}")]
    RegistrationRejected(#[from] PolicyViolation),

    #[error("Cinema not found: {name}")]
    CinemaNotFound { name: String },

    #[error("Film '{film}' is not showing in cinema '{cinema}'")]
    FilmNotFound { cinema: String, film: String },

    #[error("Seats already booked: {}", .busy_seats.join(", "))]
    SeatsBusy { busy_seats: Vec<String> },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Snapshot error: {message}")]
    SnapshotError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected response {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Storage,
    Network,
}

impl CinemaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CinemaError::RegistrationRejected(_) | CinemaError::InvalidRequest { .. } => {
                ErrorCategory::Validation
            }
            CinemaError::CinemaNotFound { .. } | CinemaError::FilmNotFound { .. } => {
                ErrorCategory::NotFound
            }
            CinemaError::SeatsBusy { .. } => ErrorCategory::Conflict,
            CinemaError::ConfigError { .. }
            | CinemaError::ConfigValidationError { .. }
            | CinemaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CinemaError::SnapshotError { .. }
            | CinemaError::IoError(_)
            | CinemaError::SerializationError(_) => ErrorCategory::Storage,
            CinemaError::ApiError(_) | CinemaError::UnexpectedResponse { .. } => {
                ErrorCategory::Network
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Could not access stored cinema data: {}", self),
            ErrorCategory::Network => format!("Could not reach the cinema service: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file and command line flags"
            }
            ErrorCategory::Storage => {
                "Check that the data directory exists and the snapshot file is valid JSON"
            }
            ErrorCategory::Network => "Check that the server is running and the base URL is correct",
            ErrorCategory::Conflict => "Retry with the seats that are not listed as busy",
            ErrorCategory::NotFound => "List the registered cinemas and films first",
            ErrorCategory::Validation => "Fix the request body and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, CinemaError>;
