use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Which upstream provider an aggregation failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSide {
    Fact,
    Image,
}

impl fmt::Display for ProviderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSide::Fact => f.write_str("fact"),
            ProviderSide::Image => f.write_str("image"),
        }
    }
}

/// Why an outbound call did not produce a usable response.
#[derive(Error, Debug)]
pub enum TransportFailure {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("cancelled")]
    Cancelled,
}

/// Failures raised by a single provider client call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("cannot build request for '{location}': {reason}")]
    RequestConstruction { location: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportFailure,
    },

    #[error("cannot decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no image returned by {url}")]
    EmptyResult { url: String },
}

impl ProviderError {
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ProviderError::Transport {
                source: TransportFailure::Cancelled,
                ..
            }
        )
    }
}

#[derive(Error, Debug)]
pub enum CatError {
    #[error("{parameter} was not provided")]
    MissingDependency { parameter: &'static str },

    #[error("get image and fact: {side} provider failed: {source}")]
    Aggregation {
        side: ProviderSide,
        #[source]
        source: ProviderError,
    },

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CatError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            CatError::MissingDependency { parameter } => {
                format!("Internal wiring error: {} is missing", parameter)
            }
            CatError::Aggregation { side, .. } => {
                format!("The {} provider is unavailable, try again later", side)
            }
            CatError::HttpClientError(_) => "Could not set up the outbound HTTP client".to_string(),
            CatError::IoError(e) => format!("I/O failure: {}", e),
            CatError::ConfigError { message } => format!("Configuration problem: {}", message),
            CatError::InvalidConfigValueError { field, reason, .. } => {
                format!("Check '{}' in your configuration: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatError>;
