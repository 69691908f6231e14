//! Error types for cartco

use thiserror::Error;

use crate::validation::ValidationError;

/// Message surfaced when the service fails without a usable `detail`
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to estimate TCO";

#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No response was obtained (connect failure, DNS, timeout)
    #[error(
        "Could not reach the estimation service at {base_url}. Check that it is running and try again."
    )]
    Network { base_url: String, reason: String },

    /// The service answered with a non-2xx status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The service answered 2xx but the body did not match the result contract
    #[error("Received an unreadable response from the estimation service: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors detected locally, before the network was touched
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status of a server-reported failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
