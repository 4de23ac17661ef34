//! Error type definitions for the now-playing service
//!
//! Errors here never leave the aggregation service as failures of the public
//! operations; they are converted into `error` fields on the payloads.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Page fetching specific errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Request did not complete within the client timeout or aggregation deadline
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// The request could not be sent or the body could not be read
    #[error("Request failed: {url} - {message}")]
    Transport { url: String, message: String },

    /// Non-success HTTP status from the source
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// The body could not be decoded as text
    #[error("Decode error: {url} - {message}")]
    Decode { url: String, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create a transport error
    pub fn transport<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Classify a reqwest failure for the given URL
    pub fn from_reqwest<U: Into<String>>(url: U, error: &reqwest::Error) -> Self {
        let url = url.into();
        if error.is_timeout() {
            Self::Timeout { url }
        } else if let Some(status) = error.status() {
            Self::Http {
                status: status.as_u16(),
                url,
            }
        } else {
            Self::Transport {
                url,
                message: error.to_string(),
            }
        }
    }
}
