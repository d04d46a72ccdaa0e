//! Error type definitions for the Pokedex Proxy application
//!
//! This module defines all error types used throughout the application,
//! keeping upstream failures apart from request validation and startup
//! configuration problems.

use thiserror::Error;

/// Top-level application error type
///
/// Every error a lookup can end with is one of these variants. The web
/// layer maps each variant onto a status code and a `{"message"}` body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request input failed validation; never reaches an upstream
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} '{id}'")]
    NotFound { resource: String, id: String },

    /// Upstream source errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Upstream (species or translation source) specific errors
///
/// Every variant is a "hard failure": the call did not produce a usable
/// response body.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection or transport level failure
    #[error("Transport error: {service} - {message}")]
    Transport { service: String, message: String },

    /// The per-call timeout elapsed
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Upstream answered with a non-success status
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Decode error: {service} - {message}")]
    Decode { service: String, message: String },

    /// The request URL could not be built from the configured base
    #[error("Invalid URL: {url} - {message}")]
    InvalidUrl { url: String, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a transport error
    pub fn transport<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Transport {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create an HTTP status error
    pub fn http<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Decode {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Short label used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Http { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::InvalidUrl { .. } => "url",
        }
    }
}
