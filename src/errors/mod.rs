//! Centralized error handling for the Pokedex Proxy application
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed species names, rejected before any upstream call
//! - **Source Errors**: transport, status and decode failures from the upstream APIs
//! - **Configuration Errors**: invalid settings detected at startup
//!
//! # Usage
//!
//! ```rust
//! use pokedex_proxy::errors::{AppError, AppResult};
//!
//! fn example_function(name: &str) -> AppResult<String> {
//!     if name.is_empty() {
//!         return Err(AppError::validation("name is required"));
//!     }
//!     Ok(name.to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for upstream Source Results
pub type SourceResult<T> = Result<T, SourceError>;
