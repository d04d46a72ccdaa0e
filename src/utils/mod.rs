//! Utility modules for the pokedex-proxy application
//!
//! This module contains reusable utilities that can be used
//! across different parts of the system.

pub mod http_client;
pub mod url;
pub mod validation;

pub use http_client::StandardHttpClient;
