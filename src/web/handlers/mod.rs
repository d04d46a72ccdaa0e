//! HTTP request handlers
//!
//! Handlers are thin: they extract parameters and delegate to the service
//! layer or the caches held in [`AppState`](super::AppState).

pub mod cache;
pub mod health;
pub mod pokemon;

use axum::{http::Uri, response::Response};

use super::responses::not_found;

/// Fallback for unmatched routes
pub async fn route_not_found(uri: Uri) -> Response {
    not_found(format!("No route for {}", uri.path()))
}
