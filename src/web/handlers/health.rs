//! Health check HTTP handlers

use axum::{extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::web::{AppState, responses::ok};

/// Entry counts of the process caches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheHealth {
    pub species_entries: usize,
    pub translation_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: CacheHealth,
}

/// Health check endpoint
///
/// Reports the service version and how many entries each cache holds. The
/// service has no dependencies it can check without hitting an upstream, so
/// it is healthy whenever it can answer.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let translation_entries = match &state.translation_cache {
        Some(cache) => cache.len().await,
        None => 0,
    };

    ok(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: CacheHealth {
            species_entries: state.species_cache.len().await,
            translation_entries,
        },
    })
}

/// Readiness check for orchestrators
pub async fn readiness_check() -> impl IntoResponse {
    ok(serde_json::json!({ "status": "ready" }))
}

/// Liveness check for orchestrators
pub async fn liveness_check() -> impl IntoResponse {
    ok(serde_json::json!({ "status": "alive" }))
}
