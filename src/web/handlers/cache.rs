//! Cache inspection and eviction handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::web::{
    AppState,
    responses::{not_found, ok},
};

/// Keys currently held by each cache, sorted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSnapshotResponse {
    pub species: Vec<String>,
    pub translations: Vec<String>,
    pub translations_enabled: bool,
}

/// `GET /api/v1/cache`
pub async fn get_cache_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let mut species: Vec<String> = state.species_cache.snapshot().await.into_keys().collect();
    species.sort();

    let mut translations = match &state.translation_cache {
        Some(cache) => cache.snapshot().await.into_keys().collect(),
        None => Vec::new(),
    };
    translations.sort();

    ok(CacheSnapshotResponse {
        species,
        translations,
        translations_enabled: state.translation_cache.is_some(),
    })
}

/// `DELETE /api/v1/cache/species/{name}`
///
/// Evicts a species so the next lookup refetches it. Translations keyed on the
/// species are left alone. Of concurrent evictions of one species, exactly one
/// gets 204.
pub async fn evict_species(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    if state.species_cache.remove(&name).await.is_none() {
        return not_found(format!("species '{name}' is not cached"));
    }

    info!(species = %name, "Evicted species from cache");
    StatusCode::NO_CONTENT.into_response()
}
