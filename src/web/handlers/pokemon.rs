//! Species lookup handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::errors::AppResult;
use crate::models::Pokemon;
use crate::web::AppState;

/// `GET /pokemon/{name}`
pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Pokemon>> {
    let pokemon = state.lookup_service.get(&name).await?;
    Ok(Json(pokemon))
}

/// `GET /pokemon/translated/{name}`
pub async fn get_translated_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Pokemon>> {
    let pokemon = state.lookup_service.get_translated(&name).await?;
    Ok(Json(pokemon))
}
