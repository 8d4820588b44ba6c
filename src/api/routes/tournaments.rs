//! Tournament CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Tournament, TournamentId, TournamentStats};

#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tournament>>, ApiError> {
    let tournaments = state.store.list_tournaments().await?;
    Ok(Json(tournaments))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateTournamentRequest>,
) -> Result<(StatusCode, Json<Tournament>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("tournament name is empty".to_string()));
    }
    let tournament = state.store.create_tournament(req.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.set_active_tournament(TournamentId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_tournament(TournamentId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TournamentStats>, ApiError> {
    let stats = state.store.tournament_stats(TournamentId(id)).await?;
    Ok(Json(stats))
}
