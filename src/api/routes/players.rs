//! Player CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Player, PlayerDraft, PlayerId, PlayerUpdate, Sex, TournamentId};

#[derive(Debug, Deserialize)]
pub struct PlayerRequest {
    pub surname: String,
    pub name: String,
    pub sex: Sex,
}

impl PlayerRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.surname.trim().is_empty() || self.name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "player surname and name are required".to_string(),
            ));
        }
        Ok(())
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(tournament_id): Path<i64>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state
        .store
        .list_players(TournamentId(tournament_id))
        .await?;
    Ok(Json(players))
}

pub async fn create(
    State(state): State<AppState>,
    Path(tournament_id): Path<i64>,
    Json(req): Json<PlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    req.validate()?;
    let player = state
        .store
        .create_player(&PlayerDraft {
            surname: req.surname.trim().to_string(),
            name: req.name.trim().to_string(),
            sex: req.sex,
            tournament_id: TournamentId(tournament_id),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PlayerRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;
    state
        .store
        .update_player(
            PlayerId(id),
            &PlayerUpdate {
                surname: req.surname.trim().to_string(),
                name: req.name.trim().to_string(),
                sex: req.sex,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_player(PlayerId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
