//! Ranking table endpoint.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::TournamentId;
use crate::ranking::{self, RankingRow};

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub rows: Vec<RankingRow>,
}

pub async fn table(
    State(state): State<AppState>,
    Path(tournament_id): Path<i64>,
) -> Result<Json<RankingResponse>, ApiError> {
    let rows =
        ranking::tournament_ranking(state.store.as_ref(), TournamentId(tournament_id)).await?;
    Ok(Json(RankingResponse { rows }))
}
