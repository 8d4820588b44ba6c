//! Round pairing endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{PlayerId, TournamentId};
use crate::pairing::{self, RoundReport};

#[derive(Debug, Default, Deserialize)]
pub struct PairRoundRequest {
    /// Restrict the round to these players; omitted or empty means the
    /// whole roster.
    #[serde(default)]
    pub player_ids: Option<Vec<PlayerId>>,

    /// Fix the tie-break RNG, mainly for scripted round generation.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Pair one new round.
///
/// Pairing requests for the same process are serialized through
/// [`AppState::pairing_lock`]: two pairings racing over one history
/// snapshot could each look valid and together seat a rematch.
pub async fn pair(
    State(state): State<AppState>,
    Path(tournament_id): Path<i64>,
    body: Option<Json<PairRoundRequest>>,
) -> Result<(StatusCode, Json<RoundReport>), ApiError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let tournament = TournamentId(tournament_id);

    let _guard = state.pairing_lock.lock().await;
    let report = pairing::pair_round(
        state.store.as_ref(),
        tournament,
        req.player_ids.as_deref(),
        req.seed,
    )
    .await?;

    info!(%tournament, pairings = report.pairings_created, "round paired via API");
    Ok((StatusCode::CREATED, Json(report)))
}
