//! Game CRUD endpoints.
//!
//! Manual game entry exists alongside the pairing engine so results from
//! casual boards can be recorded; a hand-entered game starts at
//! `NotPlayed` just like a freshly paired one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Game, GameDraft, GameId, GameResult, PlayerId, TournamentId};

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub white_player_id: PlayerId,
    pub black_player_id: Option<PlayerId>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CreatedGameResponse {
    pub id: GameId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResultRequest {
    pub result: GameResult,
}

pub async fn list(
    State(state): State<AppState>,
    Path(tournament_id): Path<i64>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.store.list_games(TournamentId(tournament_id)).await?;
    Ok(Json(games))
}

pub async fn create(
    State(state): State<AppState>,
    Path(_tournament_id): Path<i64>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreatedGameResponse>), ApiError> {
    if req.black_player_id == Some(req.white_player_id) {
        return Err(ApiError::BadRequest(
            "a player cannot face themselves".to_string(),
        ));
    }

    let draft = GameDraft {
        white_player_id: req.white_player_id,
        black_player_id: req.black_player_id,
        result: GameResult::NotPlayed,
        date: req.date.unwrap_or_else(|| Utc::now().date_naive()),
    };
    let ids = state.store.create_games(std::slice::from_ref(&draft)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedGameResponse { id: ids[0] }),
    ))
}

pub async fn update_result(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateResultRequest>,
) -> Result<StatusCode, ApiError> {
    state.store.update_result(GameId(id), req.result).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_game(GameId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::{PlayerDraft, Sex, TournamentId};
    use crate::storage::{MemoryStore, Store};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    async fn seeded_state() -> AppState {
        let store = MemoryStore::new();
        let t = store.create_tournament("T").await.unwrap();
        for surname in ["Alders", "Boon"] {
            store
                .create_player(&PlayerDraft {
                    surname: surname.to_string(),
                    name: "X".to_string(),
                    sex: Sex::M,
                    tournament_id: t.id,
                })
                .await
                .unwrap();
        }
        AppState::new(Arc::new(store))
    }

    async fn request(
        app: axum::Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                builder = builder.header("content-type", "application/json");
                Body::from(b.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_create_enter_result_list() {
        let state = seeded_state().await;

        let (status, created) = request(
            build_router(state.clone()),
            "POST",
            "/api/tournaments/1/games",
            Some(r#"{"white_player_id": 1, "black_player_id": 2}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, _) = request(
            build_router(state.clone()),
            "PUT",
            &format!("/api/games/{id}/result"),
            Some(r#"{"result": "white_wins"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, games) = request(
            build_router(state),
            "GET",
            "/api/tournaments/1/games",
            None,
        )
        .await;
        assert_eq!(games.as_array().unwrap().len(), 1);
        assert_eq!(games[0]["result"], "white_wins");
    }

    #[tokio::test]
    async fn test_self_pairing_rejected() {
        let (status, _) = request(
            build_router(seeded_state().await),
            "POST",
            "/api/tournaments/1/games",
            Some(r#"{"white_player_id": 1, "black_player_id": 1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_result_update_unknown_game_404() {
        let (status, _) = request(
            build_router(seeded_state().await),
            "PUT",
            "/api/games/77/result",
            Some(r#"{"result": "draw"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
