//! REST API endpoints.
//!
//! Axum-based HTTP API for the record-keeping surface: tournament, player
//! and game CRUD, round pairing, and the ranking table.

pub mod routes;
pub mod state;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::pairing::PairingError;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TournamentNotFound(_)
            | StorageError::PlayerNotFound(_)
            | StorageError::GameNotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<PairingError> for ApiError {
    fn from(err: PairingError) -> Self {
        match err {
            PairingError::Storage(e) => e.into(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/tournaments",
            get(routes::tournaments::list).post(routes::tournaments::create),
        )
        .route("/api/tournaments/:id", delete(routes::tournaments::remove))
        .route(
            "/api/tournaments/:id/activate",
            post(routes::tournaments::activate),
        )
        .route("/api/tournaments/:id/stats", get(routes::tournaments::stats))
        .route(
            "/api/tournaments/:id/players",
            get(routes::players::list).post(routes::players::create),
        )
        .route(
            "/api/players/:id",
            put(routes::players::update).delete(routes::players::remove),
        )
        .route(
            "/api/tournaments/:id/games",
            get(routes::games::list).post(routes::games::create),
        )
        .route("/api/games/:id/result", put(routes::games::update_result))
        .route("/api/games/:id", delete(routes::games::remove))
        .route("/api/tournaments/:id/rounds", post(routes::rounds::pair))
        .route("/api/tournaments/:id/ranking", get(routes::ranking::table))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
