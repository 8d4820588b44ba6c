//! Storage backends.
//!
//! Everything persistent goes through the [`Store`] trait: an explicit
//! handle constructed once at startup and passed down, never a process
//! global. Two backends ship with the crate:
//! - [`MemoryStore`]: in-process, used by tests and throwaway sessions
//! - [`JsonlStore`]: JSONL files under a data directory, the source of truth
//!
//! Backends may be network-bound in the future; the trait is async and
//! object-safe so callers hold an `Arc<dyn Store>`.

mod jsonl;
mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Game, GameDraft, GameId, GameResult, Player, PlayerDraft, PlayerId, PlayerUpdate, Tournament,
    TournamentId, TournamentStats,
};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Game not found: {0}")]
    GameNotFound(GameId),
}

/// The storage collaborator.
///
/// Games do not carry a tournament id; they belong to a tournament through
/// the white player's registration, so `list_games` resolves that join.
/// `create_games` is all-or-nothing: either the whole batch is persisted or
/// none of it is.
#[async_trait]
pub trait Store: Send + Sync {
    // ── Tournaments ──

    async fn list_tournaments(&self) -> Result<Vec<Tournament>, StorageError>;

    async fn create_tournament(&self, name: &str) -> Result<Tournament, StorageError>;

    /// Mark one tournament active; every other tournament is deactivated.
    async fn set_active_tournament(&self, id: TournamentId) -> Result<(), StorageError>;

    /// Delete a tournament together with its players and their games.
    async fn delete_tournament(&self, id: TournamentId) -> Result<(), StorageError>;

    async fn tournament_stats(&self, id: TournamentId)
        -> Result<TournamentStats, StorageError>;

    // ── Players ──

    async fn list_players(&self, tournament: TournamentId)
        -> Result<Vec<Player>, StorageError>;

    async fn create_player(&self, draft: &PlayerDraft) -> Result<Player, StorageError>;

    async fn update_player(
        &self,
        id: PlayerId,
        update: &PlayerUpdate,
    ) -> Result<(), StorageError>;

    /// Delete a player together with every game they sat in.
    async fn delete_player(&self, id: PlayerId) -> Result<(), StorageError>;

    // ── Games ──

    /// Full game history of a tournament, all rounds.
    async fn list_games(&self, tournament: TournamentId) -> Result<Vec<Game>, StorageError>;

    /// Persist a batch of game drafts, all-or-nothing.
    async fn create_games(&self, batch: &[GameDraft]) -> Result<Vec<GameId>, StorageError>;

    async fn update_result(&self, id: GameId, result: GameResult)
        -> Result<(), StorageError>;

    async fn delete_game(&self, id: GameId) -> Result<(), StorageError>;
}
