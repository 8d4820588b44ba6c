//! Tournament model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::TournamentId;

/// A tournament: a named roster of players plus their game history.
///
/// At most one tournament is marked `active` at a time; the UI uses the
/// active one as its default context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique identifier
    pub id: TournamentId,

    /// Display name
    pub name: String,

    /// Date the tournament was registered
    pub date: NaiveDate,

    /// When this record was created
    pub created_at: DateTime<Utc>,

    /// Whether this is the currently active tournament
    pub active: bool,
}

/// Player/game counts for a tournament overview.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TournamentStats {
    pub player_count: u32,
    pub game_count: u32,
}
