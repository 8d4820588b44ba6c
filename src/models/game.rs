//! Game model — one recorded board between two players, or a bye.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{GameId, PlayerId};

/// Outcome of a game, from white's perspective.
///
/// `NotPlayed` doubles as the initial state of freshly paired games; bye
/// games are stamped at creation per [`crate::scoring::BYE_SCORING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    NotPlayed,
    WhiteWins,
    Draw,
    BlackWins,
}

/// A recorded game.
///
/// `black_player_id` is absent for byes: the white seat holds the player
/// sitting out and there is no opponent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier
    pub id: GameId,

    /// Player with the white pieces (or the player receiving the bye)
    pub white_player_id: PlayerId,

    /// Player with the black pieces; `None` for a bye
    pub black_player_id: Option<PlayerId>,

    /// Outcome, `NotPlayed` until a result is entered
    pub result: GameResult,

    /// Round date (one calendar date per round)
    pub date: NaiveDate,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Whether this game is a bye (no opponent seated).
    pub fn is_bye(&self) -> bool {
        self.black_player_id.is_none()
    }

    /// Whether the given player sat on either side of this game.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.white_player_id == player || self.black_player_id == Some(player)
    }
}

/// An unpersisted game, handed to the storage backend for batch creation.
///
/// The backend allocates the id and the creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDraft {
    pub white_player_id: PlayerId,
    pub black_player_id: Option<PlayerId>,
    pub result: GameResult,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game(black: Option<PlayerId>) -> Game {
        Game {
            id: GameId(1),
            white_player_id: PlayerId(10),
            black_player_id: black,
            result: GameResult::NotPlayed,
            date: NaiveDate::from_ymd_opt(2026, 4, 18).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_bye() {
        assert!(sample_game(None).is_bye());
        assert!(!sample_game(Some(PlayerId(11))).is_bye());
    }

    #[test]
    fn test_involves_both_sides() {
        let g = sample_game(Some(PlayerId(11)));
        assert!(g.involves(PlayerId(10)));
        assert!(g.involves(PlayerId(11)));
        assert!(!g.involves(PlayerId(12)));
    }

    #[test]
    fn test_result_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&GameResult::WhiteWins).unwrap(),
            "\"white_wins\""
        );
        assert_eq!(
            serde_json::to_string(&GameResult::NotPlayed).unwrap(),
            "\"not_played\""
        );
    }

    #[test]
    fn test_game_serialization_bye_has_null_black() {
        let g = sample_game(None);
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"black_player_id\":null"));

        let back: Game = serde_json::from_str(&json).unwrap();
        assert!(back.is_bye());
    }
}
