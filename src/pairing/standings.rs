//! Score aggregation for pairing.
//!
//! Derives one [`Standing`] per roster player from the raw game log. Pure:
//! the same roster and history always produce the same standings.

use std::collections::HashSet;

use crate::models::{Game, PlayerId};
use crate::scoring;

/// A player's derived summary, used only to drive pairing.
#[derive(Debug, Clone)]
pub struct Standing {
    pub player_id: PlayerId,

    /// Points collected: 1 per win, 0.5 per draw, byes per the club
    /// convention.
    pub score: f64,

    /// Games the player sat in, byes included.
    pub games_played: u32,

    /// Games played with the white pieces (byes occupy the white seat).
    pub white_games: u32,

    /// Everyone this player has already faced.
    pub opponents: HashSet<PlayerId>,
}

impl Standing {
    fn zero(player_id: PlayerId) -> Self {
        Self {
            player_id,
            score: 0.0,
            games_played: 0,
            white_games: 0,
            opponents: HashSet::new(),
        }
    }
}

/// Compute standings for the given roster over the full game history.
///
/// Games involving ids outside the roster contribute nothing to it; a
/// history referencing unknown players is data for the storage layer to
/// worry about, not an error here.
pub fn compute(roster: &[PlayerId], games: &[Game]) -> Vec<Standing> {
    roster
        .iter()
        .map(|&player_id| {
            let mut standing = Standing::zero(player_id);

            for game in games {
                if game.white_player_id == player_id {
                    standing.games_played += 1;
                    standing.white_games += 1;
                    standing.score += scoring::white_points(game);
                    if let Some(black) = game.black_player_id {
                        standing.opponents.insert(black);
                    }
                } else if game.black_player_id == Some(player_id) {
                    standing.games_played += 1;
                    standing.score += scoring::black_points(game);
                    standing.opponents.insert(game.white_player_id);
                }
            }

            standing
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameId, GameResult};
    use chrono::{NaiveDate, Utc};

    fn game(id: i64, white: i64, black: Option<i64>, result: GameResult) -> Game {
        Game {
            id: GameId(id),
            white_player_id: PlayerId(white),
            black_player_id: black.map(PlayerId),
            result,
            date: NaiveDate::from_ymd_opt(2026, 4, 18).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_win_draw_loss_as_white() {
        let games = vec![
            game(1, 1, Some(2), GameResult::WhiteWins),
            game(2, 1, Some(3), GameResult::Draw),
            game(3, 1, Some(4), GameResult::BlackWins),
        ];

        let standings = compute(&[PlayerId(1)], &games);
        assert_eq!(standings.len(), 1);
        let s = &standings[0];
        assert_eq!(s.score, 1.5);
        assert_eq!(s.games_played, 3);
        assert_eq!(s.white_games, 3);
        assert_eq!(s.opponents.len(), 3);
    }

    #[test]
    fn test_black_side_attribution() {
        let games = vec![
            game(1, 2, Some(1), GameResult::BlackWins),
            game(2, 3, Some(1), GameResult::Draw),
        ];

        let standings = compute(&[PlayerId(1)], &games);
        let s = &standings[0];
        assert_eq!(s.score, 1.5);
        assert_eq!(s.games_played, 2);
        assert_eq!(s.white_games, 0);
        assert!(s.opponents.contains(&PlayerId(2)));
        assert!(s.opponents.contains(&PlayerId(3)));
    }

    #[test]
    fn test_bye_counts_for_white_seat_only() {
        let games = vec![game(1, 1, None, GameResult::Draw)];

        let standings = compute(&[PlayerId(1)], &games);
        let s = &standings[0];
        assert_eq!(s.score, 0.5);
        assert_eq!(s.games_played, 1);
        assert_eq!(s.white_games, 1);
        assert!(s.opponents.is_empty());
    }

    #[test]
    fn test_zero_standing_for_new_player() {
        let games = vec![game(1, 2, Some(3), GameResult::WhiteWins)];

        let standings = compute(&[PlayerId(1)], &games);
        let s = &standings[0];
        assert_eq!(s.score, 0.0);
        assert_eq!(s.games_played, 0);
        assert!(s.opponents.is_empty());
    }

    #[test]
    fn test_games_outside_roster_ignored() {
        // History from players not under consideration must not leak in.
        let games = vec![
            game(1, 7, Some(8), GameResult::WhiteWins),
            game(2, 1, Some(2), GameResult::Draw),
        ];

        let standings = compute(&[PlayerId(1), PlayerId(2)], &games);
        assert_eq!(standings[0].games_played, 1);
        assert_eq!(standings[1].games_played, 1);
        assert_eq!(standings[0].score, 0.5);
        assert_eq!(standings[1].score, 0.5);
    }

    #[test]
    fn test_unplayed_games_still_record_opponents() {
        // A freshly paired round blocks a rematch even before its results
        // are entered.
        let games = vec![game(1, 1, Some(2), GameResult::NotPlayed)];

        let standings = compute(&[PlayerId(1), PlayerId(2)], &games);
        assert!(standings[0].opponents.contains(&PlayerId(2)));
        assert!(standings[1].opponents.contains(&PlayerId(1)));
        assert_eq!(standings[0].score, 0.0);
    }
}
