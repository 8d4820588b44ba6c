//! Ranking table — read-only score aggregation for display.
//!
//! Consumes the same game history as the pairing engine and the same
//! [`crate::scoring`] attribution helpers, so the table and the pairing
//! order can never disagree about what a result is worth. This module
//! makes no scheduling decisions.

use serde::Serialize;

use crate::models::{Game, GameResult, Player, TournamentId};
use crate::scoring;
use crate::storage::{StorageError, Store};

/// One row of the ranking table.
#[derive(Debug, Clone, Serialize)]
pub struct RankingRow {
    pub player: Player,
    pub score: f64,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

/// Build the ranking table for a set of players over their game history.
///
/// Ordered by score descending, then games played ascending; stable for
/// equal keys, so callers passing players in display order keep that
/// order within ties.
pub fn ranking_table(players: &[Player], games: &[Game]) -> Vec<RankingRow> {
    let mut rows: Vec<RankingRow> = players
        .iter()
        .map(|player| {
            let mut row = RankingRow {
                player: player.clone(),
                score: 0.0,
                games_played: 0,
                wins: 0,
                draws: 0,
                losses: 0,
            };

            for game in games {
                if game.white_player_id == player.id {
                    row.games_played += 1;
                    row.score += scoring::white_points(game);
                    match game.result {
                        GameResult::WhiteWins => row.wins += 1,
                        GameResult::Draw => row.draws += 1,
                        GameResult::BlackWins => row.losses += 1,
                        GameResult::NotPlayed => {}
                    }
                } else if game.black_player_id == Some(player.id) {
                    row.games_played += 1;
                    row.score += scoring::black_points(game);
                    match game.result {
                        GameResult::BlackWins => row.wins += 1,
                        GameResult::Draw => row.draws += 1,
                        GameResult::WhiteWins => row.losses += 1,
                        GameResult::NotPlayed => {}
                    }
                }
            }

            row
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.games_played.cmp(&b.games_played))
    });
    rows
}

/// Fetch a tournament's players and games and build its ranking table.
pub async fn tournament_ranking(
    store: &dyn Store,
    tournament: TournamentId,
) -> Result<Vec<RankingRow>, StorageError> {
    let players = store.list_players(tournament).await?;
    let games = store.list_games(tournament).await?;
    Ok(ranking_table(&players, &games))
}
