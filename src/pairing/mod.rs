//! The round-pairing engine.
//!
//! Given a roster and the full game history, produce one new round of
//! head-to-head assignments: colors balanced, repeat opponents avoided,
//! at most a trailing bye on odd rosters (plus forced byes when the
//! greedy matcher runs a player out of fresh opponents).
//!
//! Pipeline, one way, no state across calls:
//! standings → ranked order (seeded tie randomization) → greedy matcher →
//! materialized drafts → one batch write.
//!
//! The engine never locks; callers must not run two pairings for the same
//! tournament concurrently (the API layer serializes them).

mod matcher;
mod rank;
mod round;
mod standings;

pub use matcher::Slot;
pub use standings::Standing;

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::info;

use crate::models::{Game, GameDraft, PlayerId, TournamentId};
use crate::storage::{StorageError, Store};

/// Errors from a pairing request.
///
/// Storage failures pass through unmodified. A failed batch write leaves
/// nothing persisted (the storage contract), so a failed round can simply
/// be retried.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Outcome of a successful pairing request.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct RoundReport {
    /// Games created this round: boards plus byes.
    pub pairings_created: usize,
}

/// Plan one round without touching storage.
///
/// Pure up to the RNG: a fixed seed and fixed inputs reproduce the same
/// drafts. Exposed for dry runs and tests.
pub fn plan_round(
    roster: &[PlayerId],
    games: &[Game],
    rng: &mut StdRng,
    date: NaiveDate,
) -> Vec<GameDraft> {
    let mut standings = standings::compute(roster, games);
    rank::rank_for_pairing(&mut standings, rng);
    let slots = matcher::pair_greedy(standings);
    round::materialize(&slots, date)
}

/// Pair a new round for a tournament and persist it.
///
/// With a non-empty `subset` only those players are seated, though their
/// full history still drives scores and opponent exclusion. Without one,
/// the whole roster plays. An empty roster produces zero pairings, not an
/// error.
pub async fn pair_round(
    store: &dyn Store,
    tournament: TournamentId,
    subset: Option<&[PlayerId]>,
    seed: Option<u64>,
) -> Result<RoundReport, PairingError> {
    let roster: Vec<PlayerId> = match subset {
        Some(ids) if !ids.is_empty() => ids.to_vec(),
        _ => store
            .list_players(tournament)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect(),
    };

    let games = store.list_games(tournament).await?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let drafts = plan_round(&roster, &games, &mut rng, Utc::now().date_naive());

    if drafts.is_empty() {
        info!(%tournament, "pairing requested for empty roster, nothing to do");
        return Ok(RoundReport {
            pairings_created: 0,
        });
    }

    let created = store.create_games(&drafts).await?;
    info!(
        %tournament,
        games = created.len(),
        byes = drafts.iter().filter(|d| d.black_player_id.is_none()).count(),
        "round paired"
    );

    Ok(RoundReport {
        pairings_created: created.len(),
    })
}
