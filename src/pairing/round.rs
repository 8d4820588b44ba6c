//! Round materialization.
//!
//! Turns matcher output into persistable game drafts. Boards start at
//! `NotPlayed` and wait for a result; byes are stamped with the bye
//! sentinel immediately so the half point lands without anyone entering a
//! result for a game that was never played.

use chrono::NaiveDate;

use crate::models::{GameDraft, GameResult};
use crate::scoring::BYE_SCORING;

use super::matcher::Slot;

/// Convert slots into game drafts dated to the given round date.
///
/// Draft order follows slot emission order; no validation beyond that —
/// the matcher's output invariants are trusted.
pub fn materialize(slots: &[Slot], date: NaiveDate) -> Vec<GameDraft> {
    slots
        .iter()
        .map(|slot| match slot {
            Slot::Pair { white, black } => GameDraft {
                white_player_id: *white,
                black_player_id: Some(*black),
                result: GameResult::NotPlayed,
                date,
            },
            Slot::Bye { player } => GameDraft {
                white_player_id: *player,
                black_player_id: None,
                result: BYE_SCORING.stamped_result(),
                date,
            },
        })
        .collect()
}
