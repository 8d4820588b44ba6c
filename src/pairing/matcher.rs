//! Greedy pairing matcher.
//!
//! Consumes the ranked standings front to back: the front player anchors,
//! the first remaining candidate they have not yet faced joins them, and
//! both leave the pool. An anchor with no fresh opponent left sits out
//! with a bye. No backtracking — an early greedy pick can force more byes
//! than a global matching would, and that is accepted behavior.

use crate::models::PlayerId;

use super::standings::Standing;

/// One seat assignment produced by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A head-to-head board, colors already assigned.
    Pair { white: PlayerId, black: PlayerId },
    /// A player sitting this round out.
    Bye { player: PlayerId },
}

/// Pair the ranked list into disjoint slots.
///
/// Colors go to whoever has had the white pieces less often; on equal
/// counts the anchor (higher-ranked) player takes white.
pub fn pair_greedy(ranked: Vec<Standing>) -> Vec<Slot> {
    let mut remaining = ranked;
    let mut slots = Vec::with_capacity(remaining.len() / 2 + 1);

    while remaining.len() >= 2 {
        let partner = remaining
            .iter()
            .skip(1)
            .position(|candidate| !remaining[0].opponents.contains(&candidate.player_id))
            .map(|offset| offset + 1);

        match partner {
            Some(index) => {
                let candidate = remaining.remove(index);
                let anchor = remaining.remove(0);
                let (white, black) = if anchor.white_games <= candidate.white_games {
                    (anchor.player_id, candidate.player_id)
                } else {
                    (candidate.player_id, anchor.player_id)
                };
                slots.push(Slot::Pair { white, black });
            }
            None => {
                // Everyone left has already faced the anchor.
                let anchor = remaining.remove(0);
                slots.push(Slot::Bye {
                    player: anchor.player_id,
                });
            }
        }
    }

    if let Some(last) = remaining.pop() {
        slots.push(Slot::Bye {
            player: last.player_id,
        });
    }

    slots
}
