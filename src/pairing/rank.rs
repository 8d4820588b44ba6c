//! Pairing order: ranking with randomized tie-breaks.
//!
//! Players are ordered by score descending, then games played ascending so
//! players with fewer games surface earlier and catch up in exposure.
//! Exact ties (same score, same games played) are shuffled uniformly
//! within their block; otherwise equal players would meet in the same
//! order round after round. A fixed RNG seed reproduces the exact order.

use rand::seq::SliceRandom;
use rand::Rng;

use super::standings::Standing;

fn tied(a: &Standing, b: &Standing) -> bool {
    a.score == b.score && a.games_played == b.games_played
}

/// Sort standings into pairing order, randomizing exact ties.
pub fn rank_for_pairing<R: Rng>(standings: &mut [Standing], rng: &mut R) {
    standings.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.games_played.cmp(&b.games_played))
    });

    // Shuffle each maximal run of tied players. The sort above groups
    // ties adjacently, so a linear sweep finds every block.
    let mut start = 0;
    while start < standings.len() {
        let mut end = start + 1;
        while end < standings.len() && tied(&standings[start], &standings[end]) {
            end += 1;
        }
        if end - start > 1 {
            standings[start..end].shuffle(rng);
        }
        start = end;
    }
}
