//! Point attribution conventions.
//!
//! Every place that turns a [`GameResult`] into points — the pairing
//! engine's standings and the ranking table alike — goes through this
//! module, so the scoring rules cannot drift between the two.

use crate::models::{Game, GameResult};

/// How a bye is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByeScoring {
    /// Bye counts as a draw: half a point.
    HalfPoint,
    /// Bye counts as a win: a full point.
    FullPoint,
}

/// The club's bye convention.
///
/// Pairing stamps bye games with [`ByeScoring::stamped_result`] at creation
/// and the ranking table credits unstamped byes with
/// [`ByeScoring::points`], so flipping this constant moves both in
/// lockstep. Earlier versions of the club software disagreed with
/// themselves here — new bye games were recorded as draws while the ranking
/// screen counted an unplayed bye as a full win.
///
/// TODO: confirm with the club committee whether a bye should be worth a
/// full point; until then the half point stands.
pub const BYE_SCORING: ByeScoring = ByeScoring::HalfPoint;

impl ByeScoring {
    /// Points credited to the player receiving the bye.
    pub fn points(self) -> f64 {
        match self {
            ByeScoring::HalfPoint => 0.5,
            ByeScoring::FullPoint => 1.0,
        }
    }

    /// The result stamped on a bye game at creation time.
    pub fn stamped_result(self) -> GameResult {
        match self {
            ByeScoring::HalfPoint => GameResult::Draw,
            ByeScoring::FullPoint => GameResult::WhiteWins,
        }
    }
}

/// Points the white seat earned from this game.
///
/// A bye still sitting at `NotPlayed` (recorded by hand rather than by the
/// pairing engine) is credited per [`BYE_SCORING`].
pub fn white_points(game: &Game) -> f64 {
    if game.is_bye() && game.result == GameResult::NotPlayed {
        return BYE_SCORING.points();
    }
    match game.result {
        GameResult::WhiteWins => 1.0,
        GameResult::Draw => 0.5,
        GameResult::BlackWins | GameResult::NotPlayed => 0.0,
    }
}

/// Points the black seat earned from this game. Byes have no black seat.
pub fn black_points(game: &Game) -> f64 {
    match game.result {
        GameResult::BlackWins => 1.0,
        GameResult::Draw => 0.5,
        GameResult::WhiteWins | GameResult::NotPlayed => 0.0,
    }
}
