//! Integer entity ids.
//!
//! Ids are allocated sequentially by the storage backend; the rest of the
//! crate only ever compares and copies them. Separate newtypes keep a
//! `PlayerId` from being handed to something expecting a `GameId`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub i64);

/// Identifier of a player, unique within its tournament's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

/// Identifier of a recorded game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TournamentId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl From<i64> for PlayerId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl From<i64> for GameId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&PlayerId(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&GameId(42)).unwrap(), "42");

        let id: PlayerId = serde_json::from_str("7").unwrap();
        assert_eq!(id, PlayerId(7));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", TournamentId(3)), "3");
        assert_eq!(format!("{}", PlayerId(12)), "12");
    }

    #[test]
    fn test_id_from_i64() {
        assert_eq!(PlayerId::from(5), PlayerId(5));
        assert_eq!(GameId::from(9), GameId(9));
    }
}
