//! Player model.

use serde::{Deserialize, Serialize};

use super::{PlayerId, TournamentId};

/// A registered player.
///
/// The pairing engine only ever reads the `id`; the name fields exist for
/// the record-keeping surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Family name
    pub surname: String,

    /// Given name
    pub name: String,

    /// Registered sex marker
    pub sex: Sex,

    /// Tournament this player is registered in
    pub tournament_id: TournamentId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
}

/// An unpersisted player; the storage backend allocates the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDraft {
    pub surname: String,
    pub name: String,
    pub sex: Sex,
    pub tournament_id: TournamentId,
}

/// Editable fields of an existing player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub surname: String,
    pub name: String,
    pub sex: Sex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_serialization() {
        let p = Player {
            id: PlayerId(4),
            surname: "Jansen".to_string(),
            name: "Mila".to_string(),
            sex: Sex::F,
            tournament_id: TournamentId(1),
        };

        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"sex\":\"F\""));

        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, p.id);
        assert_eq!(back.surname, "Jansen");
    }
}
