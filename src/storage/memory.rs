//! In-memory storage backend.
//!
//! Holds everything in a single `RwLock`ed table set. Used by the test
//! suite and by `--storage memory` sessions where nothing should survive
//! the process.

use chrono::Utc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::models::{
    Game, GameDraft, GameId, GameResult, Player, PlayerDraft, PlayerId, PlayerUpdate, Tournament,
    TournamentId, TournamentStats,
};

use super::{StorageError, Store};

#[derive(Default)]
struct Tables {
    tournaments: Vec<Tournament>,
    players: Vec<Player>,
    games: Vec<Game>,
    next_tournament_id: i64,
    next_player_id: i64,
    next_game_id: i64,
}

impl Tables {
    fn player_ids_of(&self, tournament: TournamentId) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.tournament_id == tournament)
            .map(|p| p.id)
            .collect()
    }
}

/// In-process [`Store`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        let tables = self.tables.read().await;
        let mut out = tables.tournaments.clone();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }

    async fn create_tournament(&self, name: &str) -> Result<Tournament, StorageError> {
        let mut tables = self.tables.write().await;
        tables.next_tournament_id += 1;
        let now = Utc::now();
        let tournament = Tournament {
            id: TournamentId(tables.next_tournament_id),
            name: name.to_string(),
            date: now.date_naive(),
            created_at: now,
            active: false,
        };
        tables.tournaments.push(tournament.clone());
        Ok(tournament)
    }

    async fn set_active_tournament(&self, id: TournamentId) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        if !tables.tournaments.iter().any(|t| t.id == id) {
            return Err(StorageError::TournamentNotFound(id));
        }
        for t in &mut tables.tournaments {
            t.active = t.id == id;
        }
        Ok(())
    }

    async fn delete_tournament(&self, id: TournamentId) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        if !tables.tournaments.iter().any(|t| t.id == id) {
            return Err(StorageError::TournamentNotFound(id));
        }
        let member_ids = tables.player_ids_of(id);
        tables
            .games
            .retain(|g| !member_ids.contains(&g.white_player_id));
        tables.players.retain(|p| p.tournament_id != id);
        tables.tournaments.retain(|t| t.id != id);
        Ok(())
    }

    async fn tournament_stats(
        &self,
        id: TournamentId,
    ) -> Result<TournamentStats, StorageError> {
        let tables = self.tables.read().await;
        let member_ids = tables.player_ids_of(id);
        let game_count = tables
            .games
            .iter()
            .filter(|g| member_ids.contains(&g.white_player_id))
            .count() as u32;
        Ok(TournamentStats {
            player_count: member_ids.len() as u32,
            game_count,
        })
    }

    async fn list_players(
        &self,
        tournament: TournamentId,
    ) -> Result<Vec<Player>, StorageError> {
        let tables = self.tables.read().await;
        let mut out: Vec<Player> = tables
            .players
            .iter()
            .filter(|p| p.tournament_id == tournament)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.surname.cmp(&b.surname).then(a.name.cmp(&b.name)));
        Ok(out)
    }

    async fn create_player(&self, draft: &PlayerDraft) -> Result<Player, StorageError> {
        let mut tables = self.tables.write().await;
        tables.next_player_id += 1;
        let player = Player {
            id: PlayerId(tables.next_player_id),
            surname: draft.surname.clone(),
            name: draft.name.clone(),
            sex: draft.sex,
            tournament_id: draft.tournament_id,
        };
        tables.players.push(player.clone());
        Ok(player)
    }

    async fn update_player(
        &self,
        id: PlayerId,
        update: &PlayerUpdate,
    ) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        let player = tables
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorageError::PlayerNotFound(id))?;
        player.surname = update.surname.clone();
        player.name = update.name.clone();
        player.sex = update.sex;
        Ok(())
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        if !tables.players.iter().any(|p| p.id == id) {
            return Err(StorageError::PlayerNotFound(id));
        }
        tables.games.retain(|g| !g.involves(id));
        tables.players.retain(|p| p.id != id);
        Ok(())
    }

    async fn list_games(&self, tournament: TournamentId) -> Result<Vec<Game>, StorageError> {
        let tables = self.tables.read().await;
        let member_ids = tables.player_ids_of(tournament);
        let mut out: Vec<Game> = tables
            .games
            .iter()
            .filter(|g| member_ids.contains(&g.white_player_id))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn create_games(&self, batch: &[GameDraft]) -> Result<Vec<GameId>, StorageError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        // Stage the whole batch before touching the table.
        let mut staged = Vec::with_capacity(batch.len());
        let mut next_id = tables.next_game_id;
        for draft in batch {
            next_id += 1;
            staged.push(Game {
                id: GameId(next_id),
                white_player_id: draft.white_player_id,
                black_player_id: draft.black_player_id,
                result: draft.result,
                date: draft.date,
                created_at: now,
            });
        }

        tables.next_game_id = next_id;
        let ids = staged.iter().map(|g| g.id).collect();
        tables.games.extend(staged);
        Ok(ids)
    }

    async fn update_result(
        &self,
        id: GameId,
        result: GameResult,
    ) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        let game = tables
            .games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StorageError::GameNotFound(id))?;
        game.result = result;
        Ok(())
    }

    async fn delete_game(&self, id: GameId) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        if !tables.games.iter().any(|g| g.id == id) {
            return Err(StorageError::GameNotFound(id));
        }
        tables.games.retain(|g| g.id != id);
        Ok(())
    }
}
