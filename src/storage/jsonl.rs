//! JSONL (JSON Lines) storage backend.
//!
//! The data directory holds one file per entity — `tournaments.jsonl`,
//! `players.jsonl`, `games.jsonl` — and those files are the source of
//! truth. Each line is one JSON object; unparseable lines are logged and
//! skipped rather than failing the whole read.
//!
//! Batch game creation serializes every draft to a buffer before the file
//! is opened, then appends the buffer in a single write, so a bad draft
//! can never leave half a round on disk.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::{
    Game, GameDraft, GameId, GameResult, Player, PlayerDraft, PlayerId, PlayerUpdate, Tournament,
    TournamentId, TournamentStats,
};

use super::{StorageError, Store};

const TOURNAMENTS_FILE: &str = "tournaments.jsonl";
const PLAYERS_FILE: &str = "players.jsonl";
const GAMES_FILE: &str = "games.jsonl";

/// Read all entities from a JSONL file; a missing file reads as empty.
fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut entities = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                warn!("Failed to parse line {} in {:?}: {}", line_num + 1, path, e);
            }
        }
    }

    debug!("Read {} entities from {:?}", entities.len(), path);
    Ok(entities)
}

/// Rewrite a JSONL file with the given entities.
fn write_jsonl<T: Serialize>(path: &Path, entities: &[T]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for entity in entities {
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;

    debug!("Wrote {} entities to {:?}", entities.len(), path);
    Ok(())
}

/// Append entities in one write. Serialization happens up front; the file
/// is not touched unless every entity serialized cleanly.
fn append_jsonl<T: Serialize>(path: &Path, entities: &[T]) -> Result<(), StorageError> {
    if entities.is_empty() {
        return Ok(());
    }

    let mut buffer = String::new();
    for entity in entities {
        buffer.push_str(&serde_json::to_string(entity)?);
        buffer.push('\n');
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(buffer.as_bytes())?;
    file.flush()?;

    debug!("Appended {} entities to {:?}", entities.len(), path);
    Ok(())
}

/// File-backed [`Store`] implementation.
///
/// Mutations hold an in-process mutex across their read-modify-write span;
/// cross-process callers need their own serialization.
pub struct JsonlStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: Mutex::new(()),
        }
    }

    fn tournaments_path(&self) -> PathBuf {
        self.data_dir.join(TOURNAMENTS_FILE)
    }

    fn players_path(&self) -> PathBuf {
        self.data_dir.join(PLAYERS_FILE)
    }

    fn games_path(&self) -> PathBuf {
        self.data_dir.join(GAMES_FILE)
    }

    fn read_tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        read_jsonl(&self.tournaments_path())
    }

    fn read_players(&self) -> Result<Vec<Player>, StorageError> {
        read_jsonl(&self.players_path())
    }

    fn read_games(&self) -> Result<Vec<Game>, StorageError> {
        read_jsonl(&self.games_path())
    }

    fn member_ids(&self, tournament: TournamentId) -> Result<Vec<PlayerId>, StorageError> {
        Ok(self
            .read_players()?
            .into_iter()
            .filter(|p| p.tournament_id == tournament)
            .map(|p| p.id)
            .collect())
    }
}

#[async_trait]
impl Store for JsonlStore {
    async fn list_tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        let mut tournaments = self.read_tournaments()?;
        tournaments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(tournaments)
    }

    async fn create_tournament(&self, name: &str) -> Result<Tournament, StorageError> {
        let _guard = self.write_lock.lock().await;
        let tournaments = self.read_tournaments()?;
        let next_id = tournaments.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let tournament = Tournament {
            id: TournamentId(next_id),
            name: name.to_string(),
            date: now.date_naive(),
            created_at: now,
            active: false,
        };
        append_jsonl(&self.tournaments_path(), std::slice::from_ref(&tournament))?;
        Ok(tournament)
    }

    async fn set_active_tournament(&self, id: TournamentId) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut tournaments = self.read_tournaments()?;
        if !tournaments.iter().any(|t| t.id == id) {
            return Err(StorageError::TournamentNotFound(id));
        }
        for t in &mut tournaments {
            t.active = t.id == id;
        }
        write_jsonl(&self.tournaments_path(), &tournaments)
    }

    async fn delete_tournament(&self, id: TournamentId) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut tournaments = self.read_tournaments()?;
        if !tournaments.iter().any(|t| t.id == id) {
            return Err(StorageError::TournamentNotFound(id));
        }
        let members = self.member_ids(id)?;

        let mut games = self.read_games()?;
        games.retain(|g| !members.contains(&g.white_player_id));
        write_jsonl(&self.games_path(), &games)?;

        let mut players = self.read_players()?;
        players.retain(|p| p.tournament_id != id);
        write_jsonl(&self.players_path(), &players)?;

        tournaments.retain(|t| t.id != id);
        write_jsonl(&self.tournaments_path(), &tournaments)
    }

    async fn tournament_stats(
        &self,
        id: TournamentId,
    ) -> Result<TournamentStats, StorageError> {
        let members = self.member_ids(id)?;
        let game_count = self
            .read_games()?
            .iter()
            .filter(|g| members.contains(&g.white_player_id))
            .count() as u32;
        Ok(TournamentStats {
            player_count: members.len() as u32,
            game_count,
        })
    }

    async fn list_players(
        &self,
        tournament: TournamentId,
    ) -> Result<Vec<Player>, StorageError> {
        let mut players: Vec<Player> = self
            .read_players()?
            .into_iter()
            .filter(|p| p.tournament_id == tournament)
            .collect();
        players.sort_by(|a, b| a.surname.cmp(&b.surname).then(a.name.cmp(&b.name)));
        Ok(players)
    }

    async fn create_player(&self, draft: &PlayerDraft) -> Result<Player, StorageError> {
        let _guard = self.write_lock.lock().await;
        let players = self.read_players()?;
        let next_id = players.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        let player = Player {
            id: PlayerId(next_id),
            surname: draft.surname.clone(),
            name: draft.name.clone(),
            sex: draft.sex,
            tournament_id: draft.tournament_id,
        };
        append_jsonl(&self.players_path(), std::slice::from_ref(&player))?;
        Ok(player)
    }

    async fn update_player(
        &self,
        id: PlayerId,
        update: &PlayerUpdate,
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut players = self.read_players()?;
        let player = players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorageError::PlayerNotFound(id))?;
        player.surname = update.surname.clone();
        player.name = update.name.clone();
        player.sex = update.sex;
        write_jsonl(&self.players_path(), &players)
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut players = self.read_players()?;
        if !players.iter().any(|p| p.id == id) {
            return Err(StorageError::PlayerNotFound(id));
        }

        let mut games = self.read_games()?;
        games.retain(|g| !g.involves(id));
        write_jsonl(&self.games_path(), &games)?;

        players.retain(|p| p.id != id);
        write_jsonl(&self.players_path(), &players)
    }

    async fn list_games(&self, tournament: TournamentId) -> Result<Vec<Game>, StorageError> {
        let members = self.member_ids(tournament)?;
        let mut games: Vec<Game> = self
            .read_games()?
            .into_iter()
            .filter(|g| members.contains(&g.white_player_id))
            .collect();
        games.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(games)
    }

    async fn create_games(&self, batch: &[GameDraft]) -> Result<Vec<GameId>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let games = self.read_games()?;
        let mut next_id = games.iter().map(|g| g.id.0).max().unwrap_or(0);
        let now = Utc::now();

        let staged: Vec<Game> = batch
            .iter()
            .map(|draft| {
                next_id += 1;
                Game {
                    id: GameId(next_id),
                    white_player_id: draft.white_player_id,
                    black_player_id: draft.black_player_id,
                    result: draft.result,
                    date: draft.date,
                    created_at: now,
                }
            })
            .collect();

        append_jsonl(&self.games_path(), &staged)?;
        Ok(staged.iter().map(|g| g.id).collect())
    }

    async fn update_result(
        &self,
        id: GameId,
        result: GameResult,
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut games = self.read_games()?;
        let game = games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StorageError::GameNotFound(id))?;
        game.result = result;
        write_jsonl(&self.games_path(), &games)
    }

    async fn delete_game(&self, id: GameId) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut games = self.read_games()?;
        if !games.iter().any(|g| g.id == id) {
            return Err(StorageError::GameNotFound(id));
        }
        games.retain(|g| g.id != id);
        write_jsonl(&self.games_path(), &games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn player_draft(surname: &str, tournament: TournamentId) -> PlayerDraft {
        PlayerDraft {
            surname: surname.to_string(),
            name: "Test".to_string(),
            sex: Sex::M,
            tournament_id: tournament,
        }
    }

    fn game_draft(white: PlayerId, black: Option<PlayerId>) -> GameDraft {
        GameDraft {
            white_player_id: white,
            black_player_id: black,
            result: GameResult::NotPlayed,
            date: NaiveDate::from_ymd_opt(2026, 4, 18).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_roundtrip_through_files() {
        let tmp = TempDir::new().unwrap();
        let store = JsonlStore::new(tmp.path().to_path_buf());

        let t = store.create_tournament("File Night").await.unwrap();
        let a = store.create_player(&player_draft("Alders", t.id)).await.unwrap();
        let b = store.create_player(&player_draft("Boon", t.id)).await.unwrap();
        store
            .create_games(&[game_draft(a.id, Some(b.id))])
            .await
            .unwrap();

        // A fresh handle over the same directory sees everything.
        let reopened = JsonlStore::new(tmp.path().to_path_buf());
        let players = reopened.list_players(t.id).await.unwrap();
        assert_eq!(players.len(), 2);
        let games = reopened.list_games(t.id).await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].result, GameResult::NotPlayed);
    }

    #[tokio::test]
    async fn test_ids_continue_after_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = JsonlStore::new(tmp.path().to_path_buf());
            let t = store.create_tournament("Night").await.unwrap();
            store.create_player(&player_draft("Alders", t.id)).await.unwrap();
        }

        let store = JsonlStore::new(tmp.path().to_path_buf());
        let p = store
            .create_player(&player_draft("Boon", TournamentId(1)))
            .await
            .unwrap();
        assert_eq!(p.id, PlayerId(2));
    }

    #[tokio::test]
    async fn test_read_skips_bad_lines() {
        let tmp = TempDir::new().unwrap();
        let store = JsonlStore::new(tmp.path().to_path_buf());
        let t = store.create_tournament("Night").await.unwrap();
        store.create_player(&player_draft("Alders", t.id)).await.unwrap();

        // Corrupt the players file with a junk line in the middle.
        let path = tmp.path().join(PLAYERS_FILE);
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("not-valid-json\n");
        std::fs::write(&path, content).unwrap();
        store.create_player(&player_draft("Boon", t.id)).await.unwrap();

        let players = store.list_players(t.id).await.unwrap();
        assert_eq!(players.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = JsonlStore::new(tmp.path().to_path_buf());
        let ids = store.create_games(&[]).await.unwrap();
        assert!(ids.is_empty());
        assert!(!tmp.path().join(GAMES_FILE).exists());
    }

    #[tokio::test]
    async fn test_update_result_persists() {
        let tmp = TempDir::new().unwrap();
        let store = JsonlStore::new(tmp.path().to_path_buf());
        let t = store.create_tournament("Night").await.unwrap();
        let a = store.create_player(&player_draft("Alders", t.id)).await.unwrap();
        let b = store.create_player(&player_draft("Boon", t.id)).await.unwrap();
        let ids = store
            .create_games(&[game_draft(a.id, Some(b.id))])
            .await
            .unwrap();

        store.update_result(ids[0], GameResult::Draw).await.unwrap();

        let reopened = JsonlStore::new(tmp.path().to_path_buf());
        let games = reopened.list_games(t.id).await.unwrap();
        assert_eq!(games[0].result, GameResult::Draw);
    }

    #[tokio::test]
    async fn test_delete_tournament_clears_files() {
        let tmp = TempDir::new().unwrap();
        let store = JsonlStore::new(tmp.path().to_path_buf());
        let t = store.create_tournament("Night").await.unwrap();
        let a = store.create_player(&player_draft("Alders", t.id)).await.unwrap();
        store.create_games(&[game_draft(a.id, None)]).await.unwrap();

        store.delete_tournament(t.id).await.unwrap();

        assert!(store.list_tournaments().await.unwrap().is_empty());
        assert!(store.list_players(t.id).await.unwrap().is_empty());
    }
}
