//! Saved-game persistence: JSON files and a SQLite catalogue.
//!
//! RULE: Only store.rs touches the filesystem or the database.
//! Everything it writes is the JSON form of a [`SnapshotModel`], and
//! everything it reads back goes through `SnapshotModel::from_json`.

use crate::{
    error::SaveResult,
    snapshot::SnapshotModel,
    types::{GameState, Version},
};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// File name suffix of a saved game.
pub const SAVED_GAME_EXTENSION: &str = ".game.json";

// ── Files ──────────────────────────────────────────────────────

/// File name for a saved game: the game name with anything outside
/// `[A-Za-z0-9_-]` replaced by `_`.
pub fn saved_game_file_name(game_name: &str) -> String {
    let stem: String = game_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}{SAVED_GAME_EXTENSION}")
}

/// Write `model` into `dir`, creating the directory if needed.
pub fn save_to_file(model: &SnapshotModel, dir: &Path, pretty: bool) -> SaveResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(saved_game_file_name(&model.game_name));
    let json = if pretty { model.to_json_pretty()? } else { model.to_json()? };
    std::fs::write(&path, json)?;
    log::info!("game '{}': saved to {}", model.game_name, path.display());
    Ok(path)
}

/// Read, parse and check a saved game file.
pub fn load_from_file(path: &Path) -> SaveResult<SnapshotModel> {
    let json = std::fs::read_to_string(path)?;
    let model = SnapshotModel::from_json(&json)?;
    log::debug!("game '{}': read from {}", model.game_name, path.display());
    Ok(model)
}

// ── SQLite ─────────────────────────────────────────────────────

/// One row of the saved-game catalogue, without the JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGameRow {
    pub id:            String,
    pub game_name:     String,
    pub model_version: Version,
    pub game_state:    GameState,
    pub saved_at:      DateTime<Utc>,
    pub size_bytes:    usize,
}

pub struct SaveStore {
    conn: Connection,
}

impl SaveStore {
    /// Open (or create) the saved-game database at `path`.
    pub fn open(path: &str) -> SaveResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SaveResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SaveResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_saved_games.sql"))?;
        Ok(())
    }

    /// Store `model` and return its new row id.
    pub fn insert_saved_game(
        &self,
        model: &SnapshotModel,
        saved_at: DateTime<Utc>,
    ) -> SaveResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let json = model.to_json()?;
        self.conn.execute(
            "INSERT INTO saved_game (id, game_name, model_version, game_state, saved_at, model_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                model.game_name,
                model.model_version,
                model.game_state.code(),
                saved_at.timestamp_millis(),
                json,
            ],
        )?;
        log::debug!("game '{}': stored as {id} ({} bytes)", model.game_name, json.len());
        Ok(id)
    }

    /// Most recent save of `game_name`, if any.
    pub fn latest_for_game(&self, game_name: &str) -> SaveResult<Option<SnapshotModel>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT model_json FROM saved_game
                 WHERE game_name = ?1
                 ORDER BY saved_at DESC, rowid DESC LIMIT 1",
                params![game_name],
                |row| row.get(0),
            )
            .optional()?;
        json.as_deref().map(SnapshotModel::from_json).transpose()
    }

    /// Load one save by id.
    pub fn load_saved_game(&self, id: &str) -> SaveResult<Option<SnapshotModel>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT model_json FROM saved_game WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        json.as_deref().map(SnapshotModel::from_json).transpose()
    }

    /// Every save, newest first.
    pub fn list_saved_games(&self) -> SaveResult<Vec<SavedGameRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, game_name, model_version, game_state, saved_at,
                    length(CAST(model_json AS BLOB))
             FROM saved_game
             ORDER BY saved_at DESC, rowid DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let millis: i64 = row.get(4)?;
                let saved_at = Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        Type::Integer,
                        format!("saved_at {millis} is not a valid timestamp").into(),
                    )
                })?;
                Ok(SavedGameRow {
                    id:            row.get(0)?,
                    game_name:     row.get(1)?,
                    model_version: row.get(2)?,
                    game_state:    GameState(row.get(3)?),
                    saved_at,
                    size_bytes:    row.get::<_, i64>(5)?.max(0) as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Delete one save. Returns false if no row had that id.
    pub fn delete_saved_game(&self, id: &str) -> SaveResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM saved_game WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
