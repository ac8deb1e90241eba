// SQLite persistence for playlist state.
// Data lives in ~/.local/share/chakrabeats/chakrabeats.db.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// SQLite-backed store for the playlist and its current position.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the SQLite database.
    pub fn open() -> anyhow::Result<Self> {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chakrabeats");
        Self::open_at(&data_dir.join("chakrabeats.db"))
    }

    pub fn open_at(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> anyhow::Result<()> {
        let sql = include_str!("../migrations/001_init.sql");
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    // ── Playlist persistence ──

    pub fn save_playlist(&self, items: &[PathBuf], current_index: Option<usize>) -> anyhow::Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM playlist", [])?;
        tx.execute("DELETE FROM playlist_state", [])?;

        {
            let mut stmt = tx.prepare("INSERT INTO playlist (position, path) VALUES (?1, ?2)")?;
            for (i, path) in items.iter().enumerate() {
                stmt.execute(params![i as i64, path.to_string_lossy()])?;
            }
        }

        if let Some(idx) = current_index {
            tx.execute(
                "INSERT INTO playlist_state (key, value) VALUES ('current_index', ?1)",
                params![idx.to_string()],
            )?;
        }

        tx.commit()?;
        tracing::debug!(tracks = items.len(), ?current_index, "playlist saved");
        Ok(())
    }

    pub fn load_playlist(&self) -> anyhow::Result<(Vec<PathBuf>, Option<usize>)> {
        let mut stmt = self
            .conn
            .prepare("SELECT path FROM playlist ORDER BY position ASC")?;
        let items = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|r| r.map(PathBuf::from))
            .collect::<Result<Vec<_>, _>>()?;

        let current_index = self
            .conn
            .query_row(
                "SELECT value FROM playlist_state WHERE key = 'current_index'",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .and_then(|v| v.parse::<usize>().ok());

        Ok((items, current_index))
    }
}
