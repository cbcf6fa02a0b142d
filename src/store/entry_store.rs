//! Mood entry CRUD over the `moods` table.

use std::path::Path;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use log::{error, info, warn};
use rusqlite::{params, Connection};

use super::migrations::apply_migrations;
use super::{StoreError, StoreResult};
use crate::models::{normalize_text, EntryId, MoodEntry};
use crate::utils::{format_timestamp, local_now};

const LIST_DESCENDING_SQL: &str = "SELECT id, mood_text, timestamp
FROM moods
ORDER BY timestamp DESC, id DESC";

/// Exclusive owner of the SQLite connection holding mood entries.
///
/// The connection is released when the store is dropped or explicitly
/// [`closed`](EntryStore::close).
pub struct EntryStore {
    conn: Connection,
}

impl EntryStore {
    /// Opens (or creates) a database file and applies pending migrations.
    ///
    /// # Side effects
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=store status=start mode=file");

        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=store status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        Self::bootstrap(conn, "file", started_at)
    }

    /// Opens a private in-memory database; contents vanish with the store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=store status=start mode=memory");
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn, "memory", started_at)
    }

    fn bootstrap(mut conn: Connection, mode: &str, started_at: Instant) -> StoreResult<Self> {
        let result = conn
            .busy_timeout(Duration::from_secs(5))
            .map_err(StoreError::from)
            .and_then(|()| apply_migrations(&mut conn));

        match result {
            Ok(()) => {
                info!(
                    "event=db_open module=store status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=db_open module=store status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Validates, timestamps and persists a new entry.
    ///
    /// # Errors
    /// - `StoreError::Validation` when `text` is empty after trimming; no row
    ///   is written.
    /// - `StoreError::Storage` when the insert fails.
    pub fn append(&self, text: &str) -> StoreResult<MoodEntry> {
        self.append_at(text, local_now())
    }

    pub(crate) fn append_at(&self, text: &str, at: NaiveDateTime) -> StoreResult<MoodEntry> {
        let text = normalize_text(text)?;
        let created_at = format_timestamp(at);

        if let Err(err) = self.conn.execute(
            "INSERT INTO moods (mood_text, timestamp) VALUES (?1, ?2);",
            params![text, created_at],
        ) {
            error!(
                "event=entry_append module=store status=error error_code=insert_failed error={}",
                err
            );
            return Err(err.into());
        }

        let id = self.conn.last_insert_rowid();
        info!(
            "event=entry_append module=store status=ok id={} text_chars={}",
            id,
            text.chars().count()
        );

        Ok(MoodEntry {
            id,
            text: text.to_string(),
            created_at,
        })
    }

    /// All entries, newest first; entries sharing a second are ordered by
    /// descending id.
    pub fn list_all_descending(&self) -> StoreResult<Vec<MoodEntry>> {
        let mut stmt = self.conn.prepare(LIST_DESCENDING_SQL)?;
        let rows = stmt.query_map([], |row| {
            Ok(MoodEntry {
                id: row.get(0)?,
                text: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Removes one entry. Returns `false` when no row had that id.
    pub fn delete_by_id(&self, id: EntryId) -> StoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM moods WHERE id = ?1;", params![id])?;

        if removed == 0 {
            warn!("event=entry_delete module=store status=missing id={}", id);
            return Ok(false);
        }

        info!("event=entry_delete module=store status=ok id={}", id);
        Ok(true)
    }

    /// Removes every entry and returns how many rows were deleted.
    pub fn clear(&self) -> StoreResult<usize> {
        let removed = self.conn.execute("DELETE FROM moods;", [])?;
        info!("event=entry_clear module=store status=ok removed={}", removed);
        Ok(removed)
    }

    /// Releases the connection, reporting a failed close.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, err)| {
            error!("event=db_close module=store status=error error={}", err);
            StoreError::from(err)
        })?;
        info!("event=db_close module=store status=ok");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}
