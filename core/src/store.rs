//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The engine hands over serialized snapshots and events; it never
//! executes SQL directly.

use crate::{
    error::GameResult,
    event::EventLogEntry,
    types::GameId,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SaveStore {
    conn: Connection,
}

impl SaveStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Snapshot ───────────────────────────────────────────────

    /// Replace the snapshot held in `slot`.
    pub fn save_snapshot(
        &self,
        slot:       &str,
        game_id:    GameId,
        version:    u32,
        saved_at:   &str,
        state_json: &str,
    ) -> GameResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO save_slot (slot, game_id, version, saved_at, state_json)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![slot, game_id.to_string(), version, saved_at, state_json],
        )?;
        Ok(())
    }

    pub fn load_snapshot(&self, slot: &str) -> GameResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM save_slot WHERE slot = ?1",
                params![slot],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(json)
    }

    /// Drop the snapshot in `slot`. Returns whether one existed.
    pub fn discard_snapshot(&self, slot: &str) -> GameResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM save_slot WHERE slot = ?1", params![slot])?;
        Ok(removed > 0)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (slot, game_id, at_ms, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.slot,
                entry.game_id.to_string(),
                entry.at_ms as i64,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    /// Every logged event of one game, in insertion order.
    pub fn events_for_game(&self, game_id: GameId) -> GameResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, slot, at_ms, event_type, payload
             FROM event_log WHERE game_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![game_id.to_string()], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    slot:       row.get(1)?,
                    game_id,
                    at_ms:      row.get::<_, i64>(2)? as u64,
                    event_type: row.get(3)?,
                    payload:    row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, game_id: GameId, event_type: &str) -> GameResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE game_id = ?1 AND event_type = ?2",
            params![game_id.to_string(), event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SaveStore {
        let store = SaveStore::in_memory().expect("in-memory store");
        store.migrate().expect("migration");
        store
    }

    #[test]
    fn snapshot_slot_is_replaced() {
        let store = store();
        let id = uuid::Uuid::nil();
        store.save_snapshot("main", id, 1, "t0", "{\"a\":1}").unwrap();
        store.save_snapshot("main", id, 1, "t1", "{\"a\":2}").unwrap();
        assert_eq!(store.load_snapshot("main").unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(store.load_snapshot("other").unwrap().is_none());
    }

    #[test]
    fn discard_removes_slot() {
        let store = store();
        store.save_snapshot("main", uuid::Uuid::nil(), 1, "t0", "{}").unwrap();
        assert!(store.discard_snapshot("main").unwrap());
        assert!(!store.discard_snapshot("main").unwrap());
        assert!(store.load_snapshot("main").unwrap().is_none());
    }

    #[test]
    fn events_round_trip_in_order() {
        let store = store();
        let game_id = uuid::Uuid::new_v4();
        for (i, kind) in ["button_clicked", "market_moved", "button_clicked"].iter().enumerate() {
            store
                .append_event(&EventLogEntry {
                    id: None,
                    slot: "main".into(),
                    game_id,
                    at_ms: i as u64,
                    event_type: kind.to_string(),
                    payload: "{}".into(),
                })
                .unwrap();
        }
        let events = store.events_for_game(game_id).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].event_type, "market_moved");
        assert_eq!(store.event_count(game_id, "button_clicked").unwrap(), 2);
    }
}
