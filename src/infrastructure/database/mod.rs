use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::entities::{Flag, FlagSet, TriggerRule};
use crate::domain::traits::{FlagStore, Store, TriggerStore};

/// SQLite-backed flag and trigger store.
///
/// All access goes through one connection, one operation at a time.
pub struct Database {
    conn: Mutex<Option<Connection>>,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        init_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StorageError> {
        let mut guard: MutexGuard<'_, Option<Connection>> =
            self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let conn = guard.as_mut().ok_or(StorageError::Closed)?;
        Ok(f(conn)?)
    }
}

fn init_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS flags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            flags TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS triggers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pattern TEXT NOT NULL,
            response TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_triggers_pattern ON triggers(pattern)",
        [],
    )?;

    Ok(())
}

impl FlagStore for Database {
    fn add_flag(&self, username: &str, flag: Flag) -> Result<FlagSet, StorageError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let existing: Option<String> = tx
                .query_row(
                    "SELECT flags FROM flags WHERE username = ?1",
                    [username],
                    |row| row.get(0),
                )
                .optional()?;

            let merged = match existing {
                Some(codes) => {
                    let merged = FlagSet::from_codes(codes).merge(flag);
                    tx.execute(
                        "UPDATE flags SET flags = ?1 WHERE username = ?2",
                        params![merged.as_str(), username],
                    )?;
                    merged
                }
                None => {
                    let merged = FlagSet::new().merge(flag);
                    tx.execute(
                        "INSERT INTO flags (username, flags) VALUES (?1, ?2)",
                        params![username, merged.as_str()],
                    )?;
                    merged
                }
            };
            tx.commit()?;
            Ok(merged)
        })
    }

    fn get_flags(&self, username: &str) -> Result<FlagSet, StorageError> {
        self.with_conn(|conn| {
            let codes: Option<String> = conn
                .query_row(
                    "SELECT flags FROM flags WHERE username = ?1",
                    [username],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(codes.map(FlagSet::from_codes).unwrap_or_default())
        })
    }
}

impl TriggerStore for Database {
    fn learn(&self, pattern: &str, response: &str) -> Result<bool, StorageError> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO triggers (pattern, response)
                 SELECT ?1, ?2
                 WHERE NOT EXISTS (
                     SELECT 1 FROM triggers WHERE pattern = ?1 AND response = ?2
                 )",
                params![pattern, response],
            )?;
            Ok(inserted > 0)
        })
    }

    fn forget(&self, pattern: &str) -> Result<usize, StorageError> {
        self.with_conn(|conn| conn.execute("DELETE FROM triggers WHERE pattern = ?1", [pattern]))
    }

    fn response_for(&self, pattern: &str) -> Result<Option<String>, StorageError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT response FROM triggers WHERE pattern = ?1 ORDER BY id LIMIT 1",
                [pattern],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn list_all(&self) -> Result<Vec<TriggerRule>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT pattern, response FROM triggers ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok(TriggerRule {
                    pattern: row.get(0)?,
                    response: row.get(1)?,
                })
            })?;

            let mut rules = Vec::new();
            for rule in rows {
                rules.push(rule?);
            }
            Ok(rules)
        })
    }

    fn purge(&self) -> Result<usize, StorageError> {
        self.with_conn(|conn| conn.execute("DELETE FROM triggers", []))
    }
}

impl Store for Database {
    fn close(&self) -> Result<(), StorageError> {
        let mut guard = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let conn = guard.take().ok_or(StorageError::Closed)?;
        conn.close().map_err(|(_, e)| StorageError::Sqlite(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_flag_creates_and_merges() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_flags("bob").unwrap().is_empty());

        db.add_flag("bob", Flag::Whitelist).unwrap();
        assert_eq!(db.get_flags("bob").unwrap().codes(), vec!['w']);

        db.add_flag("bob", Flag::Admin).unwrap();
        assert_eq!(db.get_flags("bob").unwrap().as_str(), "aw");
    }

    #[test]
    fn test_add_flag_twice_duplicates_code() {
        let db = Database::in_memory().unwrap();
        db.add_flag("bob", Flag::Ignore).unwrap();
        db.add_flag("bob", Flag::Ignore).unwrap();
        assert_eq!(db.get_flags("bob").unwrap().as_str(), "ii");
    }

    #[test]
    fn test_add_flag_named() {
        let db = Database::in_memory().unwrap();
        db.add_flag_named("bob", "whitelist").unwrap();
        db.add_flag_named("bob", "i").unwrap();
        assert_eq!(db.get_flags("bob").unwrap().as_str(), "iw");
    }

    #[test]
    fn test_unknown_flag_leaves_flags_unchanged() {
        let db = Database::in_memory().unwrap();
        db.add_flag("bob", Flag::Admin).unwrap();

        let err = db.add_flag_named("bob", "root").unwrap_err();
        assert!(err.to_string().contains("Valid flags are a, w, i"));
        assert_eq!(db.get_flags("bob").unwrap().as_str(), "a");
    }

    #[test]
    fn test_learn_is_idempotent() {
        let db = Database::in_memory().unwrap();
        assert!(db.learn("^hi", "hello").unwrap());
        assert!(!db.learn("^hi", "hello").unwrap());
        assert!(db.learn("^hi", "hey").unwrap());

        let rules = db.list_all().unwrap();
        assert_eq!(
            rules,
            vec![TriggerRule::new("^hi", "hello"), TriggerRule::new("^hi", "hey")]
        );
    }

    #[test]
    fn test_forget_removes_every_row_for_pattern() {
        let db = Database::in_memory().unwrap();
        db.learn("^hi", "hello").unwrap();
        db.learn("^hi", "hey").unwrap();
        db.learn("^bye", "later").unwrap();

        assert_eq!(db.response_for("^hi").unwrap().as_deref(), Some("hello"));
        assert_eq!(db.forget("^hi").unwrap(), 2);
        assert_eq!(db.response_for("^hi").unwrap(), None);
        assert_eq!(db.forget("hi").unwrap(), 0);
        assert_eq!(db.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_match_message_uses_storage_order() {
        let db = Database::in_memory().unwrap();
        db.learn("he", "short ${nick}").unwrap();
        db.learn("hello", "long ${nick}").unwrap();

        assert_eq!(
            db.match_message("hello there", "alice").unwrap().as_deref(),
            Some("short alice")
        );
        assert_eq!(db.match_message("say hello", "alice").unwrap(), None);
    }

    #[test]
    fn test_purge() {
        let db = Database::in_memory().unwrap();
        db.learn("a", "1").unwrap();
        db.learn("b", "2").unwrap();
        assert_eq!(db.purge().unwrap(), 2);
        assert!(db.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_operations_after_close_fail() {
        let db = Database::in_memory().unwrap();
        db.close().unwrap();
        assert!(matches!(db.get_flags("bob"), Err(StorageError::Closed)));
        assert!(matches!(db.close(), Err(StorageError::Closed)));
    }
}
