//! SQLite-backed document store
//!
//! Manages the `~/.mesmerizer/mesmerizer.db` database. A single connection is
//! shared behind a mutex so the GUI thread and the voice thread can both call
//! into the store; every operation takes the lock exactly once.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use super::StoreError;
use crate::config::Config;
use crate::domain::{DeleteOutcome, InsertOutcome, SearchOutcome, StoredDocument};

/// Number of matching lines returned by [`DocumentStore::search`] by default
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Handle to the document table. Cheap to clone; clones share the connection.
#[derive(Clone)]
pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentStore {
    /// Open or create the store at the default location (~/.mesmerizer/mesmerizer.db)
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&Config::global_config_dir().join("mesmerizer.db"))
    }

    /// Open or create the store at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::with_connection(conn)
    }

    /// Open a private in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock cannot leave a half-applied statement
        // behind, so a poisoned connection is still usable.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a document unless one with the same filename exists.
    ///
    /// Existing content is never overwritten.
    pub fn insert(&self, filename: &str, content: &str) -> Result<InsertOutcome, StoreError> {
        let conn = self.conn();

        if Self::exists_locked(&conn, filename)? {
            debug!("Document '{}' already stored", filename);
            return Ok(InsertOutcome::AlreadyExists);
        }

        conn.execute(
            "INSERT INTO pdfs (filename, content) VALUES (?1, ?2)",
            params![filename, content],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Stored document '{}' as id {}", filename, id);
        Ok(InsertOutcome::Inserted { id })
    }

    /// Whether a document with this filename is stored
    pub fn contains(&self, filename: &str) -> Result<bool, StoreError> {
        Self::exists_locked(&self.conn(), filename)
    }

    fn exists_locked(conn: &Connection, filename: &str) -> Result<bool, StoreError> {
        let found = conn
            .query_row(
                "SELECT 1 FROM pdfs WHERE filename = ?1",
                params![filename],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All stored filenames, newest first
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT filename FROM pdfs ORDER BY id DESC")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Content of a document, or `None` if no such filename is stored
    pub fn fetch(&self, filename: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn();
        let content = conn
            .query_row(
                "SELECT content FROM pdfs WHERE filename = ?1",
                params![filename],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(content)
    }

    /// Full record for a filename
    pub fn get(&self, filename: &str) -> Result<Option<StoredDocument>, StoreError> {
        let conn = self.conn();
        let doc = conn
            .query_row(
                "SELECT id, filename, content FROM pdfs WHERE filename = ?1",
                params![filename],
                |row| {
                    Ok(StoredDocument {
                        id: row.get(0)?,
                        filename: row.get(1)?,
                        content: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(doc)
    }

    /// Delete exactly the record with this filename
    pub fn delete(&self, filename: &str) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn();
        let removed = conn.execute("DELETE FROM pdfs WHERE filename = ?1", params![filename])?;
        Ok(if removed == 0 {
            DeleteOutcome::NotFound
        } else {
            DeleteOutcome::Deleted
        })
    }

    /// Lines of a document containing `keyword` (case-insensitive), at most `limit`
    pub fn search(
        &self,
        filename: &str,
        keyword: &str,
        limit: usize,
    ) -> Result<SearchOutcome, StoreError> {
        let Some(content) = self.fetch(filename)? else {
            return Ok(SearchOutcome::DocumentNotFound);
        };
        if content.is_empty() {
            return Ok(SearchOutcome::DocumentNotFound);
        }

        let needle = keyword.to_lowercase();
        let matches: Vec<String> = content
            .lines()
            .filter(|line| line.to_lowercase().contains(&needle))
            .take(limit)
            .map(str::to_string)
            .collect();

        Ok(if matches.is_empty() {
            SearchOutcome::NoMatches
        } else {
            SearchOutcome::Matches(matches)
        })
    }

    /// Number of stored documents
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.conn();
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM pdfs", [], |r| r.get(0))?;
        Ok(n as usize)
    }
}

/// SQL schema for the document store
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS pdfs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT UNIQUE,
    content TEXT
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("test.db");
        let store = DocumentStore::open(&db_path).unwrap();

        let conn = store.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"pdfs".to_string()));
        assert!(db_path.exists());
    }

    #[test]
    fn test_duplicate_insert_keeps_original_content() {
        let store = DocumentStore::open_in_memory().unwrap();

        let first = store.insert("report.pdf", "original").unwrap();
        assert!(matches!(first, InsertOutcome::Inserted { .. }));

        let second = store.insert("report.pdf", "replacement").unwrap();
        assert_eq!(second, InsertOutcome::AlreadyExists);

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.fetch("report.pdf").unwrap().as_deref(), Some("original"));
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = DocumentStore::open_in_memory().unwrap();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            store.insert(name, "x").unwrap();
        }
        assert_eq!(store.list().unwrap(), vec!["c.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_delete_missing_leaves_store_unchanged() {
        let store = DocumentStore::open_in_memory().unwrap();
        store.insert("a.pdf", "x").unwrap();

        assert_eq!(store.delete("nope.pdf").unwrap(), DeleteOutcome::NotFound);
        assert_eq!(store.list().unwrap(), vec!["a.pdf"]);
    }

    #[test]
    fn test_delete_removes_only_target() {
        let store = DocumentStore::open_in_memory().unwrap();
        store.insert("a.pdf", "x").unwrap();
        store.insert("b.pdf", "y").unwrap();

        assert_eq!(store.delete("a.pdf").unwrap(), DeleteOutcome::Deleted);
        assert_eq!(store.list().unwrap(), vec!["b.pdf"]);
        assert_eq!(store.fetch("a.pdf").unwrap(), None);
        assert_eq!(store.fetch("b.pdf").unwrap().as_deref(), Some("y"));
    }

    #[test]
    fn test_ids_are_stable_after_delete() {
        let store = DocumentStore::open_in_memory().unwrap();
        store.insert("a.pdf", "x").unwrap();
        let InsertOutcome::Inserted { id } = store.insert("b.pdf", "y").unwrap() else {
            panic!("expected insert");
        };
        store.delete("a.pdf").unwrap();
        assert_eq!(store.get("b.pdf").unwrap().unwrap().id, id);
    }

    #[test]
    fn test_search_is_case_insensitive_and_limited() {
        let store = DocumentStore::open_in_memory().unwrap();
        let content = (1..=8)
            .map(|i| format!("Line {} mentions Budget", i))
            .chain(std::iter::once("unrelated".to_string()))
            .collect::<Vec<_>>()
            .join("\n");
        store.insert("plan.pdf", &content).unwrap();

        match store.search("plan.pdf", "budget", DEFAULT_SEARCH_LIMIT).unwrap() {
            SearchOutcome::Matches(lines) => {
                assert_eq!(lines.len(), 5);
                assert_eq!(lines[0], "Line 1 mentions Budget");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(
            store.search("plan.pdf", "zebra", 5).unwrap(),
            SearchOutcome::NoMatches
        );
        assert_eq!(
            store.search("missing.pdf", "budget", 5).unwrap(),
            SearchOutcome::DocumentNotFound
        );
    }
}
