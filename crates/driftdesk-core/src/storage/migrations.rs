//! Database migrations

use crate::error::{Error, Result, StorageError};
use rusqlite::Connection;
use tracing::{debug, info};

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    info!("Running database migrations");

    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )?;

    let migrations: Vec<(&str, &str)> = vec![
        ("001_threads", MIGRATION_001_THREADS),
        ("002_settings", MIGRATION_002_SETTINGS),
    ];

    for (name, sql) in migrations {
        if !migration_applied(conn, name)? {
            apply_migration(conn, name, sql)?;
        }
    }

    info!("All migrations completed");
    Ok(())
}

fn apply_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
    debug!("Applying migration: {}", name);
    conn.execute_batch(sql).map_err(|e| {
        Error::Storage(StorageError::MigrationFailed(format!("{}: {}", name, e)))
    })?;
    mark_migration_applied(conn, name)?;
    info!("Applied migration: {}", name);
    Ok(())
}

fn migration_applied(conn: &Connection, name: &str) -> Result<bool> {
    let count: i32 = conn.query_row(
        "SELECT COUNT(*) FROM migrations WHERE name = ?",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn mark_migration_applied(conn: &Connection, name: &str) -> Result<()> {
    conn.execute("INSERT INTO migrations (name) VALUES (?)", [name])?;
    Ok(())
}

const MIGRATION_001_THREADS: &str = r#"
-- Threads table
CREATE TABLE IF NOT EXISTS threads (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    assistants TEXT NOT NULL DEFAULT '[]',  -- JSON array of thread assistants
    last_message TEXT,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_threads_updated ON threads(updated_at DESC);

-- Messages table
CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY,
    thread_id TEXT NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
    seq INTEGER NOT NULL,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at DATETIME NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_thread ON messages(thread_id, seq);
"#;

const MIGRATION_002_SETTINGS: &str = r#"
-- Settings table (key/value)
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_run_successfully() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"threads".to_string()));
        assert!(tables.contains(&"messages".to_string()));
        assert!(tables.contains(&"settings".to_string()));
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let count: i32 = conn
            .query_row("SELECT COUNT(*) FROM migrations", [], |row| row.get(0))
            .unwrap();

        assert_eq!(count, 2);
    }

    #[test]
    fn test_broken_migration_reports_name_and_is_not_recorded() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let err = apply_migration(&conn, "003_broken", "CREATE TABLE threads (id TEXT);")
            .unwrap_err();
        match err {
            Error::Storage(StorageError::MigrationFailed(msg)) => {
                assert!(msg.starts_with("003_broken: "), "unexpected message: {}", msg);
            }
            other => panic!("expected MigrationFailed, got {:?}", other),
        }
        assert!(!migration_applied(&conn, "003_broken").unwrap());
    }
}
