//! SQLite-based persistence layer
//!
//! This module provides:
//! - Database initialization and migrations
//! - CRUD operations for threads, messages and settings
//! - Connection pooling

mod migrations;
mod queries;

pub use migrations::run_migrations;
pub use queries::*;

use crate::error::{Error, Result, StorageError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::{Path, PathBuf};
use tracing::info;

/// Database connection pool type
pub type DbPool = Pool<SqliteConnectionManager>;

/// Storage manager for database operations
pub struct Storage {
    pool: DbPool,
    db_path: PathBuf,
}

impl Storage {
    /// Open storage in the platform data directory (`<data_dir>/driftdesk`)
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join("driftdesk"))
            .ok_or_else(|| Error::Internal("No data directory available".to_string()))?;
        Self::new_with_path(data_dir)
    }

    /// Create a new storage instance with a directory path
    pub fn new_with_path(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();

        std::fs::create_dir_all(data_dir).map_err(|e| {
            Error::Storage(StorageError::Database(format!(
                "Failed to create data directory: {}",
                e
            )))
        })?;

        let db_path = data_dir.join("driftdesk.db");
        info!("Database path: {:?}", db_path);

        Self::from_path(db_path)
    }

    /// Create storage from a specific path
    pub fn from_path(db_path: PathBuf) -> Result<Self> {
        let manager = SqliteConnectionManager::file(&db_path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| Error::Storage(StorageError::Pool(e.to_string())))?;

        let storage = Self { pool, db_path };
        storage.initialize()?;

        Ok(storage)
    }

    /// Create in-memory storage (for testing)
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory()
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        // A recycled connection would take the database with it
        let pool = Pool::builder()
            .max_size(1)
            .max_lifetime(None)
            .idle_timeout(None)
            .build(manager)
            .map_err(|e| Error::Storage(StorageError::Pool(e.to_string())))?;

        let storage = Self {
            pool,
            db_path: PathBuf::from(":memory:"),
        };

        storage.initialize()?;

        Ok(storage)
    }

    fn initialize(&self) -> Result<()> {
        let conn = self.pool.get()?;
        run_migrations(&conn)?;
        info!("Database initialized successfully");
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| Error::Storage(StorageError::Pool(e.to_string())))
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Load application settings, falling back to defaults when none are stored
    pub fn load_settings(&self) -> Result<crate::types::AppSettings> {
        let conn = self.connection()?;
        queries::load_app_settings(&conn)
    }

    pub fn save_settings(&self, settings: &crate::types::AppSettings) -> Result<()> {
        let conn = self.connection()?;
        queries::save_app_settings(&conn, settings)
    }
}
