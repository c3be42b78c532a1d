//! SQLite database operations
//!
//! Provides the storage handle for the movie catalog: connection pool management
//! and schema initialization.

use crate::error::Error;
use crate::storage::migrations;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default maximum connections in the pool
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const IN_MEMORY: &str = ":memory:";

/// Database configuration options
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Journal mode (default: WAL)
    pub journal_mode: SqliteJournalMode,
    /// Synchronous mode (default: NORMAL for balance of safety/performance)
    pub synchronous: SqliteSynchronous,
}

impl DatabaseConfig {
    /// Create a new database config with the specified path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            journal_mode: SqliteJournalMode::Wal,
            synchronous: SqliteSynchronous::Normal,
        }
    }

    /// Create a config for an in-memory database (useful for testing)
    pub fn in_memory() -> Self {
        Self {
            max_connections: 1, // In-memory requires single connection
            ..Self::with_path(IN_MEMORY)
        }
    }

    fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }
}

/// Storage handle wrapping the connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    config: DatabaseConfig,
}

impl Database {
    /// Open (creating if needed) the database described by `config`
    ///
    /// Fails with [`Error::StorageUnavailable`] when the file or its directory
    /// cannot be created, the connection cannot be established, or the schema
    /// cannot be applied.
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let unavailable = |reason: String| Error::StorageUnavailable {
            path: config.path.clone(),
            reason,
        };

        if !config.is_in_memory() {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        unavailable(format!("Failed to create database directory: {e}"))
                    })?;
                }
            }
        }

        // File paths are handed over verbatim, never through a connection URL
        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| unavailable(format!("Invalid in-memory database: {e}")))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(true)
        }
        .journal_mode(config.journal_mode)
        .synchronous(config.synchronous);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(connect_options)
            .await
            .map_err(|e| unavailable(format!("Failed to connect to database: {e}")))?;

        let db = Self {
            pool,
            config: config.clone(),
        };

        db.migrate()
            .await
            .map_err(|e| unavailable(format!("Failed to apply schema: {e:#}")))?;

        tracing::debug!(path = %config.path.display(), "Opened movie database");
        Ok(db)
    }

    /// Open the database file at `path` with default settings
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(DatabaseConfig::with_path(path)).await
    }

    /// Create an in-memory database (useful for testing)
    pub async fn in_memory() -> Result<Self> {
        Self::new(DatabaseConfig::in_memory()).await
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Close the database connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
