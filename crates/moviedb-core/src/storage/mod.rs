//! Storage layer - SQLite + JSON import/export
//!
//! # Architecture
//!
//! - `database`: Connection pool management and initialization
//! - `migrations`: Schema versioning and automatic migration
//! - `json`: JSON array import and export of movie records
//!
//! # Usage
//!
//! ```ignore
//! use moviedb_core::storage::{Database, export_movies};
//! use moviedb_core::commands::Selector;
//!
//! let db = Database::open("movies.db").await?;
//! export_movies(&db, "exported.json".as_ref(), &Selector::All).await?;
//! db.close().await;
//! ```

pub mod database;
pub mod json;
pub mod migrations;

// Re-export commonly used types
pub use database::{Database, DatabaseConfig};
pub use json::{export_movies, import_movies, ExportOutcome, ExportReport, ImportReport};
