//! moviedb Core Library
//!
//! This crate provides the core functionality for moviedb, including:
//! - Storage (SQLite handle, schema migrations, JSON import/export)
//! - Catalog commands (search, add, modify, delete)
//! - Text reports for record listings
//! - Configuration with file persistence

pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod storage;

pub use error::{Error, Result};
