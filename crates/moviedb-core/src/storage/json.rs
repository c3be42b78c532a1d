//! JSON import/export of movie records
//!
//! Both directions use a single JSON array. Imports read objects with
//! `title, director, genre, year, rating`; exports additionally write `id`
//! first. Exports are indented with four spaces and keep non-ASCII text
//! unescaped so titles stay readable in any editor.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::commands::catalog::{self, Selector};
use crate::commands::movie::{NewMovie, INSERT_MOVIE};
use crate::error::Error;
use crate::storage::Database;
use crate::Result;

const EXPORT_INDENT: &[u8] = b"    ";

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// File the records were read from
    pub source: PathBuf,
    /// Number of movies inserted
    pub imported: usize,
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// File that was written
    pub path: PathBuf,
    /// Number of movies written
    pub count: usize,
    /// When the export was written
    pub exported_at: DateTime<Utc>,
}

/// Result of an export request
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Exported(ExportReport),
    /// Nothing matched the selector; no file was written
    Empty,
}

/// Import every movie in the JSON array at `path`
///
/// All rows are inserted in one transaction: if any record is rejected the
/// catalog is left exactly as it was.
pub async fn import_movies(db: &Database, path: &Path) -> Result<ImportReport> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let movies: Vec<NewMovie> =
        serde_json::from_str(&contents).map_err(|source| Error::MalformedJson {
            path: path.to_path_buf(),
            source,
        })?;

    let mut tx = db.pool().begin().await?;
    for (index, movie) in movies.iter().enumerate() {
        sqlx::query(INSERT_MOVIE)
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(&movie.genre)
            .bind(movie.year)
            .bind(movie.rating)
            .execute(&mut *tx)
            .await
            .map_err(|e| match Error::from_write(e) {
                Error::ConstraintViolation(msg) => Error::ConstraintViolation(format!(
                    "record {} ('{}'): {}",
                    index + 1,
                    movie.title,
                    msg
                )),
                other => other,
            })?;
    }
    tx.commit().await?;

    tracing::info!(path = %path.display(), imported = movies.len(), "Movies imported");
    Ok(ImportReport {
        source: path.to_path_buf(),
        imported: movies.len(),
    })
}

/// Export the movies picked by `selector` to `path`
pub async fn export_movies(db: &Database, path: &Path, selector: &Selector) -> Result<ExportOutcome> {
    let movies = catalog::search(db, selector).await?;
    if movies.is_empty() {
        tracing::debug!(?selector, "Nothing to export");
        return Ok(ExportOutcome::Empty);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(EXPORT_INDENT));
    movies
        .serialize(&mut serializer)
        .map_err(|e| Error::Io(e.into()))?;
    writeln!(writer)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), count = movies.len(), "Movies exported");
    Ok(ExportOutcome::Exported(ExportReport {
        path: path.to_path_buf(),
        count: movies.len(),
        exported_at: Utc::now(),
    }))
}
