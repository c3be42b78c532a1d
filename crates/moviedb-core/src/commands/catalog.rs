//! Catalog operations
//!
//! Each operation takes already-gathered input, runs against the database and
//! returns a report. "Nothing matched" is an outcome, not an error.
//!
//! Modify and delete act on the first movie whose title matches, in id order.
//! The `*_with` forms hand the whole match list to the caller before acting,
//! so an interactive front end can show every candidate.

use crate::commands::movie::{FieldUpdates, Movie, MovieRepository, NewMovie};
use crate::storage::Database;
use crate::Result;

/// Which movies an operation applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    /// Partial title match
    Title(String),
}

impl Selector {
    pub fn title(fragment: impl Into<String>) -> Self {
        Self::Title(fragment.into())
    }
}

/// Result of a modify request
#[derive(Debug, Clone, PartialEq)]
pub enum ModifyOutcome {
    Updated {
        before: Movie,
        after: Movie,
        /// Number of movies that matched the query
        matches: usize,
    },
    /// The caller abandoned the change after seeing the matches
    Cancelled,
    NotFound,
}

/// Result of a single-movie delete request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Movie),
    Declined,
    NotFound,
}

/// Fetch the movies picked by `selector`
pub async fn search(db: &Database, selector: &Selector) -> Result<Vec<Movie>> {
    let repo = MovieRepository::new(db);
    match selector {
        Selector::All => repo.list_all().await,
        Selector::Title(fragment) => repo.find_by_title(fragment).await,
    }
}

/// Validate and store a new movie
pub async fn add(db: &Database, movie: NewMovie) -> Result<Movie> {
    movie.validate()?;
    let stored = MovieRepository::new(db).insert(&movie).await?;
    tracing::info!(id = stored.id, title = %stored.title, "Movie added");
    Ok(stored)
}

/// Apply `updates` to the first movie whose title contains `query`
pub async fn modify(db: &Database, query: &str, updates: FieldUpdates) -> Result<ModifyOutcome> {
    modify_with(db, query, |_| Ok(Some(updates))).await
}

/// Interactive modify: `decide` sees all matches (target first) and returns
/// the updates to apply, or `None` to leave the catalog unchanged
pub async fn modify_with<F>(db: &Database, query: &str, decide: F) -> Result<ModifyOutcome>
where
    F: FnOnce(&[Movie]) -> Result<Option<FieldUpdates>>,
{
    let repo = MovieRepository::new(db);
    let matches = repo.find_by_title(query).await?;
    let Some(target) = matches.first() else {
        return Ok(ModifyOutcome::NotFound);
    };

    let Some(updates) = decide(&matches)? else {
        return Ok(ModifyOutcome::Cancelled);
    };

    let after = updates.apply(target);
    after.validate()?;

    repo.update(&after).await?;
    tracing::info!(id = after.id, matches = matches.len(), "Movie modified");

    Ok(ModifyOutcome::Updated {
        before: target.clone(),
        after,
        matches: matches.len(),
    })
}

/// Remove every movie; returns the number of removed rows
pub async fn delete_all(db: &Database) -> Result<u64> {
    let removed = MovieRepository::new(db).delete_all().await?;
    tracing::info!(removed, "All movies deleted");
    Ok(removed)
}

/// Delete the first movie whose title contains `query` once `confirm` agrees
///
/// `confirm` receives every match; the first element is the one deleted.
pub async fn delete_matching<F>(db: &Database, query: &str, confirm: F) -> Result<DeleteOutcome>
where
    F: FnOnce(&[Movie]) -> bool,
{
    let repo = MovieRepository::new(db);
    let matches = repo.find_by_title(query).await?;
    let Some(target) = matches.first() else {
        return Ok(DeleteOutcome::NotFound);
    };

    if !confirm(&matches) {
        return Ok(DeleteOutcome::Declined);
    }

    if !repo.delete(target.id).await? {
        return Ok(DeleteOutcome::NotFound);
    }
    tracing::info!(id = target.id, title = %target.title, "Movie deleted");
    Ok(DeleteOutcome::Deleted(target.clone()))
}
