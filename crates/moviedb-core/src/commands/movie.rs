//! Movie records and their repository
//!
//! Rows are decoded once into [`Movie`] at the storage boundary; everything above
//! the repository works with typed records.

use crate::error::Error;
use crate::storage::Database;
use crate::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lowest accepted rating
pub const MIN_RATING: f64 = 1.0;
/// Highest accepted rating
pub const MAX_RATING: f64 = 10.0;

const SELECT_MOVIES: &str = "SELECT id, title, director, genre, year, rating FROM movies";

pub(crate) const INSERT_MOVIE: &str = r#"
    INSERT INTO movies (title, director, genre, year, rating)
    VALUES (?, ?, ?, ?, ?)
"#;

/// A stored movie record
///
/// Field order is the serialized key order of exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub genre: String,
    pub year: i64,
    pub rating: f64,
}

impl Movie {
    /// Check the fields against the catalog's constraints
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.title, &self.director, &self.genre, self.rating)
    }
}

/// A movie that has not been stored yet
///
/// This is also the element type of import files; unknown keys such as `id`
/// are ignored so that exports can be imported again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub genre: String,
    pub year: i64,
    pub rating: f64,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        genre: impl Into<String>,
        year: i64,
        rating: f64,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            genre: genre.into(),
            year,
            rating,
        }
    }

    /// Build a movie from raw text input
    ///
    /// Fails with [`Error::Validation`] when the year or rating is not numeric.
    pub fn parse(
        title: &str,
        director: &str,
        genre: &str,
        year: &str,
        rating: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            title.trim(),
            director.trim(),
            genre.trim(),
            parse_year(year)?,
            parse_rating(rating)?,
        ))
    }

    /// Check the fields against the catalog's constraints
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.title, &self.director, &self.genre, self.rating)
    }
}

/// Replacement values for a movie; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdates {
    pub title: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
}

impl FieldUpdates {
    /// Build updates from raw text input, where empty input keeps the field
    ///
    /// Fails with [`Error::Validation`] when a non-empty year or rating is not numeric.
    pub fn parse(
        title: &str,
        director: &str,
        genre: &str,
        year: &str,
        rating: &str,
    ) -> Result<Self> {
        Ok(Self {
            title: non_empty(title),
            director: non_empty(director),
            genre: non_empty(genre),
            year: non_empty(year).map(|y| parse_year(&y)).transpose()?,
            rating: non_empty(rating).map(|r| parse_rating(&r)).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the updates to `movie`, keeping its id and any unset field
    pub fn apply(&self, movie: &Movie) -> Movie {
        Movie {
            id: movie.id,
            title: self.title.clone().unwrap_or_else(|| movie.title.clone()),
            director: self.director.clone().unwrap_or_else(|| movie.director.clone()),
            genre: self.genre.clone().unwrap_or_else(|| movie.genre.clone()),
            year: self.year.unwrap_or(movie.year),
            rating: self.rating.unwrap_or(movie.rating),
        }
    }
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn validate_fields(title: &str, director: &str, genre: &str, rating: f64) -> Result<()> {
    require_text("title", title)?;
    require_text("director", director)?;
    require_text("genre", genre)?;
    validate_rating(rating)
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn parse_year(input: &str) -> Result<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("year '{}' is not a whole number", input.trim())))
}

fn parse_rating(input: &str) -> Result<f64> {
    input
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("rating '{}' is not a number", input.trim())))
}

/// Check that a rating lies within [`MIN_RATING`, `MAX_RATING`]
pub fn validate_rating(rating: f64) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(Error::Validation(format!(
            "rating {rating} is outside {MIN_RATING:.1} - {MAX_RATING:.1}"
        )));
    }
    Ok(())
}

/// Movie repository for database operations
pub struct MovieRepository<'a> {
    db: &'a Database,
}

impl<'a> MovieRepository<'a> {
    /// Create a new movie repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a movie and return the stored record
    pub async fn insert(&self, movie: &NewMovie) -> Result<Movie> {
        let result = sqlx::query(INSERT_MOVIE)
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(&movie.genre)
            .bind(movie.year)
            .bind(movie.rating)
            .execute(self.db.pool())
            .await
            .map_err(Error::from_write)?;

        Ok(Movie {
            id: result.last_insert_rowid(),
            title: movie.title.clone(),
            director: movie.director.clone(),
            genre: movie.genre.clone(),
            year: movie.year,
            rating: movie.rating,
        })
    }

    /// List every movie in insertion order
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(&format!("{SELECT_MOVIES} ORDER BY id"))
            .fetch_all(self.db.pool())
            .await?;
        Ok(movies)
    }

    /// List movies whose title contains `fragment` (SQL `LIKE '%fragment%'`)
    pub async fn find_by_title(&self, fragment: &str) -> Result<Vec<Movie>> {
        tracing::debug!(fragment, "Searching movies by title");
        let movies = sqlx::query_as::<_, Movie>(&format!(
            "{SELECT_MOVIES} WHERE title LIKE '%' || ? || '%' ORDER BY id"
        ))
        .bind(fragment)
        .fetch_all(self.db.pool())
        .await?;
        Ok(movies)
    }

    /// Overwrite every mutable field of the movie with `movie.id`
    pub async fn update(&self, movie: &Movie) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = ?, director = ?, genre = ?, year = ?, rating = ?
            WHERE id = ?
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.director)
        .bind(&movie.genre)
        .bind(movie.year)
        .bind(movie.rating)
        .bind(movie.id)
        .execute(self.db.pool())
        .await
        .map_err(Error::from_write)?;

        if result.rows_affected() == 0 {
            return Err(Error::MovieNotFound(movie.id));
        }
        Ok(())
    }

    /// Delete a single movie, returning whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every movie, returning the number of removed rows
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM movies")
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
