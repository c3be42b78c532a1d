//! Error types for moviedb

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using moviedb's Error
pub type Result<T> = std::result::Result<T, Error>;

/// moviedb error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Catalog errors (E001-E099)
    #[error("Movie #{0} no longer exists. Search again to see the current catalog.")]
    MovieNotFound(i64),

    // Validation errors (E100-E199)
    #[error("Invalid input: {0}")]
    Validation(String),

    // File errors (E200-E299)
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed JSON in {}: {source}", .path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // Storage errors (E400-E499)
    #[error("Storage unavailable at {}: {reason}", .path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Map a failed write, surfacing table constraint violations distinctly
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            use sqlx::error::ErrorKind;
            match db_err.kind() {
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    tracing::warn!(error = %db_err, "Write rejected by table constraint");
                    return Self::ConstraintViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Self::DatabaseError(err)
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::MovieNotFound(_) => "E001",
            Self::Validation(_) => "E100",
            Self::FileNotFound(_) => "E200",
            Self::MalformedJson { .. } => "E201",
            Self::Io(_) => "E202",
            Self::StorageUnavailable { .. } => "E400",
            Self::ConstraintViolation(_) => "E401",
            Self::DatabaseError(_) => "E402",
            Self::ConfigError(_) => "E600",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Validation(_) => Some("Ratings must be between 1.0 and 10.0".to_string()),
            Self::FileNotFound(_) => Some("moviedb config get files.import_path".to_string()),
            Self::ConstraintViolation(_) => {
                Some("Check that every movie has a title, director, genre and a rating between 1.0 and 10.0".to_string())
            }
            Self::StorageUnavailable { .. } => Some("moviedb config get database.path".to_string()),
            Self::ConfigError(_) => Some("moviedb config list".to_string()),
            _ => None,
        }
    }
}
