//! Catalog commands
//!
//! - `movie`: movie records, input parsing and the SQLite repository
//! - `catalog`: the operations offered to front ends (search, add, modify, delete)

pub mod catalog;
pub mod movie;

pub use catalog::{DeleteOutcome, ModifyOutcome, Selector};
pub use movie::{FieldUpdates, Movie, MovieRepository, NewMovie};
