//! Text table for movie listings
//!
//! Columns have fixed widths counted in `char`s. Title and director are padded
//! with U+3000 IDEOGRAPHIC SPACE so that rows of CJK titles line up; values
//! longer than their column simply overflow it.

use crate::commands::movie::Movie;

/// U+3000, the full-width space used to pad text columns
pub const FULL_WIDTH_SPACE: char = '\u{3000}';

const TITLE_WIDTH: usize = 10;
const DIRECTOR_WIDTH: usize = 15;
const GENRE_WIDTH: usize = 10;
const YEAR_WIDTH: usize = 10;
const RATING_WIDTH: usize = 5;

// Header cells are narrower than the genre and year cells below them
const GENRE_HEADER_WIDTH: usize = 7;
const YEAR_HEADER_WIDTH: usize = 6;

const HEADERS: [(&str, usize); 5] = [
    ("Title", TITLE_WIDTH),
    ("Director", DIRECTOR_WIDTH),
    ("Genre", GENRE_HEADER_WIDTH),
    ("Year", YEAR_HEADER_WIDTH),
    ("Rating", RATING_WIDTH),
];

const SEPARATOR_WIDTH: usize = 72;

/// Render `movies` as a header, a separator line and one line per movie
pub fn format_table(movies: &[Movie]) -> String {
    let mut out = String::new();

    for (label, width) in HEADERS {
        out.push_str(&pad(label, width, FULL_WIDTH_SPACE));
    }
    out.push('\n');
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');

    for movie in movies {
        out.push_str(&format_row(movie));
        out.push('\n');
    }
    out
}

fn format_row(movie: &Movie) -> String {
    format!(
        "{}{}{}{}{}",
        pad(&movie.title, TITLE_WIDTH, FULL_WIDTH_SPACE),
        pad(&movie.director, DIRECTOR_WIDTH, FULL_WIDTH_SPACE),
        pad(&movie.genre, GENRE_WIDTH, ' '),
        pad(&movie.year.to_string(), YEAR_WIDTH, ' '),
        pad(&format_rating(movie.rating), RATING_WIDTH, ' '),
    )
}

/// Left-align `value` in `width` chars using `fill`
fn pad(value: &str, width: usize, fill: char) -> String {
    let mut padded = value.to_string();
    let len = value.chars().count();
    padded.extend(std::iter::repeat_n(fill, width.saturating_sub(len)));
    padded
}

/// Ratings always show a decimal part (`8` prints as `8.0`)
pub fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        rating.to_string()
    }
}
