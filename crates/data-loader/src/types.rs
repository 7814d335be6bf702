//! Core domain types for the movie store.
//!
//! The raw table mirrors the ingestion CSV; the clean tables are derived
//! from it by the normalizer and the aggregate view is derived from those.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (TMDB id)
pub type MovieId = i64;

// =============================================================================
// Raw Store
// =============================================================================

/// One row of the raw `sor_movies` table, exactly as ingested.
///
/// `genres` holds the serialized list of `{id, name}` records from the
/// source file; `None` means the cell was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    pub id: MovieId,
    pub title: String,
    pub genres: Option<String>,
    pub vote_average: f64,
    pub vote_count: i64,
}

// =============================================================================
// Normalized Store
// =============================================================================

/// A movie that passed the vote-count filter (`sot_movies_clean`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub vote_average: f64,
}

/// One (movie, genre) pair of `sot_movie_genres`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieGenre {
    pub movie_id: MovieId,
    pub genre_name: String,
}

/// Average rating of a genre (`spec_genre_ratings`).
///
/// Fully derived from the clean tables, never authoritative on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreRating {
    pub genre_name: String,
    pub average_rating: f64,
}

/// A training document: one clean movie with its genre names joined by spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreDocument {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
}

/// Summary of a normalization run, used for logging and by callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// Raw rows read from `sor_movies`
    pub raw_rows: usize,
    /// Rows written to `sot_movies_clean`
    pub clean_movies: usize,
    /// Rows written to `sot_movie_genres`
    pub genre_relations: usize,
    /// Movies whose genre field could not be parsed
    pub skipped_movie_ids: Vec<MovieId>,
}
