//! Raw store to normalized store.
//!
//! `normalize` is the pure transformation; `Normalizer::run` reads the raw
//! table, applies it and overwrites the two SOT tables. The two writes are
//! independent: a failure between them leaves the tables out of step.

use crate::error::Result;
use crate::parser::parse_genres;
use crate::store::MovieStore;
use crate::types::*;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Movies with fewer votes than this are considered insignificant
pub const MIN_VOTE_COUNT: i64 = 500;

/// Output of a normalization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTables {
    pub clean_movies: Vec<CleanMovie>,
    pub movie_genres: Vec<MovieGenre>,
    /// Movies whose genre field was present but unparsable
    pub skipped_movie_ids: Vec<MovieId>,
}

/// Filter raw rows by vote count and split them into clean movies and
/// deduplicated (movie, genre) pairs.
///
/// ## Algorithm
/// 1. Keep rows with `vote_count >= min_vote_count`
/// 2. Project each kept row to a CleanMovie (first occurrence of an id wins)
/// 3. Rows without a genre field contribute no genre pairs
/// 4. Parse the genre field; on failure log the id and move on
/// 5. Drop (movie, genre) pairs already seen
pub fn normalize(raw: &[RawMovie], min_vote_count: i64) -> NormalizedTables {
    let mut tables = NormalizedTables::default();
    let mut seen_movies: HashSet<MovieId> = HashSet::new();
    let mut seen_pairs: HashSet<(MovieId, String)> = HashSet::new();

    for movie in raw.iter().filter(|m| m.vote_count >= min_vote_count) {
        if seen_movies.insert(movie.id) {
            tables.clean_movies.push(CleanMovie {
                movie_id: movie.id,
                title: movie.title.clone(),
                vote_average: movie.vote_average,
            });
        } else {
            warn!("Duplicate raw row for movie ID {}, keeping the first", movie.id);
        }

        let Some(raw_genres) = movie.genres.as_deref() else {
            continue;
        };

        let genre_names = match parse_genres(raw_genres) {
            Ok(names) => names,
            Err(e) => {
                warn!("Skipping invalid genre data for movie ID {}: {}", movie.id, e);
                tables.skipped_movie_ids.push(movie.id);
                continue;
            }
        };

        for genre_name in genre_names {
            if seen_pairs.insert((movie.id, genre_name.clone())) {
                tables.movie_genres.push(MovieGenre {
                    movie_id: movie.id,
                    genre_name,
                });
            }
        }
    }

    tables
}

/// Runs the normalization step against a store.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    min_vote_count: i64,
}

impl Normalizer {
    pub fn new(min_vote_count: i64) -> Self {
        Self { min_vote_count }
    }

    /// Read `sor_movies`, normalize, and replace both SOT tables.
    #[instrument(skip(self, store), fields(min_vote_count = self.min_vote_count))]
    pub fn run(&self, store: &MovieStore) -> Result<NormalizeReport> {
        let start = Instant::now();
        let raw = store.raw_movies()?;
        let tables = normalize(&raw, self.min_vote_count);

        let clean_movies = store.replace_clean_movies(&tables.clean_movies)?;
        info!("Table 'sot_movies_clean' populated with {} movies", clean_movies);

        let genre_relations = store.replace_movie_genres(&tables.movie_genres)?;
        info!(
            "Table 'sot_movie_genres' populated with {} movie-genre relations",
            genre_relations
        );

        info!(
            "Normalized {} raw rows in {:.2?} ({} skipped)",
            raw.len(),
            start.elapsed(),
            tables.skipped_movie_ids.len()
        );

        Ok(NormalizeReport {
            raw_rows: raw.len(),
            clean_movies,
            genre_relations,
            skipped_movie_ids: tables.skipped_movie_ids,
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(MIN_VOTE_COUNT)
    }
}
