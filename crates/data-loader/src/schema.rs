//! Table names and DDL for the movie database.
//!
//! The external scripts under `sql/` create the same tables on first setup.
//! The statements here are what the store uses when it replaces a table
//! wholesale, so the two must stay in sync.

/// A table the store knows how to recreate.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    pub create: &'static str,
}

/// Raw ingested records, one per CSV row
pub const SOR_MOVIES: Table = Table {
    name: "sor_movies",
    create: "CREATE TABLE sor_movies (
        id INTEGER NOT NULL,
        title TEXT NOT NULL,
        genres TEXT,
        vote_average REAL NOT NULL,
        vote_count INTEGER NOT NULL
    )",
};

/// Movies above the vote-count threshold
pub const SOT_MOVIES_CLEAN: Table = Table {
    name: "sot_movies_clean",
    create: "CREATE TABLE sot_movies_clean (
        movie_id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        vote_average REAL NOT NULL
    )",
};

/// Movie to genre relation
pub const SOT_MOVIE_GENRES: Table = Table {
    name: "sot_movie_genres",
    create: "CREATE TABLE sot_movie_genres (
        movie_id INTEGER NOT NULL,
        genre_name TEXT NOT NULL,
        UNIQUE (movie_id, genre_name)
    )",
};

/// Per-genre average rating, derived from the two SOT tables
pub const SPEC_GENRE_RATINGS: Table = Table {
    name: "spec_genre_ratings",
    create: "CREATE TABLE spec_genre_ratings AS
        SELECT g.genre_name AS genre_name, AVG(m.vote_average) AS average_rating
        FROM sot_movie_genres g
        JOIN sot_movies_clean m ON m.movie_id = g.movie_id
        GROUP BY g.genre_name",
};

impl Table {
    /// Statement that drops the table if present
    pub fn drop_statement(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }
}
