//! # Data Loader Crate
//!
//! Ingests the TMDB movie export into SQLite and normalizes it.
//!
//! ## Main Components
//!
//! - **types**: Row types for the raw, clean and aggregate tables
//! - **parser**: CSV ingestion and the pure genre-list parser
//! - **schema**: Table names and DDL
//! - **store**: SQLite access, one connection per operation
//! - **normalize**: Raw store to normalized store
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{MovieStore, Normalizer, parser};
//! use std::path::Path;
//!
//! let store = MovieStore::new("movies_database.db");
//! let raw = parser::read_raw_movies(Path::new("data/tmdb_5000_movies.csv"))?;
//! store.replace_raw_movies(&raw)?;
//!
//! let report = Normalizer::default().run(&store)?;
//! println!("{} clean movies", report.clean_movies);
//! ```

// Public modules
pub mod error;
pub mod normalize;
pub mod parser;
pub mod schema;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, GenreParseError, Result};
pub use normalize::{MIN_VOTE_COUNT, NormalizedTables, Normalizer, normalize};
pub use parser::{parse_genres, read_raw_movies};
pub use store::MovieStore;
pub use types::{
    // Type aliases
    MovieId,
    // Row types
    CleanMovie,
    GenreDocument,
    GenreRating,
    MovieGenre,
    NormalizeReport,
    RawMovie,
};
