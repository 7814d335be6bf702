//! Fixed paths and thresholds for a CineBot installation.

use data_loader::MIN_VOTE_COUNT;
use std::path::{Path, PathBuf};

/// Schema script creating the raw table
pub const SOR_SCRIPT: &str = "sor_movies.sql";
/// Schema script creating the normalized tables
pub const SOT_SCRIPT: &str = "sot_tables.sql";
/// Script building the per-genre aggregate view
pub const GENRE_RATINGS_SCRIPT: &str = "spec_genre_ratings.sql";

/// Where everything lives on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// TMDB movie export to ingest
    pub csv_path: PathBuf,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Directory holding the model artifacts
    pub model_dir: PathBuf,
    /// Directory holding the schema scripts
    pub sql_dir: PathBuf,
    /// Minimum vote count for a movie to be kept
    pub min_vote_count: i64,
}

impl AppConfig {
    pub fn script(&self, name: &str) -> PathBuf {
        self.sql_dir.join(name)
    }

    /// Resolve every relative path against `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        for path in [
            &mut self.csv_path,
            &mut self.db_path,
            &mut self.model_dir,
            &mut self.sql_dir,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/tmdb_5000_movies.csv"),
            db_path: PathBuf::from("movies_database.db"),
            model_dir: PathBuf::from("model"),
            sql_dir: PathBuf::from("sql"),
            min_vote_count: MIN_VOTE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.min_vote_count, 500);
        assert_eq!(config.script(SOT_SCRIPT), PathBuf::from("sql/sot_tables.sql"));
    }

    #[test]
    fn test_rooted_at_keeps_absolute_paths() {
        let config = AppConfig {
            db_path: PathBuf::from("/var/lib/cinebot/movies.db"),
            ..AppConfig::default()
        }
        .rooted_at(Path::new("/srv"));

        assert_eq!(config.db_path, PathBuf::from("/var/lib/cinebot/movies.db"));
        assert_eq!(config.model_dir, PathBuf::from("/srv/model"));
    }
}
