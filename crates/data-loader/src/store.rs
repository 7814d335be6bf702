//! SQLite-backed movie store.
//!
//! Every operation opens its own connection and closes it on return; there
//! is no pooling and no transaction shared between operations. Replacing a
//! table is always drop + create + insert inside one transaction for that
//! table only.

use crate::error::{DataLoadError, Result};
use crate::schema::{SOR_MOVIES, SOT_MOVIE_GENRES, SOT_MOVIES_CLEAN, SPEC_GENRE_RATINGS, Table};
use crate::types::*;
use rusqlite::{Connection, OptionalExtension, Statement, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Handle to the movie database file.
#[derive(Debug, Clone)]
pub struct MovieStore {
    db_path: PathBuf,
}

impl MovieStore {
    /// Create a handle; the file is created lazily on first write.
    pub fn new<T: AsRef<Path>>(db_path: T) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Whether the database file is present on disk
    pub fn exists(&self) -> bool {
        self.db_path.exists()
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    // =========================================================================
    // Scripts
    // =========================================================================

    /// Execute a schema script verbatim.
    pub fn execute_script(&self, sql: &str) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Read a schema script from disk and execute it verbatim.
    pub fn execute_script_file(&self, script_path: &Path) -> Result<()> {
        if !script_path.exists() {
            return Err(DataLoadError::ScriptNotFound {
                path: script_path.display().to_string(),
            });
        }
        let sql = std::fs::read_to_string(script_path)?;
        self.execute_script(&sql)?;
        info!("SQL script '{}' executed", script_path.display());
        Ok(())
    }

    // =========================================================================
    // Wholesale replacement
    // =========================================================================

    /// Drop and recreate `table`, then insert every row with `bind`.
    fn replace_table<T>(
        &self,
        table: &Table,
        insert_sql: &str,
        rows: &[T],
        bind: impl Fn(&mut Statement<'_>, &T) -> rusqlite::Result<usize>,
    ) -> Result<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute_batch(&format!("{}; {};", table.drop_statement(), table.create))?;
        {
            let mut stmt = tx.prepare(insert_sql)?;
            for row in rows {
                bind(&mut stmt, row)?;
            }
        }
        tx.commit()?;
        debug!("Replaced table '{}' with {} rows", table.name, rows.len());
        Ok(rows.len())
    }

    /// Replace the raw table with freshly ingested rows.
    pub fn replace_raw_movies(&self, movies: &[RawMovie]) -> Result<usize> {
        self.replace_table(
            &SOR_MOVIES,
            "INSERT INTO sor_movies (id, title, genres, vote_average, vote_count)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            movies,
            |stmt, m| {
                stmt.execute(params![m.id, m.title, m.genres, m.vote_average, m.vote_count])
            },
        )
    }

    /// Replace `sot_movies_clean`.
    pub fn replace_clean_movies(&self, movies: &[CleanMovie]) -> Result<usize> {
        self.replace_table(
            &SOT_MOVIES_CLEAN,
            "INSERT INTO sot_movies_clean (movie_id, title, vote_average) VALUES (?1, ?2, ?3)",
            movies,
            |stmt, m| stmt.execute(params![m.movie_id, m.title, m.vote_average]),
        )
    }

    /// Replace `sot_movie_genres`.
    pub fn replace_movie_genres(&self, relations: &[MovieGenre]) -> Result<usize> {
        self.replace_table(
            &SOT_MOVIE_GENRES,
            "INSERT INTO sot_movie_genres (movie_id, genre_name) VALUES (?1, ?2)",
            relations,
            |stmt, r| stmt.execute(params![r.movie_id, r.genre_name]),
        )
    }

    /// Recompute the per-genre average view from the current SOT tables.
    pub fn refresh_genre_ratings(&self) -> Result<usize> {
        self.execute_script(&format!(
            "{}; {};",
            SPEC_GENRE_RATINGS.drop_statement(),
            SPEC_GENRE_RATINGS.create
        ))?;
        self.count(&SPEC_GENRE_RATINGS)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All raw rows in storage order
    pub fn raw_movies(&self) -> Result<Vec<RawMovie>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, genres, vote_average, vote_count FROM sor_movies ORDER BY rowid",
        )?;
        let movies = stmt
            .query_map([], |row| {
                Ok(RawMovie {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    genres: row.get(2)?,
                    vote_average: row.get(3)?,
                    vote_count: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movies)
    }

    pub fn clean_movies(&self) -> Result<Vec<CleanMovie>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT movie_id, title, vote_average FROM sot_movies_clean ORDER BY rowid",
        )?;
        let movies = stmt
            .query_map([], |row| {
                Ok(CleanMovie {
                    movie_id: row.get(0)?,
                    title: row.get(1)?,
                    vote_average: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movies)
    }

    pub fn movie_genres(&self) -> Result<Vec<MovieGenre>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT movie_id, genre_name FROM sot_movie_genres ORDER BY rowid")?;
        let relations = stmt
            .query_map([], |row| {
                Ok(MovieGenre {
                    movie_id: row.get(0)?,
                    genre_name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(relations)
    }

    pub fn genre_ratings(&self) -> Result<Vec<GenreRating>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT genre_name, average_rating FROM spec_genre_ratings ORDER BY genre_name",
        )?;
        let ratings = stmt
            .query_map([], |row| {
                Ok(GenreRating {
                    genre_name: row.get(0)?,
                    average_rating: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ratings)
    }

    /// The genre with the highest average rating, if the view has any rows
    pub fn best_genre(&self) -> Result<Option<GenreRating>> {
        let conn = self.connect()?;
        let best = conn
            .query_row(
                "SELECT genre_name, average_rating FROM spec_genre_ratings
                 ORDER BY average_rating DESC LIMIT 1",
                [],
                |row| {
                    Ok(GenreRating {
                        genre_name: row.get(0)?,
                        average_rating: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(best)
    }

    /// Up to `limit` clean movies tagged with `genre_name`, best rated first.
    ///
    /// Ties keep whatever order SQLite produces.
    pub fn top_movies_by_genre(&self, genre_name: &str, limit: usize) -> Result<Vec<CleanMovie>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT m.movie_id, m.title, m.vote_average
             FROM sot_movies_clean m
             JOIN sot_movie_genres g ON m.movie_id = g.movie_id
             WHERE g.genre_name = ?1
             ORDER BY m.vote_average DESC
             LIMIT ?2",
        )?;
        let movies = stmt
            .query_map(params![genre_name, limit as i64], |row| {
                Ok(CleanMovie {
                    movie_id: row.get(0)?,
                    title: row.get(1)?,
                    vote_average: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movies)
    }

    /// One document per clean movie that has at least one genre, ordered by id.
    pub fn genre_documents(&self) -> Result<Vec<GenreDocument>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT m.movie_id, m.title, GROUP_CONCAT(g.genre_name, ' ' ORDER BY g.rowid)
             FROM sot_movies_clean m
             JOIN sot_movie_genres g ON m.movie_id = g.movie_id
             GROUP BY m.movie_id, m.title
             ORDER BY m.movie_id",
        )?;
        let documents = stmt
            .query_map([], |row| {
                Ok(GenreDocument {
                    movie_id: row.get(0)?,
                    title: row.get(1)?,
                    genres: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(documents)
    }

    /// Number of rows in `table`
    pub fn count(&self, table: &Table) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table.name), [], |row| {
                row.get(0)
            })?;
        Ok(count as usize)
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Delete the database file. Returns whether there was one.
    pub fn drop_database(&self) -> Result<bool> {
        if !self.db_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.db_path)?;
        info!("Database '{}' removed", self.db_path.display());
        Ok(true)
    }
}
