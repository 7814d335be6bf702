//! Parsing of the ingestion CSV and of the embedded genre lists.
//!
//! The CSV is the TMDB movie export: a header row followed by one movie per
//! line. Only five columns are consumed:
//! - id, title, vote_average, vote_count: plain scalars
//! - genres: a JSON list such as `[{"id": 28, "name": "Action"}]`
//!
//! `parse_genres` is pure and knows nothing about storage, so the normalizer
//! decides what to do with a bad row.

use crate::error::{DataLoadError, GenreParseError, Result};
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Columns read from the ingestion CSV; any other column is ignored.
#[derive(Debug, Deserialize)]
struct CsvMovieRecord {
    id: MovieId,
    title: String,
    #[serde(default)]
    genres: Option<String>,
    vote_average: f64,
    vote_count: i64,
}

impl From<CsvMovieRecord> for RawMovie {
    fn from(record: CsvMovieRecord) -> Self {
        // An empty cell means "no genre data", same as a missing one
        let genres = record.genres.filter(|g| !g.trim().is_empty());
        RawMovie {
            id: record.id,
            title: record.title,
            genres,
            vote_average: record.vote_average,
            vote_count: record.vote_count,
        }
    }
}

/// Read every movie row from the ingestion CSV.
///
/// A row that fails to decode aborts the whole read: the raw table is
/// replaced wholesale, so a partial ingestion is never useful.
pub fn read_raw_movies(path: &Path) -> Result<Vec<RawMovie>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut movies = Vec::new();
    for record in reader.deserialize::<CsvMovieRecord>() {
        movies.push(RawMovie::from(record?));
    }

    debug!("Read {} raw movies from {}", movies.len(), path.display());
    Ok(movies)
}

/// Parse a serialized genre list into the set of genre names it contains.
///
/// Example: `[{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]`
///          -> {"Action", "Adventure"}
///
/// Null elements, records without a `name` and empty names contribute
/// nothing. Anything else that is not a record with a string name is an
/// error for the whole field.
pub fn parse_genres(raw: &str) -> std::result::Result<BTreeSet<String>, GenreParseError> {
    let value: Value = serde_json::from_str(raw)?;
    let records = match value {
        Value::Array(records) => records,
        other => {
            return Err(GenreParseError::NotAList {
                found: json_kind(&other),
            });
        }
    };

    let mut names = BTreeSet::new();
    for (position, record) in records.iter().enumerate() {
        match record {
            Value::Null => continue,
            Value::Object(fields) => match fields.get("name") {
                None | Some(Value::Null) => continue,
                Some(Value::String(name)) => {
                    if !name.is_empty() {
                        names.insert(name.clone());
                    }
                }
                Some(other) => {
                    return Err(GenreParseError::WrongType {
                        position,
                        found: json_kind(other),
                    });
                }
            },
            other => {
                return Err(GenreParseError::WrongType {
                    position,
                    found: json_kind(other),
                });
            }
        }
    }
    Ok(names)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}
