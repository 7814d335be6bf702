//! # Setup
//!
//! Builds everything the chat needs from the CSV export:
//! 1. Create the raw table (sor script)
//! 2. Ingest the CSV into it
//! 3. Create the normalized tables (sot script)
//! 4. Normalize raw -> clean movies + genre relations
//! 5. Build the per-genre aggregate (aggregate script)
//! 6. Train the recommendation model and save it
//!
//! Each step runs to completion before the next one starts. A failure stops
//! the run; tables already replaced stay replaced.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use data_loader::{MovieStore, NormalizeReport, Normalizer, read_raw_movies};
use recommender::{MODEL_NAME, VECTORIZER_NAME, artifacts_exist, train_and_save};

use crate::chat::CineBot;
use crate::config::{AppConfig, GENRE_RATINGS_SCRIPT, SOR_SCRIPT, SOT_SCRIPT};
use crate::queries::{MovieQueries, QueryContext};

/// What a setup run produced
#[derive(Debug, Clone, PartialEq)]
pub struct SetupReport {
    pub raw_movies: usize,
    pub normalize: NormalizeReport,
    pub genres_rated: usize,
    /// Documents in the trained model; `None` when nothing was trained
    pub model_size: Option<usize>,
}

/// True when the database or the saved model is missing.
pub fn needs_setup(config: &AppConfig) -> bool {
    !config.db_path.exists() || !artifacts_exist(&config.model_dir)
}

/// Run the whole pipeline, replacing whatever was there before.
pub fn run_setup(config: &AppConfig) -> Result<SetupReport> {
    let start_time = Instant::now();
    info!("Starting setup from {}", config.csv_path.display());

    let store = MovieStore::new(&config.db_path);

    // Raw layer
    run_script(&store, config, SOR_SCRIPT)?;
    let raw = read_raw_movies(&config.csv_path)
        .with_context(|| format!("Failed to read {}", config.csv_path.display()))?;
    let raw_movies = store
        .replace_raw_movies(&raw)
        .context("Failed to store raw movies")?;
    info!("Ingested {} raw movies", raw_movies);

    // Normalized layer
    run_script(&store, config, SOT_SCRIPT)?;
    let normalize = Normalizer::new(config.min_vote_count)
        .run(&store)
        .context("Failed to normalize movies")?;

    // Aggregate
    run_script(&store, config, GENRE_RATINGS_SCRIPT)?;
    let genres_rated = store.genre_ratings()?.len();
    info!("Aggregated ratings for {} genres", genres_rated);

    // Model
    let model_size = train_and_save(&store, &config.model_dir)
        .context("Failed to train the recommendation model")?
        .map(|trained| trained.model.len());

    info!("Setup finished in {:.2?}", start_time.elapsed());
    Ok(SetupReport {
        raw_movies,
        normalize,
        genres_rated,
        model_size,
    })
}

/// Rebuild the genre aggregate and retrain the model from the normalized
/// tables already in the database. Returns the number of documents, or
/// `None` when there was nothing to train.
pub fn retrain(config: &AppConfig) -> Result<Option<usize>> {
    let store = MovieStore::new(&config.db_path);
    let genres_rated = store
        .refresh_genre_ratings()
        .context("Failed to rebuild the genre ratings")?;
    info!("Aggregated ratings for {} genres", genres_rated);

    let trained = train_and_save(&store, &config.model_dir)
        .context("Failed to train the recommendation model")?;
    Ok(trained.map(|trained| trained.model.len()))
}

/// Delete the database file and the model artifacts.
pub fn reset(config: &AppConfig) -> Result<()> {
    MovieStore::new(&config.db_path)
        .drop_database()
        .context("Failed to remove the database")?;

    for name in [MODEL_NAME, VECTORIZER_NAME] {
        let path = config.model_dir.join(name);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            info!("Removed {}", path.display());
        }
    }
    Ok(())
}

/// Set up when needed, load the model once, and hand back a ready bot.
pub fn open(config: &AppConfig) -> Result<CineBot> {
    if needs_setup(config) {
        info!("Database or model missing, running setup");
        run_setup(config)?;
    }

    let context = QueryContext::load(&config.model_dir)
        .context("Failed to load the recommendation model")?;
    if context.model().is_none() {
        warn!("No recommendation model available, recommendations are disabled");
    }

    let store = MovieStore::new(&config.db_path);
    Ok(CineBot::new(MovieQueries::new(store, context)))
}

fn run_script(store: &MovieStore, config: &AppConfig, name: &str) -> Result<()> {
    let path = config.script(name);
    store
        .execute_script_file(&path)
        .with_context(|| format!("Failed to run {}", path.display()))?;
    info!("Ran {}", name);
    Ok(())
}

/// Reload the model held by `bot` from `model_dir`.
pub fn reload_model(bot: &mut CineBot, model_dir: &Path) -> Result<bool> {
    bot.queries_mut()
        .context_mut()
        .reload(model_dir)
        .context("Failed to reload the recommendation model")
}
