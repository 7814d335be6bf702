//! Read-only query layer.
//!
//! Three questions can be asked: best genre, top movies of a genre, and
//! movies similar to a title. "Nothing found" is an empty result here,
//! never an error; only storage failures are errors.

use data_loader::{CleanMovie, GenreRating, MovieStore};
use recommender::RecommendationModel;
use std::path::Path;
use tracing::info;

/// Maximum movies returned by a top-by-genre query
pub const TOP_MOVIES_LIMIT: usize = 5;

/// Maximum movies returned by a similar-movies query
pub const SIMILAR_MOVIES_LIMIT: usize = 5;

/// The loaded model, built once at startup and only replaced through an
/// explicit `reload`.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    model: Option<RecommendationModel>,
}

impl QueryContext {
    pub fn new(model: Option<RecommendationModel>) -> Self {
        Self { model }
    }

    /// Load whatever model is saved in `model_dir` (possibly none).
    pub fn load(model_dir: &Path) -> recommender::Result<Self> {
        Ok(Self::new(RecommendationModel::load(model_dir)?))
    }

    /// Replace the held model with the one on disk. Returns whether a
    /// model is loaded afterwards.
    pub fn reload(&mut self, model_dir: &Path) -> recommender::Result<bool> {
        self.model = RecommendationModel::load(model_dir)?;
        info!(
            "Recommendation model reloaded ({})",
            if self.model.is_some() { "available" } else { "missing" }
        );
        Ok(self.model.is_some())
    }

    pub fn model(&self) -> Option<&RecommendationModel> {
        self.model.as_ref()
    }
}

/// Answers queries from the store and the loaded model.
#[derive(Debug, Clone)]
pub struct MovieQueries {
    store: MovieStore,
    context: QueryContext,
}

impl MovieQueries {
    pub fn new(store: MovieStore, context: QueryContext) -> Self {
        Self { store, context }
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut QueryContext {
        &mut self.context
    }

    /// Genre with the highest average rating
    pub fn best_genre(&self) -> data_loader::Result<Option<GenreRating>> {
        self.store.best_genre()
    }

    /// Best rated movies of an English genre name, at most five.
    pub fn top_movies_by_genre(&self, genre_name: &str) -> data_loader::Result<Vec<CleanMovie>> {
        self.store.top_movies_by_genre(genre_name, TOP_MOVIES_LIMIT)
    }

    /// Titles similar to an exact title. `None` when no model is loaded
    /// or the title is not part of it.
    pub fn similar_movies(&self, title: &str) -> Option<Vec<String>> {
        let model = self.context.model()?;
        let titles = model.similar_titles(title, SIMILAR_MOVIES_LIMIT)?;
        Some(titles.into_iter().map(str::to_string).collect())
    }

    /// First model title containing `fragment`, ignoring case.
    pub fn find_title(&self, fragment: &str) -> Option<String> {
        self.context
            .model()?
            .find_title(fragment)
            .map(str::to_string)
    }
}
