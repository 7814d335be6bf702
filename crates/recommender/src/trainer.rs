//! Training: genre documents -> TF-IDF features -> similarity model.

use crate::error::Result;
use crate::features::TfidfVectorizer;
use crate::model::{RecommendationModel, TrainedModel};
use crate::similarity::linear_kernel;
use data_loader::{GenreDocument, MovieStore};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Build a model from documents.
///
/// Returns `Ok(None)` when there is nothing to train on; the caller has to
/// check for that, no error is raised.
#[instrument(skip(documents), fields(count = documents.len()))]
pub fn train(documents: Vec<GenreDocument>) -> Result<Option<TrainedModel>> {
    if documents.is_empty() {
        warn!("Could not train the recommendation model: no documents");
        return Ok(None);
    }

    let start = Instant::now();
    let corpus: Vec<&str> = documents.iter().map(|d| d.genres.as_str()).collect();

    let mut vectorizer = TfidfVectorizer::new();
    let features = vectorizer.fit_transform(&corpus)?;
    info!(
        "Fitted TF-IDF over {} documents ({} terms)",
        features.len(),
        vectorizer.vocabulary_size()
    );

    let similarity = linear_kernel(&features);
    let model = RecommendationModel::new(documents, similarity)?;
    info!(
        "Computed {}x{} similarity matrix in {:.2?}",
        model.len(),
        model.len(),
        start.elapsed()
    );

    Ok(Some(TrainedModel {
        model,
        vectorizer,
    }))
}

/// Read documents from the store, train, and persist the artifacts.
pub fn train_and_save(store: &MovieStore, model_dir: &Path) -> Result<Option<TrainedModel>> {
    info!("Starting recommendation model training");
    let documents = store.genre_documents()?;

    let Some(trained) = train(documents)? else {
        return Ok(None);
    };
    trained.save(model_dir)?;
    Ok(Some(trained))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_empty_is_none() {
        assert!(train(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_train_is_deterministic() {
        let documents = vec![
            GenreDocument {
                movie_id: 1,
                title: "A".to_string(),
                genres: "Action Adventure".to_string(),
            },
            GenreDocument {
                movie_id: 2,
                title: "B".to_string(),
                genres: "Adventure Family".to_string(),
            },
        ];

        let first = train(documents.clone()).unwrap().unwrap();
        let second = train(documents).unwrap().unwrap();
        assert_eq!(first.model, second.model);
        assert_eq!(first.vectorizer, second.vectorizer);
        assert_eq!(first.vectorizer.vocabulary_size(), 3);
    }
}
