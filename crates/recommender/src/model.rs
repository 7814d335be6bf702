//! The trained recommendation model and its on-disk artifacts.
//!
//! Two artifacts are written to the model directory:
//! - `movie_recommender.json`: similarity matrix + ordered documents
//! - `tfidf_vectorizer.json`: fitted vectorizer state (kept for reuse,
//!   not needed to answer queries)

use crate::error::{ModelError, Result};
use crate::features::TfidfVectorizer;
use crate::similarity::SimilarityMatrix;
use data_loader::GenreDocument;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// File name of the similarity + documents artifact
pub const MODEL_NAME: &str = "movie_recommender.json";

/// File name of the fitted vectorizer artifact
pub const VECTORIZER_NAME: &str = "tfidf_vectorizer.json";

/// Whether a model artifact is present in `model_dir`
pub fn artifacts_exist(model_dir: &Path) -> bool {
    model_dir.join(MODEL_NAME).exists()
}

/// Similarity over documents, with row `i` of the matrix describing
/// `documents[i]`. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationModel {
    documents: Vec<GenreDocument>,
    similarity: SimilarityMatrix,
}

impl RecommendationModel {
    /// Pair documents with their similarity matrix.
    pub fn new(documents: Vec<GenreDocument>, similarity: SimilarityMatrix) -> Result<Self> {
        let model = Self {
            documents,
            similarity,
        };
        model.check_consistency()?;
        Ok(model)
    }

    fn check_consistency(&self) -> Result<()> {
        if !self.similarity.is_consistent() || self.similarity.size() != self.documents.len() {
            return Err(ModelError::InconsistentArtifact(format!(
                "similarity matrix of size {} for {} documents",
                self.similarity.size(),
                self.documents.len()
            )));
        }
        Ok(())
    }

    pub fn documents(&self) -> &[GenreDocument] {
        &self.documents
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Row of the first document with exactly this title
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.title == title)
    }

    /// First title containing `fragment`, ignoring case.
    pub fn find_title(&self, fragment: &str) -> Option<&str> {
        let fragment = fragment.to_lowercase();
        self.documents
            .iter()
            .find(|d| d.title.to_lowercase().contains(&fragment))
            .map(|d| d.title.as_str())
    }

    /// Titles most similar to `title`, best first. `None` when the title is
    /// not in the model.
    ///
    /// Other movies sharing the same title are skipped too, so `title`
    /// never shows up in its own answer.
    pub fn similar_titles(&self, title: &str, limit: usize) -> Option<Vec<&str>> {
        let index = self.position_of(title)?;
        let titles = self
            .similarity
            .ranked_neighbors(index, self.len())
            .into_iter()
            .map(|(j, _)| self.documents[j].title.as_str())
            .filter(|candidate| *candidate != title)
            .take(limit)
            .collect();
        Some(titles)
    }

    /// Write the model artifact into `model_dir`, creating it if needed.
    pub fn save(&self, model_dir: &Path) -> Result<()> {
        write_json(&model_dir.join(MODEL_NAME), self)
    }

    /// Load the model artifact; `Ok(None)` when there is none yet.
    pub fn load(model_dir: &Path) -> Result<Option<Self>> {
        let path = model_dir.join(MODEL_NAME);
        if !path.exists() {
            return Ok(None);
        }
        let model: Self = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
        model.check_consistency()?;
        info!(
            "Loaded recommendation model with {} documents from {}",
            model.len(),
            path.display()
        );
        Ok(Some(model))
    }
}

/// Everything produced by one training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub model: RecommendationModel,
    pub vectorizer: TfidfVectorizer,
}

impl TrainedModel {
    /// Persist both artifacts into `model_dir`.
    pub fn save(&self, model_dir: &Path) -> Result<()> {
        self.model.save(model_dir)?;
        write_json(&model_dir.join(VECTORIZER_NAME), &self.vectorizer)?;
        info!("Model saved to '{}'", model_dir.display());
        Ok(())
    }
}

/// Load a previously saved vectorizer; `Ok(None)` when there is none.
pub fn load_vectorizer(model_dir: &Path) -> Result<Option<TfidfVectorizer>> {
    let path = model_dir.join(VECTORIZER_NAME);
    if !path.exists() {
        return Ok(None);
    }
    let vectorizer = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
    Ok(Some(vectorizer))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::linear_kernel;

    fn document(movie_id: i64, title: &str, genres: &str) -> GenreDocument {
        GenreDocument {
            movie_id,
            title: title.to_string(),
            genres: genres.to_string(),
        }
    }

    fn build_model(documents: Vec<GenreDocument>) -> RecommendationModel {
        let mut vectorizer = TfidfVectorizer::new();
        let corpus: Vec<&str> = documents.iter().map(|d| d.genres.as_str()).collect();
        let features = vectorizer.fit_transform(&corpus).unwrap();
        RecommendationModel::new(documents, linear_kernel(&features)).unwrap()
    }

    #[test]
    fn test_rejects_mismatched_matrix() {
        let result = RecommendationModel::new(
            vec![document(1, "A", "Action")],
            SimilarityMatrix::default(),
        );
        assert!(matches!(result, Err(ModelError::InconsistentArtifact(_))));
    }

    #[test]
    fn test_similar_titles() {
        let model = build_model(vec![
            document(1, "Heat", "Action Crime Drama Thriller"),
            document(2, "Ronin", "Action Crime Thriller"),
            document(3, "Up", "Animation Comedy Family Adventure"),
            document(4, "Collateral", "Drama Crime Thriller"),
        ]);

        let similar = model.similar_titles("Heat", 5).unwrap();
        assert_eq!(similar.len(), 3);
        assert!(!similar.contains(&"Heat"));
        assert_eq!(similar.last(), Some(&"Up"));

        assert!(model.similar_titles("Unknown", 5).is_none());
    }

    #[test]
    fn test_duplicate_titles_use_first_match() {
        let model = build_model(vec![
            document(1, "Twin", "Horror"),
            document(2, "Other", "Horror"),
            document(3, "Twin", "Comedy"),
        ]);

        assert_eq!(model.position_of("Twin"), Some(0));
        // Row 0 scores "Other" above the Comedy twin
        assert_eq!(model.similar_titles("Twin", 1).unwrap(), vec!["Other"]);
    }

    #[test]
    fn test_same_title_never_recommended() {
        let model = build_model(vec![
            document(268, "Batman", "Fantasy Action"),
            document(2661, "Batman", "Family Adventure Comedy Science Fiction Crime"),
            document(3, "Up", "Animation Comedy Family Adventure"),
            document(4, "Heat", "Action Crime Drama Thriller"),
            document(5, "Ronin", "Action Crime Thriller"),
            document(6, "Toy Story", "Animation Comedy Family"),
            document(7, "Avatar", "Action Adventure Fantasy Science Fiction"),
        ]);

        let similar = model.similar_titles("Batman", 5).unwrap();
        assert!(!similar.contains(&"Batman"), "got {:?}", similar);
        // The twin is dropped before the limit applies
        assert_eq!(similar.len(), 5);
    }

    #[test]
    fn test_find_title() {
        let model = build_model(vec![
            document(1, "The Dark Knight", "Action Crime"),
            document(2, "The Dark Knight Rises", "Action Crime"),
        ]);
        assert_eq!(model.find_title("dark knight"), Some("The Dark Knight"));
        assert_eq!(model.find_title("RISES"), Some("The Dark Knight Rises"));
        assert_eq!(model.find_title("Avatar"), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let model_dir = dir.path().join("model");

        assert!(!artifacts_exist(&model_dir));
        assert!(RecommendationModel::load(&model_dir).unwrap().is_none());

        let model = build_model(vec![
            document(1, "A", "Action"),
            document(2, "B", "Drama Action"),
        ]);
        model.save(&model_dir).unwrap();

        assert!(artifacts_exist(&model_dir));
        let loaded = RecommendationModel::load(&model_dir).unwrap().unwrap();
        assert_eq!(loaded, model);
    }
}
