//! Content-based recommender over movie genres.
//!
//! This crate provides:
//! - TfidfVectorizer for turning genre documents into feature rows
//! - linear_kernel for the dense pairwise similarity matrix
//! - RecommendationModel with "similar to X" lookups and persistence
//! - train / train_and_save to build a model from the normalized store
//!
//! ## Architecture
//! Training runs in stages:
//! 1. One document per clean movie: its genre names joined by spaces
//! 2. TF-IDF features over the corpus
//! 3. Cosine similarity between every pair of documents
//! 4. Similarity matrix + documents, and the vectorizer, written to disk
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::MovieStore;
//! use recommender::{RecommendationModel, train_and_save};
//!
//! let store = MovieStore::new("movies_database.db");
//! train_and_save(&store, Path::new("model"))?;
//!
//! let model = RecommendationModel::load(Path::new("model"))?.unwrap();
//! let similar = model.similar_titles("Avatar", 5);
//! ```

pub mod error;
pub mod features;
pub mod model;
pub mod similarity;
pub mod trainer;

// Re-export main types
pub use error::{ModelError, Result};
pub use features::{SparseVector, TfidfVectorizer};
pub use model::{
    MODEL_NAME, RecommendationModel, TrainedModel, VECTORIZER_NAME, artifacts_exist,
    load_vectorizer,
};
pub use similarity::{SimilarityMatrix, linear_kernel};
pub use trainer::{train, train_and_save};
