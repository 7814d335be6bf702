//! Token-weight features for genre documents.
//!
//! A TF-IDF vectorizer with the usual defaults:
//! - lowercase, tokens are runs of two or more word characters
//! - no stop-word removal
//! - vocabulary ordered lexicographically, so column indices are stable
//! - smooth idf: `ln((1 + n) / (1 + df)) + 1`
//! - raw term counts, rows scaled to unit L2 norm

use crate::error::{ModelError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

lazy_static! {
    static ref TOKEN_PATTERN: Regex =
        Regex::new(r"(?u)\b\w\w+\b").expect("token pattern is a valid regex");
}

/// A sparse row of the feature matrix.
///
/// `indices` is strictly increasing and parallel to `values`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

/// Fitted TF-IDF state: vocabulary and per-term idf weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a document into lowercase tokens.
    ///
    /// Example: "Science Fiction" -> ["science", "fiction"]
    pub fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn vocabulary and idf weights from the corpus.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }

        // Document frequency: count each term once per document
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = Self::tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let ordered: BTreeMap<String, usize> = doc_freq.into_iter().collect();

        self.vocabulary = BTreeMap::new();
        self.idf = Vec::with_capacity(ordered.len());
        for (index, (term, df)) in ordered.into_iter().enumerate() {
            self.idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
            self.vocabulary.insert(term, index);
        }
        Ok(())
    }

    /// Turn documents into unit-length TF-IDF rows. Unknown terms are ignored.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents
            .iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        Ok(self.transform(documents))
    }

    fn transform_one(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in Self::tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row = SparseVector {
            indices: Vec::with_capacity(counts.len()),
            values: Vec::with_capacity(counts.len()),
        };
        for (index, count) in counts {
            row.indices.push(index);
            row.values.push(count * self.idf[index]);
        }

        let norm = row.norm();
        if norm > 0.0 {
            for value in &mut row.values {
                *value /= norm;
            }
        }
        row
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idf(vectorizer: &TfidfVectorizer, term: &str) -> Option<f64> {
        vectorizer.vocabulary.get(term).map(|&index| vectorizer.idf[index])
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            TfidfVectorizer::tokenize("Science Fiction Action"),
            vec!["science", "fiction", "action"]
        );
        // Single characters are not tokens
        assert_eq!(TfidfVectorizer::tokenize("a TV Movie"), vec!["tv", "movie"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&["Drama Action", "Comedy"]).unwrap();

        let terms: Vec<_> = vectorizer.vocabulary.keys().cloned().collect();
        assert_eq!(terms, vec!["action", "comedy", "drama"]);
        assert_eq!(vectorizer.vocabulary["comedy"], 1);
    }

    #[test]
    fn test_smooth_idf() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&["Drama", "Drama Comedy", "Action"]).unwrap();

        // drama: df = 2, n = 3 -> ln(4/3) + 1
        let expected = (4.0f64 / 3.0).ln() + 1.0;
        assert!((idf(&vectorizer, "drama").unwrap() - expected).abs() < 1e-12);
        // comedy: df = 1 -> ln(4/2) + 1
        let expected = 2.0f64.ln() + 1.0;
        assert!((idf(&vectorizer, "comedy").unwrap() - expected).abs() < 1e-12);
        assert!(idf(&vectorizer, "western").is_none());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer
            .fit_transform(&["Action Adventure", "Drama", "Action Drama Drama"])
            .unwrap();

        for row in &rows {
            assert!((row.norm() - 1.0).abs() < 1e-12);
        }
        assert_eq!(rows[1].nnz(), 1);
    }

    #[test]
    fn test_unknown_terms_give_empty_row() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&["Action"]).unwrap();

        let rows = vectorizer.transform(&["Western"]);
        assert_eq!(rows[0].nnz(), 0);
    }

    #[test]
    fn test_fit_empty_corpus() {
        let mut vectorizer = TfidfVectorizer::new();
        let docs: Vec<String> = Vec::new();
        assert!(matches!(vectorizer.fit(&docs), Err(ModelError::EmptyCorpus)));
        assert!(!vectorizer.is_fitted());
    }

    #[test]
    fn test_sparse_dot() {
        let a = SparseVector {
            indices: vec![0, 2, 5],
            values: vec![1.0, 2.0, 3.0],
        };
        let b = SparseVector {
            indices: vec![2, 3, 5],
            values: vec![4.0, 1.0, 0.5],
        };
        assert_eq!(a.dot(&b), 2.0 * 4.0 + 3.0 * 0.5);
        assert_eq!(a.dot(&b), b.dot(&a));
    }
}
