//! Dense pairwise similarity between feature rows.
//!
//! For unit-length TF-IDF rows the dot product is the cosine similarity, so
//! a plain linear kernel is enough. The matrix is N x N over all documents;
//! N is in the low thousands, so no approximate index is needed.

use crate::features::SparseVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Row-major N x N similarity matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when the stored values match the declared size
    pub fn is_consistent(&self) -> bool {
        self.values.len() == self.size * self.size
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.size..(row + 1) * self.size]
    }

    /// Other rows ranked by similarity to `index`, best first.
    ///
    /// `index` itself is excluded by position, not by value: another row
    /// may score exactly as high. Ties keep row order.
    pub fn ranked_neighbors(&self, index: usize, limit: usize) -> Vec<(usize, f64)> {
        if index >= self.size {
            return Vec::new();
        }

        let mut ranked: Vec<(usize, f64)> = self
            .row(index)
            .iter()
            .copied()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .collect();

        // sort_by is stable, which keeps ties in row order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);
        ranked
    }
}

/// Compute every pairwise dot product between `features`.
///
/// Rows are filled in parallel; each cell is an independent dot product,
/// so the result does not depend on scheduling.
pub fn linear_kernel(features: &[SparseVector]) -> SimilarityMatrix {
    let size = features.len();
    let mut values = vec![0.0f64; size * size];

    values
        .par_chunks_mut(size.max(1))
        .enumerate()
        .for_each(|(i, row)| {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = features[i].dot(&features[j]);
            }
        });

    SimilarityMatrix { size, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::TfidfVectorizer;

    fn build(docs: &[&str]) -> SimilarityMatrix {
        let mut vectorizer = TfidfVectorizer::new();
        let features = vectorizer.fit_transform(docs).unwrap();
        linear_kernel(&features)
    }

    #[test]
    fn test_symmetric_with_dominant_diagonal() {
        let matrix = build(&[
            "Action Adventure",
            "Drama",
            "Action Drama",
            "Comedy Romance",
            "Action Adventure Science Fiction",
        ]);

        assert_eq!(matrix.size(), 5);
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(matrix.row(i)[j], matrix.row(j)[i]);
            }
            let max = matrix.row(i).iter().cloned().fold(f64::MIN, f64::max);
            assert_eq!(matrix.row(i)[i], max);
            assert!((matrix.row(i)[i] - 1.0).abs() < 1e-12);
        }
        assert_eq!(matrix.row(1)[3], 0.0);
    }

    #[test]
    fn test_ranked_neighbors_excludes_self_by_position() {
        // Rows 0, 1 and 2 are identical: all score 1.0 against each other
        let matrix = build(&["Drama", "Drama", "Drama", "Comedy"]);

        let neighbors = matrix.ranked_neighbors(1, 5);
        let indices: Vec<usize> = neighbors.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        assert!((neighbors[0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ranked_neighbors_limit_and_bounds() {
        let matrix = build(&[
            "Action",
            "Action Drama",
            "Drama",
            "Comedy",
            "Horror",
            "War",
            "Music",
        ]);
        assert_eq!(matrix.ranked_neighbors(0, 5).len(), 5);
        assert_eq!(matrix.ranked_neighbors(0, 5)[0].0, 1);
        assert!(matrix.ranked_neighbors(42, 5).is_empty());
    }

    #[test]
    fn test_empty_features() {
        let matrix = linear_kernel(&[]);
        assert_eq!(matrix.size(), 0);
        assert!(matrix.is_consistent());
    }
}
