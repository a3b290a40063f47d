//! Pairwise cosine similarity between corpus rows

mod duplicates;

pub use duplicates::DuplicatePair;

use std::time::Instant;

use tracing::debug;

use crate::trace_time;
use crate::vectorize::{sparse_dot, FeatureMatrix};

/// Dense N×N cosine similarity matrix
///
/// Symmetric with values in `[0, 1]`. The diagonal is exactly 1.0 for rows
/// with any non-zero weight and 0.0 for empty rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// All-zero matrix, used when the corpus has no usable terms
    pub fn zeros(n: usize) -> Self {
        SimilarityMatrix {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between rows `i` and `j`; `None` when out of range
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// Row `i` of the matrix, one score per corpus position
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.values[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks panics on zero size
        self.values.chunks(self.n.max(1))
    }
}

/// Compute `S = M · Mᵀ` for an L2-normalized feature matrix
///
/// Only the upper triangle is computed and mirrored, so `S[i][j]` and
/// `S[j][i]` are bit-identical.
pub fn build_similarity(features: &FeatureMatrix) -> SimilarityMatrix {
    let start = Instant::now();
    let n = features.n_rows();
    let mut sim = SimilarityMatrix::zeros(n);

    for i in 0..n {
        let row_i = features.row(i);
        sim.values[i * n + i] = if row_i.is_empty() { 0.0 } else { 1.0 };

        for j in (i + 1)..n {
            let score = sparse_dot(row_i, features.row(j)).clamp(0.0, 1.0);
            sim.values[i * n + j] = score;
            sim.values[j * n + i] = score;
        }
    }

    debug!(n, "built similarity matrix");
    trace_time!(start, "build_similarity", n = n);
    sim
}

#[cfg(test)]
mod tests;
