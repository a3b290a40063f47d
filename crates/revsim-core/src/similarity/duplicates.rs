use serde::Serialize;

use super::SimilarityMatrix;

/// Two corpus positions whose review texts are nearly identical
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicatePair {
    /// Lower position of the pair
    pub first: usize,
    /// Higher position of the pair
    pub second: usize,
    pub score: f64,
}

impl SimilarityMatrix {
    /// Find all near-duplicate pairs
    ///
    /// Returns every pair `(i, j)` with `i < j` and similarity at or above
    /// `threshold`, sorted by score descending, then by position.
    pub fn find_duplicates(&self, threshold: f64) -> Vec<DuplicatePair> {
        let mut duplicates = Vec::new();

        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let score = self.values[i * self.n + j];
                if score >= threshold {
                    duplicates.push(DuplicatePair {
                        first: i,
                        second: j,
                        score,
                    });
                }
            }
        }

        // Pairs are generated in (i, j) order, so a stable sort keeps it for ties
        duplicates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        duplicates
    }
}
