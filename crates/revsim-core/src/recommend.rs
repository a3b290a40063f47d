//! Top-K nearest items by review similarity

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Corpus;
use crate::error::{Result, RevsimError};
use crate::index::ItemIndex;
use crate::similarity::SimilarityMatrix;

/// One ranked neighbour of a query item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub item_id: String,
    /// Row of the recommended item in the corpus
    pub position: usize,
    pub score: f64,
}

/// How the query item is kept out of its own results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfExclusion {
    /// Drop the entry at the query's own position
    #[default]
    Identity,
    /// Drop whatever ranks first, assuming it is the query itself
    ///
    /// An identical twin listed before the query, or an empty query
    /// document, makes this drop the wrong entry.
    FirstRanked,
}

impl FromStr for SelfExclusion {
    type Err = RevsimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "identity" => Ok(SelfExclusion::Identity),
            "first-ranked" | "first_ranked" => Ok(SelfExclusion::FirstRanked),
            other => Err(RevsimError::invalid_value("self exclusion", other)),
        }
    }
}

impl fmt::Display for SelfExclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelfExclusion::Identity => write!(f, "identity"),
            SelfExclusion::FirstRanked => write!(f, "first-ranked"),
        }
    }
}

/// Rank one similarity row and keep the `k` best entries
///
/// The sort is stable, so equal scores stay in corpus order.
pub fn rank(row: &[f64], query: usize, k: usize, policy: SelfExclusion) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    match policy {
        SelfExclusion::Identity => scored
            .into_iter()
            .filter(|&(position, _)| position != query)
            .take(k)
            .collect(),
        SelfExclusion::FirstRanked => scored.into_iter().skip(1).take(k).collect(),
    }
}

/// Read-only view answering queries against one similarity matrix
pub struct Recommender<'a> {
    corpus: &'a Corpus,
    index: &'a ItemIndex,
    similarity: &'a SimilarityMatrix,
    policy: SelfExclusion,
}

impl<'a> Recommender<'a> {
    pub fn new(
        corpus: &'a Corpus,
        index: &'a ItemIndex,
        similarity: &'a SimilarityMatrix,
        policy: SelfExclusion,
    ) -> Self {
        Recommender {
            corpus,
            index,
            similarity,
            policy,
        }
    }

    /// Top `k` items most similar to `item_id`
    ///
    /// Returns `None` if the item is not in the index. Fewer than `k`
    /// entries come back when the corpus is small.
    pub fn recommend(&self, item_id: &str, k: usize) -> Option<Vec<Recommendation>> {
        let query = self.index.resolve(item_id)?;
        let row = self.similarity.row(query)?;

        let recommendations = rank(row, query, k, self.policy)
            .into_iter()
            .filter_map(|(position, score)| {
                self.corpus.item_id(position).map(|id| Recommendation {
                    item_id: id.to_string(),
                    position,
                    score,
                })
            })
            .collect();

        Some(recommendations)
    }

    /// Similarity between two items, `None` if either is unknown
    pub fn score(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index.resolve(a)?;
        let j = self.index.resolve(b)?;
        self.similarity.get(i, j)
    }
}
