//! TF-IDF vectorization of review text
//!
//! `weight(t, d) = tf(t, d) * idf(t)` with raw counts for tf and smoothed
//! idf, then each row is scaled to unit length. Cosine similarity between
//! two rows is then a plain dot product.

mod matrix;
mod vocabulary;

pub use matrix::FeatureMatrix;
pub use vocabulary::Vocabulary;

pub(crate) use matrix::sparse_dot;

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::debug;

use crate::catalog::Corpus;
use crate::error::{Result, RevsimError};
use crate::text::Tokenizer;
use crate::trace_time;

/// Fit a vocabulary on the corpus and transform every document
///
/// Fails with `EmptyVocabulary` when no document yields a single term.
pub fn vectorize(corpus: &Corpus, tokenizer: &Tokenizer) -> Result<(FeatureMatrix, Vocabulary)> {
    let start = Instant::now();

    let term_counts: Vec<BTreeMap<String, usize>> = corpus
        .texts()
        .map(|text| count_terms(tokenizer, text))
        .collect();

    let mut df: BTreeMap<String, usize> = BTreeMap::new();
    for counts in &term_counts {
        for term in counts.keys() {
            *df.entry(term.clone()).or_insert(0) += 1;
        }
    }

    if df.is_empty() {
        return Err(RevsimError::EmptyVocabulary);
    }

    let vocabulary = Vocabulary::from_document_frequencies(df, corpus.len());
    let idf = vocabulary.idf_weights();

    let rows = term_counts
        .into_iter()
        .map(|counts| {
            // BTreeMap iteration is lexicographic, which is column order
            let mut row: Vec<(usize, f64)> = counts
                .into_iter()
                .filter_map(|(term, tf)| {
                    vocabulary
                        .column(&term)
                        .map(|col| (col, tf as f64 * idf[col]))
                })
                .collect();
            matrix::l2_normalize(&mut row);
            row
        })
        .collect();

    let features = FeatureMatrix::new(rows, vocabulary.len());
    debug!(
        documents = features.n_rows(),
        terms = vocabulary.len(),
        nnz = features.nnz(),
        "vectorized corpus"
    );
    trace_time!(start, "vectorize", documents = corpus.len());

    Ok((features, vocabulary))
}

fn count_terms(tokenizer: &Tokenizer, text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for term in tokenizer.tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
