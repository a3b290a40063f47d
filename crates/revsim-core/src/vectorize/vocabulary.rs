use std::collections::{BTreeMap, HashMap};

/// Terms of a corpus with their column index and document statistics
///
/// Columns are assigned in lexicographic term order, so the same corpus
/// and tokenizer always produce the same layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: HashMap<String, usize>,
    document_frequency: Vec<usize>,
    idf: Vec<f64>,
    documents: usize,
}

impl Vocabulary {
    /// Build from per-term document frequencies over `documents` documents
    pub(crate) fn from_document_frequencies(
        df: BTreeMap<String, usize>,
        documents: usize,
    ) -> Self {
        let mut terms = Vec::with_capacity(df.len());
        let mut document_frequency = Vec::with_capacity(df.len());
        let mut idf = Vec::with_capacity(df.len());

        for (term, count) in df {
            idf.push(smooth_idf(documents, count));
            document_frequency.push(count);
            terms.push(term);
        }

        let columns = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();

        Vocabulary {
            terms,
            columns,
            document_frequency,
            idf,
            documents,
        }
    }

    /// Vocabulary with no terms, for a corpus that produced none
    pub(crate) fn empty(documents: usize) -> Self {
        Self::from_document_frequencies(BTreeMap::new(), documents)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    /// Number of documents containing the term at `column`
    pub fn document_frequency(&self, column: usize) -> Option<usize> {
        self.document_frequency.get(column).copied()
    }

    pub fn idf(&self, column: usize) -> Option<f64> {
        self.idf.get(column).copied()
    }

    pub(crate) fn idf_weights(&self) -> &[f64] {
        &self.idf
    }

    /// Number of documents the statistics were computed over
    pub fn documents(&self) -> usize {
        self.documents
    }
}

/// `ln((1 + n) / (1 + df)) + 1`
///
/// The added one keeps terms present in every document from vanishing.
fn smooth_idf(documents: usize, df: usize) -> f64 {
    ((1.0 + documents as f64) / (1.0 + df as f64)).ln() + 1.0
}
