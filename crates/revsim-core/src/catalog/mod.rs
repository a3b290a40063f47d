//! Review catalog: documents, corpus and tabular loading
//!
//! A corpus is the ordered list of documents the engine is built from.
//! Positions in the corpus are the row indices used by every derived
//! structure, so insertion order is preserved exactly as read.

mod loader;

pub use loader::{load_catalog, CatalogFormat};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One item's aggregated review text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display name and identity key of the reviewed item
    pub item_id: String,
    /// Review text; missing text is stored as the empty string
    pub text: String,
}

impl Document {
    pub fn new(item_id: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            item_id: item_id.into(),
            text: text.into(),
        }
    }

    /// Build a document from a possibly missing text value
    pub fn with_optional_text(item_id: impl Into<String>, text: Option<String>) -> Self {
        Document::new(item_id, text.unwrap_or_default())
    }
}

/// Ordered sequence of documents, positions `0..len()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Corpus { documents }
    }

    /// Convenience constructor from `(item_id, text)` pairs
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Corpus {
            documents: pairs
                .into_iter()
                .map(|(id, text)| Document::new(id, text))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    /// Item id at a row position
    pub fn item_id(&self, position: usize) -> Option<&str> {
        self.documents.get(position).map(|d| d.item_id.as_str())
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.item_id.as_str())
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.text.as_str())
    }

    /// Distinct item ids in first-seen order
    pub fn product_list(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.item_ids().filter(|id| seen.insert(*id)).collect()
    }

    /// Number of positions whose item id already appeared earlier
    pub fn duplicate_id_count(&self) -> usize {
        self.len() - self.product_list().len()
    }

    /// SHA-256 over every id and text, length-prefixed so that field
    /// boundaries cannot be shifted between documents.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.documents.len() as u64).to_le_bytes());
        for doc in &self.documents {
            for field in [&doc.item_id, &doc.text] {
                hasher.update((field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        Corpus::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_list_first_seen_order() {
        let corpus = Corpus::from_pairs([
            ("Phone", "good"),
            ("Laptop", "fast"),
            ("Phone", "bad"),
            ("Tablet", "ok"),
        ]);
        assert_eq!(corpus.product_list(), vec!["Phone", "Laptop", "Tablet"]);
        assert_eq!(corpus.duplicate_id_count(), 1);
    }

    #[test]
    fn test_optional_text_becomes_empty() {
        let doc = Document::with_optional_text("A", None);
        assert_eq!(doc.text, "");
    }

    #[test]
    fn test_fingerprint_stable() {
        let a = Corpus::from_pairs([("A", "great battery"), ("B", "bad screen")]);
        let b = Corpus::from_pairs([("A", "great battery"), ("B", "bad screen")]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_sensitive_to_order_and_boundaries() {
        let a = Corpus::from_pairs([("A", "x"), ("B", "y")]);
        let swapped = Corpus::from_pairs([("B", "y"), ("A", "x")]);
        assert_ne!(a.fingerprint(), swapped.fingerprint());

        let left = Corpus::from_pairs([("ab", "c")]);
        let right = Corpus::from_pairs([("a", "bc")]);
        assert_ne!(left.fingerprint(), right.fingerprint());
    }
}
