//! Immutable engine snapshots and the handle that publishes them
//!
//! A snapshot bundles everything derived from one catalog version: the
//! corpus, vocabulary, feature matrix, similarity matrix and item index.
//! It is never mutated after `build`; a changed catalog produces a new
//! snapshot that replaces the old one in a single swap.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::Corpus;
use crate::config::EngineConfig;
use crate::error::{Result, RevsimError};
use crate::index::ItemIndex;
use crate::recommend::{Recommendation, Recommender, SelfExclusion};
use crate::similarity::{build_similarity, DuplicatePair, SimilarityMatrix};
use crate::trace_time;
use crate::vectorize::{vectorize, FeatureMatrix, Vocabulary};

/// Build metadata recorded alongside the derived structures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub built_at: DateTime<Utc>,
    /// SHA-256 of the corpus the snapshot was built from
    pub fingerprint: String,
    /// True when the corpus produced no usable terms
    pub degraded: bool,
}

/// Summary figures for a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotStats {
    pub documents: usize,
    pub distinct_items: usize,
    pub duplicate_ids: usize,
    pub empty_documents: usize,
    pub vocabulary_terms: usize,
    pub nonzero_weights: usize,
    /// Fraction of feature matrix cells that are non-zero
    pub density: f64,
    pub self_exclusion: SelfExclusion,
    pub built_at: DateTime<Utc>,
    pub fingerprint: String,
    pub degraded: bool,
}

/// Everything derived from one catalog version
#[derive(Debug)]
pub struct Snapshot {
    corpus: Corpus,
    vocabulary: Vocabulary,
    features: FeatureMatrix,
    similarity: SimilarityMatrix,
    index: ItemIndex,
    policy: SelfExclusion,
    top_k: usize,
    info: BuildInfo,
}

impl Snapshot {
    /// Vectorize the corpus and compute all pairwise similarities
    ///
    /// A corpus without usable terms still yields a snapshot, flagged as
    /// degraded: every similarity is zero and every known item has no
    /// recommendations.
    #[tracing::instrument(skip_all, fields(documents = corpus.len()))]
    pub fn build(corpus: Corpus, config: &EngineConfig) -> Result<Self> {
        let start = Instant::now();

        if corpus.is_empty() {
            return Err(RevsimError::EmptyCatalog);
        }

        let fingerprint = corpus.fingerprint();
        let tokenizer = config.tokenizer();

        let (vocabulary, features, similarity, degraded) = match vectorize(&corpus, &tokenizer) {
            Ok((features, vocabulary)) => {
                let similarity = build_similarity(&features);
                (vocabulary, features, similarity, false)
            }
            Err(RevsimError::EmptyVocabulary) => {
                warn!(
                    documents = corpus.len(),
                    "no usable terms in catalog; recommendations will be empty"
                );
                (
                    Vocabulary::empty(corpus.len()),
                    FeatureMatrix::empty(corpus.len()),
                    SimilarityMatrix::zeros(corpus.len()),
                    true,
                )
            }
            Err(e) => return Err(e),
        };

        let index = ItemIndex::build(corpus.item_ids());
        if index.len() < corpus.len() {
            debug!(
                duplicates = corpus.len() - index.len(),
                "duplicate item ids resolve to their first row"
            );
        }

        let snapshot = Snapshot {
            corpus,
            vocabulary,
            features,
            similarity,
            index,
            policy: config.engine.self_exclusion,
            top_k: config.engine.top_k,
            info: BuildInfo {
                built_at: Utc::now(),
                fingerprint,
                degraded,
            },
        };

        info!(
            documents = snapshot.corpus.len(),
            terms = snapshot.vocabulary.len(),
            degraded,
            "snapshot built"
        );
        trace_time!(start, "snapshot_build");
        Ok(snapshot)
    }

    fn recommender(&self) -> Recommender<'_> {
        Recommender::new(&self.corpus, &self.index, &self.similarity, self.policy)
    }

    /// Top `k` items most similar to `item_id`; `None` if unknown
    pub fn recommend(&self, item_id: &str, k: usize) -> Option<Vec<Recommendation>> {
        if self.info.degraded {
            return self.index.resolve(item_id).map(|_| Vec::new());
        }
        self.recommender().recommend(item_id, k)
    }

    /// Recommend with the configured default count
    pub fn recommend_default(&self, item_id: &str) -> Option<Vec<Recommendation>> {
        self.recommend(item_id, self.top_k)
    }

    /// Similarity between two items; `None` if either is unknown
    pub fn score(&self, a: &str, b: &str) -> Option<f64> {
        self.recommender().score(a, b)
    }

    /// Pairs of rows whose reviews score at or above `threshold`
    pub fn find_duplicates(&self, threshold: f64) -> Vec<DuplicatePair> {
        self.similarity.find_duplicates(threshold)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn info(&self) -> &BuildInfo {
        &self.info
    }

    pub fn is_degraded(&self) -> bool {
        self.info.degraded
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn stats(&self) -> SnapshotStats {
        let documents = self.corpus.len();
        let distinct_items = self.index.len();
        let nonzero_weights = self.features.nnz();
        let cells = documents * self.vocabulary.len();
        let density = if cells == 0 {
            0.0
        } else {
            nonzero_weights as f64 / cells as f64
        };

        SnapshotStats {
            documents,
            distinct_items,
            duplicate_ids: documents - distinct_items,
            empty_documents: (0..documents)
                .filter(|&i| self.features.is_zero_row(i))
                .count(),
            vocabulary_terms: self.vocabulary.len(),
            nonzero_weights,
            density,
            self_exclusion: self.policy,
            built_at: self.info.built_at,
            fingerprint: self.info.fingerprint.clone(),
            degraded: self.info.degraded,
        }
    }
}

/// Shared access point to the active snapshot
///
/// Readers take an `Arc` and keep using it for as long as they like; a
/// publish never changes a snapshot a reader already holds.
#[derive(Debug)]
pub struct SnapshotHandle {
    current: RwLock<Arc<Snapshot>>,
    /// Held for a whole refresh so that check, build and publish happen as one step
    refresh_lock: Mutex<()>,
    config: EngineConfig,
}

impl SnapshotHandle {
    pub fn new(snapshot: Snapshot, config: EngineConfig) -> Self {
        SnapshotHandle {
            current: RwLock::new(Arc::new(snapshot)),
            refresh_lock: Mutex::new(()),
            config,
        }
    }

    /// Build the first snapshot for a corpus
    pub fn build(corpus: Corpus, config: EngineConfig) -> Result<Self> {
        let snapshot = Snapshot::build(corpus, &config)?;
        Ok(Self::new(snapshot, config))
    }

    /// The snapshot readers should use right now
    pub fn current(&self) -> Arc<Snapshot> {
        // The guarded value is only ever replaced whole, so a poisoned
        // lock still holds a complete snapshot
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Swap in a fully built snapshot
    pub fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }

    /// Rebuild and publish if the corpus differs from the active one
    ///
    /// Returns `true` when a new snapshot was published. The build runs
    /// before the write lock is taken, so readers are never blocked on it.
    /// Concurrent refreshes run one at a time, so the last one to return
    /// decides the published snapshot.
    pub fn refresh(&self, corpus: Corpus) -> Result<bool> {
        let _refreshing = self
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let fingerprint = corpus.fingerprint();
        if fingerprint == self.current().info.fingerprint {
            debug!(%fingerprint, "corpus unchanged, keeping snapshot");
            return Ok(false);
        }

        let snapshot = Snapshot::build(corpus, &self.config)?;
        self.publish(snapshot);
        info!(%fingerprint, "published new snapshot");
        Ok(true)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery_corpus() -> Corpus {
        Corpus::from_pairs([
            ("A", "great battery life"),
            ("B", "battery life is great"),
            ("C", "terrible screen quality"),
        ])
    }

    #[test]
    fn test_build_and_recommend() {
        let snapshot = Snapshot::build(battery_corpus(), &EngineConfig::default()).unwrap();
        let recs = snapshot.recommend("A", 2).unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert!(!snapshot.is_degraded());
        assert!(snapshot.recommend("Z", 2).is_none());
    }

    #[test]
    fn test_recommend_default_uses_config() {
        let mut config = EngineConfig::default();
        config.engine.top_k = 1;
        let snapshot = Snapshot::build(battery_corpus(), &config).unwrap();
        assert_eq!(snapshot.recommend_default("A").unwrap().len(), 1);
    }

    #[test]
    fn test_degraded_snapshot() {
        let corpus = Corpus::from_pairs([("A", "the and"), ("B", ""), ("C", "of it")]);
        let snapshot = Snapshot::build(corpus, &EngineConfig::default()).unwrap();

        assert!(snapshot.is_degraded());
        assert_eq!(snapshot.recommend("A", 5), Some(vec![]));
        assert_eq!(snapshot.recommend("Z", 5), None);
        assert_eq!(snapshot.score("A", "B"), Some(0.0));
        assert!(snapshot.find_duplicates(0.5).is_empty());
        assert_eq!(snapshot.find_duplicates(0.0).len(), 3);
        assert_eq!(snapshot.stats().vocabulary_terms, 0);
        assert_eq!(snapshot.stats().density, 0.0);
    }

    #[test]
    fn test_empty_corpus_is_error() {
        let err = Snapshot::build(Corpus::default(), &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, RevsimError::EmptyCatalog));
    }

    #[test]
    fn test_stats() {
        let corpus = Corpus::from_pairs([
            ("A", "great battery life"),
            ("A", "battery"),
            ("B", ""),
        ]);
        let snapshot = Snapshot::build(corpus, &EngineConfig::default()).unwrap();
        let stats = snapshot.stats();

        assert_eq!(stats.documents, 3);
        assert_eq!(stats.distinct_items, 2);
        assert_eq!(stats.duplicate_ids, 1);
        assert_eq!(stats.empty_documents, 1);
        assert_eq!(stats.vocabulary_terms, 3);
        assert_eq!(stats.nonzero_weights, 4);
        assert_eq!(stats.fingerprint, snapshot.info().fingerprint);
    }

    #[test]
    fn test_snapshot_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Snapshot>();
        assert_send_sync::<SnapshotHandle>();
    }

    #[test]
    fn test_refresh_skips_unchanged_corpus() {
        let handle = SnapshotHandle::build(battery_corpus(), EngineConfig::default()).unwrap();
        let before = handle.current();

        assert!(!handle.refresh(battery_corpus()).unwrap());
        assert!(Arc::ptr_eq(&before, &handle.current()));
    }

    #[test]
    fn test_refresh_publishes_changed_corpus() {
        let handle = SnapshotHandle::build(battery_corpus(), EngineConfig::default()).unwrap();
        let before = handle.current();

        let changed = Corpus::from_pairs([("A", "great battery life"), ("D", "battery lasts")]);
        assert!(handle.refresh(changed).unwrap());

        let after = handle.current();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.corpus().len(), 2);
        // Readers holding the old snapshot still see the old corpus
        assert_eq!(before.corpus().len(), 3);
        assert!(before.recommend("C", 5).is_some());
        assert!(after.recommend("C", 5).is_none());
    }

    #[test]
    fn test_refresh_failure_keeps_current() {
        let handle = SnapshotHandle::build(battery_corpus(), EngineConfig::default()).unwrap();
        assert!(handle.refresh(Corpus::default()).is_err());
        assert_eq!(handle.current().corpus().len(), 3);
    }

    #[test]
    fn test_concurrent_refreshes_publish_once() {
        let handle = SnapshotHandle::build(battery_corpus(), EngineConfig::default()).unwrap();
        let changed = Corpus::from_pairs([("A", "great battery life"), ("D", "battery lasts")]);
        let expected = changed.fingerprint();

        let published = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    let corpus = changed.clone();
                    let handle = &handle;
                    scope.spawn(move || handle.refresh(corpus).unwrap())
                })
                .collect();
            workers
                .into_iter()
                .map(|w| w.join().unwrap())
                .filter(|&was_published| was_published)
                .count()
        });

        assert_eq!(published, 1);
        assert_eq!(handle.current().info.fingerprint, expected);
    }

    #[test]
    fn test_sequential_refreshes_end_on_last_corpus() {
        let handle = SnapshotHandle::build(battery_corpus(), EngineConfig::default()).unwrap();
        let older = Corpus::from_pairs([("A", "great battery life"), ("D", "battery lasts")]);
        let newer = Corpus::from_pairs([("A", "great battery life"), ("E", "screen glare")]);

        assert!(handle.refresh(older).unwrap());
        assert!(handle.refresh(newer.clone()).unwrap());
        assert_eq!(handle.current().info.fingerprint, newer.fingerprint());
    }
}
