//! Revsim Core Library
//!
//! Content-based item recommendations from review text: TF-IDF vectors,
//! pairwise cosine similarity and top-K nearest neighbours, bundled as an
//! immutable snapshot per catalog version.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod index;
pub mod logging;
pub mod recommend;
pub mod records;
pub mod similarity;
pub mod snapshot;
pub mod text;
pub mod vectorize;

pub use catalog::{load_catalog, CatalogFormat, Corpus, Document};
pub use config::EngineConfig;
pub use error::{ExitCode, Result, RevsimError};
pub use format::OutputFormat;
pub use index::ItemIndex;
pub use recommend::{Recommendation, Recommender, SelfExclusion};
pub use similarity::{build_similarity, DuplicatePair, SimilarityMatrix};
pub use snapshot::{BuildInfo, Snapshot, SnapshotHandle, SnapshotStats};
pub use text::Tokenizer;
pub use vectorize::{vectorize, FeatureMatrix, Vocabulary};
