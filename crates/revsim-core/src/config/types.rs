//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogFormat;
use crate::recommend::SelfExclusion;

/// Default number of recommendations per query
pub const DEFAULT_TOP_K: usize = 5;

/// Default minimum similarity for a near-duplicate pair
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.85;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Where the catalog lives and how to read it
    #[serde(default)]
    pub data: DataConfig,

    /// Vectorizer and recommender settings
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Catalog source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Catalog path (optional; the `--data` flag takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Column holding the item identifier
    #[serde(default = "default_item_column")]
    pub item_column: String,

    /// Column holding the aggregated review text
    #[serde(default = "default_text_column")]
    pub text_column: String,

    /// Catalog format; `auto` picks from the file extension
    #[serde(default)]
    pub format: CatalogFormat,
}

/// Vectorizer and recommender settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Recommendations returned when no explicit count is given
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Apply English stemming to tokens (default false)
    #[serde(default)]
    pub stemming: bool,

    /// Remove the built-in English stop words (default true)
    #[serde(default = "default_stop_words")]
    pub stop_words: bool,

    /// Additional stop words for domain noise ("product", "item", ...)
    #[serde(default)]
    pub extra_stop_words: Vec<String>,

    /// How the query item is removed from its own ranking
    #[serde(default)]
    pub self_exclusion: SelfExclusion,

    /// Minimum similarity reported by duplicate detection
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            path: None,
            item_column: default_item_column(),
            text_column: default_text_column(),
            format: CatalogFormat::default(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            top_k: default_top_k(),
            stemming: false,
            stop_words: default_stop_words(),
            extra_stop_words: Vec::new(),
            self_exclusion: SelfExclusion::default(),
            duplicate_threshold: default_duplicate_threshold(),
        }
    }
}

fn default_item_column() -> String {
    "item_reviewed".to_string()
}

fn default_text_column() -> String {
    "text".to_string()
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_stop_words() -> bool {
    true
}

fn default_duplicate_threshold() -> f64 {
    DEFAULT_DUPLICATE_THRESHOLD
}
