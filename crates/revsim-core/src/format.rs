//! Output format handling for revsim
//!
//! - human: aligned tables for terminal use
//! - json: stable, machine-readable JSON
//! - records: line-oriented format for scripts and LLM context

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RevsimError;

/// Output format for revsim commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
    /// Records output, one fact per line
    Records,
}

impl FromStr for OutputFormat {
    type Err = RevsimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "records" => Ok(OutputFormat::Records),
            other => Err(RevsimError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Records => write!(f, "records"),
        }
    }
}

/// Render a similarity score with fixed precision for text output
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}
