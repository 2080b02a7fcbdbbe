//! Sub-configuration structures for the grain-lattice components.

use serde::{Deserialize, Serialize};

use crate::chunker::{DelimiterTable, GrainChunker};
use crate::constants::{BOUNDARY_WINDOW, GRAIN_DELIMITERS, HORIZON_FRAME_SIZE};
use crate::error::CoreResult;

/// Chunker configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Target chunk length in bytes (default: 233 KiB frame)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Start-to-start advance in bytes; omitted means the golden-ratio
    /// step derived from `chunk_size`
    #[serde(default)]
    pub overlap_step: Option<usize>,

    /// Boundary search window in bytes, per direction (default: 4096)
    #[serde(default = "default_boundary_window")]
    pub boundary_window: usize,

    /// Grain delimiter characters, as a string of single-byte characters
    #[serde(default = "default_delimiters")]
    pub delimiters: String,
}

impl ChunkerConfig {
    /// Build a [`GrainChunker`] from this configuration.
    pub fn build(&self) -> CoreResult<GrainChunker> {
        let step = self
            .overlap_step
            .unwrap_or_else(|| GrainChunker::<DelimiterTable>::golden_step(self.chunk_size));
        let rule = DelimiterTable::new(self.delimiters.as_bytes());
        let chunker =
            GrainChunker::with_rule(self.chunk_size, step, rule)?.with_window(self.boundary_window);
        Ok(chunker)
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap_step: None,
            boundary_window: default_boundary_window(),
            delimiters: default_delimiters(),
        }
    }
}

/// Phi-adic numeral configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct PhiConfig {
    /// Maximum number of fractional digits (default: 32)
    #[serde(default = "default_max_precision")]
    pub max_precision: usize,

    /// Tolerance for fractional digit threshold tests (default: 1e-7)
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

impl Default for PhiConfig {
    fn default() -> Self {
        Self {
            max_precision: default_max_precision(),
            tolerance: default_tolerance(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// ============================================================================
// Serde Default Functions
// ============================================================================

fn default_chunk_size() -> usize {
    HORIZON_FRAME_SIZE
}

fn default_boundary_window() -> usize {
    BOUNDARY_WINDOW
}

fn default_delimiters() -> String {
    GRAIN_DELIMITERS.iter().map(|&b| b as char).collect()
}

fn default_max_precision() -> usize {
    32
}

fn default_tolerance() -> f32 {
    1e-7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
