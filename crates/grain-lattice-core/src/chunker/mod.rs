//! Boundary-aware chunking for retrieval corpora.
//!
//! This module provides:
//! - [`Chunk`] - Byte-range descriptor for one retrieval unit
//! - [`GrainChunker`] - Component that splits a byte buffer into chunks
//!   snapped to grain boundaries (whitespace and sentence punctuation)
//! - [`BoundaryRule`] - Strategy seam for deciding which bytes end a grain
//! - [`ChunkerError`] - Error types for chunker configuration
//!
//! # Boundary Entropy
//!
//! A chunk edge that falls inside a word injects spurious high-entropy
//! fragments into downstream embedding. The chunker therefore resolves every
//! cut to the nearest delimiter within a bounded window: forward first (prefer
//! extending a chunk slightly over shrinking it), then backward, then a hard
//! cut at the target offset. Each boundary lookup is O(window) regardless of
//! buffer size.
//!
//! # Example
//! ```rust
//! use grain_lattice_core::chunker::GrainChunker;
//!
//! let chunker = GrainChunker::new(4, 4).unwrap();
//! let chunks = chunker.chunk_to_vec(b"ab cd ef gh");
//!
//! // Every chunk ends just after a space; "cd" and "ef" are never split.
//! assert_eq!(chunks[0].end, 6);
//! assert_eq!(chunks.last().unwrap().end, 11);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::constants::{BOUNDARY_WINDOW, GRAIN_DELIMITERS, HORIZON_FRAME_SIZE, PHI_F64};

/// Descriptor for one chunk produced by a traversal.
///
/// Invariants maintained by [`GrainChunker::chunk_data`]:
/// - `start < end`
/// - chunks are produced in strictly increasing `start` order
/// - the final chunk's `end` equals the buffer length
/// - with overlap disabled, chunk ranges partition the buffer exactly
///
/// Chunks are transient: they borrow nothing and are not persisted here.
/// The caller is responsible for embedding or storing the ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Ordinal position in the traversal (0-based).
    pub index: usize,
    /// Byte offset of the first byte in the chunk.
    pub start: usize,
    /// Byte offset one past the last byte in the chunk (exclusive).
    pub end: usize,
}

impl Chunk {
    /// Length of the chunk in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// A chunk is never empty by construction; kept for clippy symmetry.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Errors that can occur when configuring a chunker.
///
/// All errors include context values for debugging.
/// Never panic in lib, propagate with `?`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkerError {
    /// Configuration error: chunk_size must be greater than zero.
    ///
    /// A zero chunk size would pin the target end at the chunk start and
    /// loop forever; it is rejected at construction time.
    #[error("Configuration error: chunk_size must be greater than 0")]
    ZeroChunkSize,

    /// Configuration error: overlap_step must be in `1..=chunk_size`.
    ///
    /// A zero step never advances the traversal; a step larger than
    /// `chunk_size` would skip bytes between consecutive chunks.
    #[error(
        "Configuration error: overlap_step ({overlap_step}) must be in 1..=chunk_size ({chunk_size})"
    )]
    InvalidOverlapStep {
        /// The provided overlap_step value.
        overlap_step: usize,
        /// The configured chunk_size value.
        chunk_size: usize,
    },
}

/// Strategy for deciding whether a byte ends a grain.
///
/// The default [`DelimiterTable`] matches a fixed 12-byte delimiter set;
/// locale- or format-specific corpora can supply their own rule.
pub trait BoundaryRule {
    /// Returns true when `byte` marks a grain boundary.
    fn is_boundary(&self, byte: u8) -> bool;
}

/// Boundary rule backed by a 256-entry byte lookup table.
///
/// The default table contains space, newline, carriage return, tab and the
/// sentence punctuation set `. , ; : ! ? - _`.
#[derive(Debug, Clone)]
pub struct DelimiterTable {
    table: [bool; 256],
}

impl DelimiterTable {
    /// Build a table from an explicit delimiter byte set.
    pub fn new(delimiters: &[u8]) -> Self {
        let mut table = [false; 256];
        for &b in delimiters {
            table[b as usize] = true;
        }
        Self { table }
    }
}

impl Default for DelimiterTable {
    fn default() -> Self {
        Self::new(&GRAIN_DELIMITERS)
    }
}

impl BoundaryRule for DelimiterTable {
    #[inline]
    fn is_boundary(&self, byte: u8) -> bool {
        self.table[byte as usize]
    }
}

/// Grain-aware chunker that splits a byte buffer into boundary-snapped chunks.
///
/// # Configuration
/// - `chunk_size`: target chunk length in bytes (default: 233 KiB frame)
/// - `overlap_step`: how far the next chunk's start advances relative to the
///   previous chunk's start; a step equal to `chunk_size` disables overlap,
///   and the default derives from the golden ratio (`chunk_size / φ`)
/// - `window`: bounded lookahead/lookback for boundary searches (default 4096)
///
/// # Overlap Semantics
/// With `overlap_step < chunk_size`, consecutive chunks share a region so
/// that content near a cut appears whole in at least one chunk. With overlap
/// disabled, each chunk begins exactly where the previous one ended, so the
/// chunk ranges partition the buffer with no gaps and no overlaps.
///
/// # Example
/// ```rust
/// use grain_lattice_core::chunker::GrainChunker;
///
/// // Golden-ratio overlap derived from the chunk size
/// let chunker = GrainChunker::with_frame_size(1024).unwrap();
/// assert_eq!(chunker.overlap_step(), 632);
///
/// // Invalid: zero chunk size
/// assert!(GrainChunker::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GrainChunker<R: BoundaryRule = DelimiterTable> {
    chunk_size: usize,
    overlap_step: usize,
    window: usize,
    rule: R,
}

impl GrainChunker<DelimiterTable> {
    /// Create a chunker with the default delimiter table.
    ///
    /// # Arguments
    /// * `chunk_size` - Target chunk length in bytes
    /// * `overlap_step` - Start-to-start advance, in `1..=chunk_size`
    ///
    /// # Errors
    /// - [`ChunkerError::ZeroChunkSize`] if `chunk_size == 0`
    /// - [`ChunkerError::InvalidOverlapStep`] if `overlap_step` is zero or
    ///   exceeds `chunk_size`
    pub fn new(chunk_size: usize, overlap_step: usize) -> Result<Self, ChunkerError> {
        Self::with_rule(chunk_size, overlap_step, DelimiterTable::default())
    }

    /// Create a chunker with the golden-ratio overlap step for `chunk_size`.
    pub fn with_frame_size(chunk_size: usize) -> Result<Self, ChunkerError> {
        Self::new(chunk_size, Self::golden_step(chunk_size))
    }

    /// Create a chunker with the default frame size (233 KiB) and
    /// golden-ratio overlap.
    pub fn default_config() -> Self {
        // The defaults are valid by definition, no error possible
        Self {
            chunk_size: HORIZON_FRAME_SIZE,
            overlap_step: Self::golden_step(HORIZON_FRAME_SIZE),
            window: BOUNDARY_WINDOW,
            rule: DelimiterTable::default(),
        }
    }
}

impl<R: BoundaryRule> GrainChunker<R> {
    /// Create a chunker with a caller-supplied boundary rule.
    ///
    /// # Errors
    /// Same validation as [`GrainChunker::new`].
    pub fn with_rule(chunk_size: usize, overlap_step: usize, rule: R) -> Result<Self, ChunkerError> {
        // Fail fast: a zero chunk size never terminates
        if chunk_size == 0 {
            return Err(ChunkerError::ZeroChunkSize);
        }

        // Fail fast: the step must advance and must not skip bytes
        if overlap_step == 0 || overlap_step > chunk_size {
            return Err(ChunkerError::InvalidOverlapStep {
                overlap_step,
                chunk_size,
            });
        }

        Ok(Self {
            chunk_size,
            overlap_step,
            window: BOUNDARY_WINDOW,
            rule,
        })
    }

    /// Override the boundary search window (bytes scanned per direction).
    ///
    /// A window of zero degenerates every boundary search to a hard cut.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Derive the golden-ratio overlap step for a chunk size.
    ///
    /// `chunk_size / φ`, at least 1, capped at `chunk_size`.
    pub fn golden_step(chunk_size: usize) -> usize {
        ((chunk_size as f64 / PHI_F64) as usize)
            .max(1)
            .min(chunk_size)
    }

    /// Get the configured chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the configured overlap step in bytes.
    pub fn overlap_step(&self) -> usize {
        self.overlap_step
    }

    /// Whether consecutive chunks share a region.
    pub fn overlap_enabled(&self) -> bool {
        self.overlap_step < self.chunk_size
    }

    /// Resolve a target end offset to the nearest grain boundary.
    ///
    /// Scans forward from `target_end` up to the configured window for the
    /// first delimiter byte; a hit at offset `i` ends the chunk at `i + 1`
    /// (delimiter included). If the forward scan fails, scans backward over
    /// the same window and returns the position just after the nearest
    /// delimiter. If both fail, returns `target_end` unchanged (hard cut).
    ///
    /// The forward-then-backward order is deliberate: prefer extending a
    /// chunk slightly over shrinking it.
    pub fn find_boundary(&self, data: &[u8], target_end: usize) -> usize {
        let total = data.len();

        let forward_limit = target_end.saturating_add(self.window).min(total);
        for (i, &byte) in data.iter().enumerate().take(forward_limit).skip(target_end) {
            if self.rule.is_boundary(byte) {
                return i + 1;
            }
        }

        let backward_limit = target_end.saturating_sub(self.window);
        for i in (backward_limit..target_end.min(total)).rev() {
            if self.rule.is_boundary(data[i]) {
                return i + 1;
            }
        }

        target_end
    }

    /// Traverse `data`, invoking `callback` once per chunk with
    /// `(index, byte view, start, end)`.
    ///
    /// Starting at offset 0, each iteration resolves `start + chunk_size` to
    /// an actual end via [`find_boundary`](Self::find_boundary) (using the
    /// buffer end directly once the target reaches it), emits the chunk, then
    /// advances. With overlap enabled the start advances by `overlap_step`;
    /// with overlap disabled it advances to the previous chunk's end, which
    /// is what makes the emitted ranges an exact partition.
    ///
    /// An empty buffer yields zero invocations. The chunk index increments
    /// once per invocation regardless of overlap.
    pub fn chunk_data<F>(&self, data: &[u8], mut callback: F)
    where
        F: FnMut(usize, &[u8], usize, usize),
    {
        let total = data.len();
        let mut index = 0usize;
        let mut start = 0usize;

        while start < total {
            let target_end = start + self.chunk_size;
            let end = if target_end >= total {
                total
            } else {
                // Clamp keeps the loop invariant start < end <= total even
                // when the backward scan lands at or before the chunk start.
                self.find_boundary(data, target_end).clamp(start + 1, total)
            };

            callback(index, &data[start..end], start, end);
            index += 1;

            start = if self.overlap_enabled() {
                (start + self.overlap_step).min(total)
            } else {
                end
            };
        }

        debug!(chunks = index, total_bytes = total, "chunk traversal complete");
    }

    /// Traverse `data` and collect [`Chunk`] descriptors.
    pub fn chunk_to_vec(&self, data: &[u8]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        self.chunk_data(data, |index, _view, start, end| {
            chunks.push(Chunk { index, start, end });
        });
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition_holds(chunks: &[Chunk], total: usize) -> bool {
        if chunks.is_empty() {
            return total == 0;
        }
        if chunks[0].start != 0 || chunks.last().unwrap().end != total {
            return false;
        }
        chunks.windows(2).all(|w| w[0].end == w[1].start)
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        assert_eq!(GrainChunker::new(0, 1).unwrap_err(), ChunkerError::ZeroChunkSize);
        assert!(matches!(
            GrainChunker::new(16, 0).unwrap_err(),
            ChunkerError::InvalidOverlapStep {
                overlap_step: 0,
                chunk_size: 16
            }
        ));
        assert!(matches!(
            GrainChunker::new(16, 17).unwrap_err(),
            ChunkerError::InvalidOverlapStep { .. }
        ));
    }

    #[test]
    fn test_error_messages_contain_values() {
        let err = GrainChunker::new(16, 20).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("20"), "Error should contain overlap_step: {}", msg);
        assert!(msg.contains("16"), "Error should contain chunk_size: {}", msg);
    }

    #[test]
    fn test_empty_buffer_yields_no_chunks() {
        let chunker = GrainChunker::new(8, 8).unwrap();
        let chunks = chunker.chunk_to_vec(b"");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_buffer_single_chunk() {
        let chunker = GrainChunker::new(64, 64).unwrap();
        let data = b"short text";
        let chunks = chunker.chunk_to_vec(data);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], Chunk { index: 0, start: 0, end: data.len() });
    }

    #[test]
    fn test_concrete_scenario_ab_cd_ef_gh() {
        // 11-byte buffer, chunk_size=4, no overlap: every chunk must end at
        // a space and never split "cd" or "ef".
        let chunker = GrainChunker::new(4, 4).unwrap();
        let data = b"ab cd ef gh";
        let chunks = chunker.chunk_to_vec(data);

        println!("=== BOUNDARY SNAP EVIDENCE ===");
        for c in &chunks {
            println!(
                "Chunk[{}]: [{}, {}) = {:?}",
                c.index,
                c.start,
                c.end,
                std::str::from_utf8(&data[c.start..c.end]).unwrap()
            );
        }
        println!("=== END BOUNDARY SNAP EVIDENCE ===");

        assert!(partition_holds(&chunks, data.len()));
        // Interior boundaries land just after a delimiter
        for c in &chunks[..chunks.len() - 1] {
            assert_eq!(
                data[c.end - 1],
                b' ',
                "Chunk[{}] should end just after a space",
                c.index
            );
        }
        assert_eq!(chunks.last().unwrap().end, data.len());
    }

    #[test]
    fn test_partition_no_gaps_no_overlaps() {
        let chunker = GrainChunker::new(10, 10).unwrap();
        let data = b"the quick brown fox jumps over the lazy dog and runs on";
        let chunks = chunker.chunk_to_vec(data);

        assert!(chunks.len() > 1, "Should produce multiple chunks");
        assert!(partition_holds(&chunks, data.len()));
        for w in chunks.windows(2) {
            assert!(w[0].start < w[1].start, "Starts must strictly increase");
        }
    }

    #[test]
    fn test_boundary_never_splits_word_when_delimiter_in_window() {
        let chunker = GrainChunker::new(7, 7).unwrap();
        let data = b"alpha beta gamma delta epsilon zeta";
        let chunks = chunker.chunk_to_vec(data);

        for c in &chunks[..chunks.len() - 1] {
            let edge = data[c.end - 1];
            assert!(
                GRAIN_DELIMITERS.contains(&edge),
                "Chunk[{}] edge byte {:?} is not a delimiter",
                c.index,
                edge as char
            );
        }
    }

    #[test]
    fn test_forward_scan_preferred_over_backward() {
        // Target end lands inside "jumped"; the forward scan should extend
        // the chunk to the space after it instead of shrinking.
        let chunker = GrainChunker::new(6, 6).unwrap();
        let data = b"fox jumped over";
        let chunks = chunker.chunk_to_vec(data);
        assert_eq!(chunks[0].end, 11, "Chunk should extend to after 'jumped '");
    }

    #[test]
    fn test_backward_scan_when_no_delimiter_ahead() {
        // No delimiter within the window ahead of the target; the nearest
        // one behind is used instead.
        let chunker = GrainChunker::new(8, 8).unwrap().with_window(6);
        let data = b"ab cdefghijklmnopqrstu";
        let chunks = chunker.chunk_to_vec(data);
        assert_eq!(chunks[0].end, 3, "Backward scan should snap to after 'ab '");
    }

    #[test]
    fn test_hard_cut_when_no_delimiter_in_window() {
        let chunker = GrainChunker::new(8, 8).unwrap().with_window(2);
        let data = b"abcdefghijklmnopqrstuvwxyz";
        let chunks = chunker.chunk_to_vec(data);
        assert_eq!(chunks[0].end, 8, "Hard cut exactly at the target offset");
        assert!(partition_holds(&chunks, data.len()));
    }

    #[test]
    fn test_overlap_mode_shares_trailing_region() {
        let chunker = GrainChunker::new(8, 4).unwrap();
        let data = b"aa bb cc dd ee ff gg hh";
        let chunks = chunker.chunk_to_vec(data);

        assert!(chunks.len() > 2);
        for w in chunks.windows(2) {
            assert_eq!(w[1].start, w[0].start + 4, "Start advances by overlap_step");
            assert!(w[1].start < w[0].end, "Consecutive chunks must overlap");
        }
        // Index increments once per callback regardless of overlap
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.index, i);
        }
        assert_eq!(chunks.last().unwrap().end, data.len());
    }

    #[test]
    fn test_golden_step_derivation() {
        assert_eq!(GrainChunker::<DelimiterTable>::golden_step(1024), 632);
        assert_eq!(GrainChunker::<DelimiterTable>::golden_step(1), 1);
        let chunker = GrainChunker::default_config();
        assert_eq!(chunker.chunk_size(), HORIZON_FRAME_SIZE);
        assert!(chunker.overlap_enabled());
        assert!(chunker.overlap_step() <= chunker.chunk_size());
    }

    #[test]
    fn test_custom_boundary_rule() {
        struct PipeRule;
        impl BoundaryRule for PipeRule {
            fn is_boundary(&self, byte: u8) -> bool {
                byte == b'|'
            }
        }

        let chunker = GrainChunker::with_rule(4, 4, PipeRule).unwrap();
        let data = b"ab|cd ef|gh";
        let chunks = chunker.chunk_to_vec(data);
        // Spaces are not boundaries under this rule; pipes are.
        assert_eq!(chunks[0].end, 9, "Forward scan finds the '|' at offset 8");
    }

    #[test]
    fn test_callback_receives_view_into_buffer() {
        let chunker = GrainChunker::new(4, 4).unwrap();
        let data = b"ab cd ef gh";
        let mut seen = Vec::new();
        chunker.chunk_data(data, |index, view, start, end| {
            assert_eq!(view, &data[start..end]);
            seen.push(index);
        });
        assert_eq!(seen, (0..seen.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_delimiter_table_matches_fixed_set() {
        let table = DelimiterTable::default();
        for &d in &GRAIN_DELIMITERS {
            assert!(table.is_boundary(d));
        }
        assert!(!table.is_boundary(b'a'));
        assert!(!table.is_boundary(0));
    }
}
