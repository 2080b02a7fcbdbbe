//! Error types for grain-lattice-core.
//!
//! This module defines the central error type [`CoreError`] used at the
//! crate surface, along with the [`CoreResult<T>`] type alias. Component
//! errors ([`ChunkerError`], [`PhiAdicError`]) convert into it with `?`.
//!
//! # Examples
//!
//! ```rust
//! use grain_lattice_core::{CoreError, CoreResult};
//! use grain_lattice_core::chunker::GrainChunker;
//!
//! fn build(chunk_size: usize) -> CoreResult<GrainChunker> {
//!     Ok(GrainChunker::with_frame_size(chunk_size)?)
//! }
//!
//! assert!(build(0).is_err());
//! ```

use thiserror::Error;

use crate::chunker::ChunkerError;
use crate::phi::PhiAdicError;

/// Top-level error type for grain-lattice-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Chunker configuration was rejected.
    #[error(transparent)]
    Chunker(#[from] ChunkerError),

    /// Phi-adic normalization failed.
    #[error(transparent)]
    PhiAdic(#[from] PhiAdicError),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

/// Result alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
