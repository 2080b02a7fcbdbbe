//! Grain Lattice Core Library
//!
//! Primitives for preparing a documentation corpus for retrieval:
//!
//! - A boundary-aware chunker ([`chunker::GrainChunker`]) that splits a byte
//!   buffer into retrieval-sized segments without cutting through words.
//! - A lattice vector type ([`lattice::LatticeVector`]), an 8-dimensional
//!   position plus phase and amplitude scalars, with distance and
//!   interference operators usable as similarity signals.
//! - A phi-adic numeral encoding ([`phi::PhiAdic`]) over a Fibonacci-like
//!   positional basis, for canonical lossy quantization of scalar attributes.
//!
//! The components share no runtime state. A caller chunks a document, assigns
//! each chunk a lattice vector through an external embedding step, then ranks
//! chunks with the geometry operators.
//!
//! # Example
//!
//! ```
//! use grain_lattice_core::chunker::GrainChunker;
//!
//! let chunker = GrainChunker::new(64, 64).unwrap();
//! let chunks = chunker.chunk_to_vec(b"one sentence. another sentence.");
//! assert_eq!(chunks[0].start, 0);
//! ```

pub mod chunker;
pub mod config;
pub mod constants;
pub mod error;
pub mod lattice;
pub mod phi;

// Re-exports for convenience
pub use chunker::{Chunk, ChunkerError, GrainChunker};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use lattice::{LatticeVector, Vector4, Vector8};
pub use phi::{PhiAdic, PhiAdicError};
