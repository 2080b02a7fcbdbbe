//! Lattice vector geometry.
//!
//! Represents a retrieval unit as a point on a fixed 8-dimensional
//! sphere-like manifold with two extra scalars: a periodic `phase` and a
//! non-negative `amplitude`. The comparison operators here are similarity
//! signals for a caller-side ranking layer:
//!
//! - [`LatticeVector::distance`] - combined positional + phase metric
//! - [`LatticeVector::interference`] - pure phase-alignment score in [-1, 1]
//!
//! Plain fixed-arity vectors ([`Vector8`], [`Vector4`]) carry componentwise
//! addition and dot product and nothing else.
//!
//! None of these operations return errors: degenerate inputs (zero vectors,
//! NaN coordinates) follow documented no-ops or IEEE-754 propagation.

mod simd;
mod spinor;
mod vector;

pub use simd::{norm8, squared_distance8};
pub use spinor::LatticeVector;
pub use vector::{Vector4, Vector8};
