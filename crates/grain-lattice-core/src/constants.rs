//! Shared geometric constants.
//!
//! The chunker frame size and overlap defaults derive from the golden ratio
//! and the Fibonacci sequence; the lattice space is fixed at 8 dimensions.

/// Golden ratio, φ = (1 + √5) / 2.
pub const PHI: f32 = 1.618_034;

/// Inverse golden ratio, 1/φ = φ − 1.
pub const PHI_INV: f32 = 0.618_034;

/// Golden ratio at `f64` precision, for derived configuration values.
pub const PHI_F64: f64 = 1.618_033_988_749_895;

/// Dimensionality of the lattice embedding space.
pub const LATTICE_DIM: usize = 8;

/// Default chunk frame size in bytes (233 KiB, Fibonacci-compliant).
pub const HORIZON_FRAME_SIZE: usize = 233 * 1024;

/// Bounded lookahead/lookback window for grain boundary searches, in bytes.
pub const BOUNDARY_WINDOW: usize = 4096;

/// Delimiter bytes that mark a grain boundary in document text.
pub const GRAIN_DELIMITERS: [u8; 12] = [
    b' ', b'\n', b'\r', b'\t', b'.', b',', b';', b':', b'!', b'?', b'-', b'_',
];
