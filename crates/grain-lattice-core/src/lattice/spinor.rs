//! The lattice vector: an 8D position with phase and amplitude.

use std::f32::consts::PI;

use super::simd;

/// A point in the 8-dimensional lattice space plus a periodic phase angle
/// and a non-negative amplitude weight.
///
/// Construction performs no validation: a zero-norm position is legal and
/// only affects [`normalize`](Self::normalize), which leaves it untouched.
/// Vectors are constructed once, compared many times, and mutated only by
/// the explicit in-place normalize.
///
/// # Example
/// ```rust
/// use grain_lattice_core::lattice::LatticeVector;
///
/// let mut v = LatticeVector::new([3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
/// v.normalize();
/// assert!((v.norm() - 1.0).abs() < 1e-6);
/// assert_eq!(v.phase, 0.0);
/// assert_eq!(v.amplitude, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeVector {
    /// Position in the 8-dimensional embedding space.
    pub pos: [f32; 8],
    /// Phase angle in radians, conceptually periodic modulo 2π.
    pub phase: f32,
    /// Information intensity; a weight or confidence, not used by distance.
    pub amplitude: f32,
}

impl LatticeVector {
    /// Construct from raw coordinates with phase 0 and amplitude 1.
    pub const fn new(pos: [f32; 8]) -> Self {
        Self {
            pos,
            phase: 0.0,
            amplitude: 1.0,
        }
    }

    /// Construct with an explicit phase and amplitude 1.
    pub const fn with_phase(pos: [f32; 8], phase: f32) -> Self {
        Self {
            pos,
            phase,
            amplitude: 1.0,
        }
    }

    /// Construct with explicit phase and amplitude.
    pub const fn with_phase_amplitude(pos: [f32; 8], phase: f32, amplitude: f32) -> Self {
        Self {
            pos,
            phase,
            amplitude,
        }
    }

    /// Euclidean norm of the position.
    #[inline]
    pub fn norm(&self) -> f32 {
        simd::norm8(&self.pos)
    }

    /// Rescale the position to unit length in place.
    ///
    /// Returns `&mut Self` to support chained calls. The zero vector is a
    /// documented no-op, not an error: scaling by the reciprocal of zero is
    /// undefined. Idempotent up to floating tolerance.
    pub fn normalize(&mut self) -> &mut Self {
        let n = self.norm();
        if n > 0.0 {
            let inv = 1.0 / n;
            for x in self.pos.iter_mut() {
                *x *= inv;
            }
        }
        self
    }

    /// Euclidean distance between the two positions, ignoring phase.
    #[inline]
    pub fn positional_distance(&self, other: &Self) -> f32 {
        simd::squared_distance8(&self.pos, &other.pos).sqrt()
    }

    /// Phase mismatch as a fraction of π, in [0, 1].
    ///
    /// The raw difference of two unbounded phases may be arbitrarily large,
    /// so it is wrapped into (−π, π] by repeated subtraction/addition of a
    /// full turn before taking the fraction. Non-finite differences yield
    /// NaN rather than spinning in the wrap loop.
    pub fn phase_distance(&self, other: &Self) -> f32 {
        let mut diff = self.phase - other.phase;
        if !diff.is_finite() {
            return f32::NAN;
        }
        while diff > PI {
            diff -= 2.0 * PI;
        }
        while diff <= -PI {
            diff += 2.0 * PI;
        }
        diff.abs() / PI
    }

    /// Combined distance: positional and phase mismatch as orthogonal axes.
    ///
    /// `sqrt(euclidean² + phase_fraction²)`. A single ranking scalar that
    /// penalizes both positional and phase mismatch, with the phase term
    /// capped at contributing 1 to the sum however large the raw difference.
    /// Callers that want their own weighting should use
    /// [`weighted_distance`](Self::weighted_distance) or combine
    /// [`positional_distance`](Self::positional_distance) and
    /// [`phase_distance`](Self::phase_distance) directly.
    pub fn distance(&self, other: &Self) -> f32 {
        let pos_sq = simd::squared_distance8(&self.pos, &other.pos);
        let phase_frac = self.phase_distance(other);
        (pos_sq + phase_frac * phase_frac).sqrt()
    }

    /// Combined distance with caller-chosen axis weights.
    ///
    /// `sqrt(pos_weight · euclidean² + phase_weight · phase_fraction²)`;
    /// `weighted_distance(other, 1.0, 1.0)` equals [`distance`](Self::distance).
    pub fn weighted_distance(&self, other: &Self, pos_weight: f32, phase_weight: f32) -> f32 {
        let pos_sq = simd::squared_distance8(&self.pos, &other.pos);
        let phase_frac = self.phase_distance(other);
        (pos_weight * pos_sq + phase_weight * phase_frac * phase_frac).sqrt()
    }

    /// Interference factor: cosine of the raw phase difference, in [−1, 1].
    ///
    /// 1 is perfectly in-phase (constructive), −1 perfectly out-of-phase
    /// (destructive), 0 orthogonal. Intentionally independent of position
    /// and amplitude: a pure phase-alignment signal for the caller to
    /// combine with positional distance as needed.
    #[inline]
    pub fn interference(&self, other: &Self) -> f32 {
        (self.phase - other.phase).cos()
    }
}

impl Default for LatticeVector {
    fn default() -> Self {
        Self::new([0.0; 8])
    }
}
