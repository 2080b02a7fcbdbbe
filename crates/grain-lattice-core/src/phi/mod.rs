//! Phi-adic numerals: base-φ positional encoding with the Zeckendorf
//! invariant.
//!
//! A [`PhiAdic`] represents a signed real value as two 0/1 digit sequences:
//! the integer part over ascending terms of a Fibonacci-like sequence
//! initialized to {1, 2}, the fractional part over descending negative
//! powers of the golden ratio. After [`normalize`](PhiAdic::normalize) the
//! integer digits satisfy the Zeckendorf property: no two adjacent 1s and no
//! digit above 1, making the representation canonical.
//!
//! The encoding is a lossy quantization whose error is bounded by the
//! caller-supplied fractional precision (1/φ^P for P digits), used for
//! compact canonical storage of scalar attributes of retrieval units.

use thiserror::Error;

use crate::constants::PHI;

/// Tolerance absorbing floating-point error in fractional digit tests.
const FRAC_EPSILON: f32 = 1e-7;

/// Remaining fractional magnitude below which encoding terminates early.
const FRAC_NEGLIGIBLE: f32 = 1e-7;

/// Errors from phi-adic operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhiAdicError {
    /// Normalization failed to reach a fixed point within its pass budget.
    ///
    /// The reduction loop is bounded by a budget derived from the digit
    /// sequence length; exceeding it is surfaced instead of looping forever.
    #[error("Zeckendorf normalization did not converge within {passes} passes")]
    NormalizationDiverged {
        /// Number of passes executed before giving up.
        passes: usize,
    },
}

/// A signed value over the phi-adic positional basis.
///
/// Digit sequences are public: arithmetic layers may increment raw digits
/// freely and then call [`normalize`](Self::normalize) to restore the
/// canonical Zeckendorf form.
///
/// # Example
/// ```rust
/// use grain_lattice_core::phi::PhiAdic;
///
/// // 4 = 1 + 3: digits at the positions for terms 1 and 3, never {1, 2, 1}
/// let n = PhiAdic::encode(4.0, 8);
/// assert_eq!(n.digits, vec![1, 0, 1]);
/// assert!((n.to_f32() - 4.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhiAdic {
    /// Integer-part digits, ascending: position `i` weighs the i-th term of
    /// the Fibonacci-like sequence 1, 2, 3, 5, 8, ...
    pub digits: Vec<u8>,
    /// Fractional-part digits, descending: position `i` weighs φ^-(i+1).
    pub fractional_digits: Vec<u8>,
    /// Sign flag; only the magnitude is encoded in the digits.
    pub negative: bool,
}

impl PhiAdic {
    /// Encode a value with the default floating tolerance.
    ///
    /// `max_precision` bounds the number of fractional digits; the error of
    /// a round trip through [`to_f32`](Self::to_f32) is bounded by
    /// 1/φ^`max_precision` plus floating noise.
    pub fn encode(value: f32, max_precision: usize) -> Self {
        Self::encode_with_tolerance(value, max_precision, FRAC_EPSILON)
    }

    /// Encode a value with a caller-supplied tolerance for fractional digit
    /// threshold tests.
    ///
    /// The sign is captured separately; the integer part is decomposed by
    /// the greedy Zeckendorf rule (largest Fibonacci-like term first), the
    /// fractional part by iterative thresholding against descending powers
    /// of φ, stopping early once the remainder is negligible.
    pub fn encode_with_tolerance(value: f32, max_precision: usize, tolerance: f32) -> Self {
        let mut res = Self {
            negative: value < 0.0,
            ..Self::default()
        };
        let magnitude = value.abs();

        let mut int_part = magnitude.trunc() as u64;
        let mut frac_part = magnitude.fract();

        // Integer part: greedy Fibonacci selection
        if int_part > 0 {
            let mut terms: Vec<u64> = vec![1, 2];
            while *terms.last().unwrap() < int_part {
                let next = terms[terms.len() - 1] + terms[terms.len() - 2];
                terms.push(next);
            }
            res.digits = vec![0; terms.len()];
            for (i, &term) in terms.iter().enumerate().rev() {
                if term <= int_part {
                    res.digits[i] = 1;
                    int_part -= term;
                }
            }
            // The term list may overshoot by one position; keep the
            // representation canonical from the start.
            while res.digits.len() > 1 && *res.digits.last().unwrap() == 0 {
                res.digits.pop();
            }
        } else {
            res.digits = vec![0];
        }

        // Fractional part: descending powers of phi
        let mut power = 1.0 / PHI;
        for _ in 0..max_precision {
            if frac_part < FRAC_NEGLIGIBLE {
                break;
            }
            if frac_part >= power - tolerance {
                res.fractional_digits.push(1);
                frac_part -= power;
            } else {
                res.fractional_digits.push(0);
            }
            power /= PHI;
        }

        res
    }

    /// Decode back to a floating approximation.
    ///
    /// Sums the Fibonacci-like term for each set integer digit and the
    /// negative φ power for each set fractional digit, negated when the
    /// sign flag is set.
    pub fn to_f32(&self) -> f32 {
        let mut terms: Vec<f32> = vec![1.0, 2.0];
        while terms.len() < self.digits.len() {
            let next = terms[terms.len() - 1] + terms[terms.len() - 2];
            terms.push(next);
        }

        let mut value = 0.0f32;
        for (i, &d) in self.digits.iter().enumerate() {
            if d != 0 {
                value += terms[i];
            }
        }

        let mut power = 1.0 / PHI;
        for &d in &self.fractional_digits {
            if d != 0 {
                value += power;
            }
            power /= PHI;
        }

        if self.negative {
            -value
        } else {
            value
        }
    }

    /// Restore the canonical Zeckendorf form after raw digit increments.
    ///
    /// Fixed-point loop over two reductions until neither fires:
    /// - adjacent 1s collapse upward (`F(n) + F(n+1) = F(n+2)`)
    /// - digits above 1 shed 2, carrying one two positions up with a
    ///   compensating increment one position down
    ///
    /// The sequence may grow during carry propagation; trailing zeros are
    /// trimmed at the end, always retaining at least one digit position.
    ///
    /// # Errors
    /// [`PhiAdicError::NormalizationDiverged`] if the loop exceeds a pass
    /// budget derived from the digit count, surfacing a caller-visible
    /// error rather than hanging on pathological input.
    pub fn normalize(&mut self) -> Result<(), PhiAdicError> {
        let mut passes = 0usize;
        let mut changed = true;

        while changed {
            // Budget recomputed against the current length: carries may
            // legitimately grow the sequence a few positions.
            let budget = 16 * (self.digits.len() + 4);
            if passes >= budget {
                return Err(PhiAdicError::NormalizationDiverged { passes });
            }
            passes += 1;
            changed = false;

            // Collapse adjacent 1s upward
            let mut i = 0;
            while i + 1 < self.digits.len() {
                if self.digits[i] == 1 && self.digits[i + 1] == 1 {
                    self.digits[i] = 0;
                    self.digits[i + 1] = 0;
                    if i + 2 >= self.digits.len() {
                        self.digits.push(0);
                    }
                    self.digits[i + 2] += 1;
                    changed = true;
                }
                i += 1;
            }

            // Reduce digits above 1
            let mut i = 0;
            while i < self.digits.len() {
                while self.digits[i] > 1 {
                    self.digits[i] -= 2;
                    while self.digits.len() <= i + 2 {
                        self.digits.push(0);
                    }
                    self.digits[i + 2] += 1;
                    if i > 0 {
                        self.digits[i - 1] += 1;
                    }
                    changed = true;
                }
                i += 1;
            }
        }

        while self.digits.len() > 1 && *self.digits.last().unwrap() == 0 {
            self.digits.pop();
        }

        Ok(())
    }

    /// Whether the integer digits satisfy the Zeckendorf property:
    /// no digit above 1 and no two adjacent 1s.
    pub fn is_zeckendorf(&self) -> bool {
        self.digits.iter().all(|&d| d <= 1)
            && self.digits.windows(2).all(|w| !(w[0] == 1 && w[1] == 1))
    }
}
