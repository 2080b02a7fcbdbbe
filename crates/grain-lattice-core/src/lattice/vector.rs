//! Plain fixed-arity vector types.

use std::ops::Add;

/// An 8-component vector with componentwise addition and dot product.
///
/// No invariants beyond fixed arity; this is the raw coordinate carrier an
/// external embedding process produces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector8 {
    /// Raw components.
    pub data: [f32; 8],
}

impl Vector8 {
    /// Construct from raw components.
    pub const fn new(data: [f32; 8]) -> Self {
        Self { data }
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f32 {
        super::norm8(&self.data)
    }

    /// Dot product, accumulated with fused multiply-add.
    pub fn dot(&self, other: &Self) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(0.0f32, |acc, (a, b)| a.mul_add(*b, acc))
    }
}

impl Add for Vector8 {
    type Output = Vector8;

    fn add(self, other: Vector8) -> Vector8 {
        let mut data = [0.0f32; 8];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = self.data[i] + other.data[i];
        }
        Vector8 { data }
    }
}

/// A 4-component vector for lower-dimensional projections.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    /// Raw components.
    pub coords: [f32; 4],
}

impl Vector4 {
    /// Construct from individual coordinates.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            coords: [x, y, z, w],
        }
    }

    /// Componentwise addition.
    pub fn add(&self, other: &Self) -> Self {
        let mut coords = [0.0f32; 4];
        for (i, slot) in coords.iter_mut().enumerate() {
            *slot = self.coords[i] + other.coords[i];
        }
        Self { coords }
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| a * b)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector8_norm() {
        let v = Vector8::new([3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((v.norm() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector8_add() {
        let a = Vector8::new([1.0; 8]);
        let b = Vector8::new([2.0; 8]);
        let c = a + b;
        assert_eq!(c.data, [3.0; 8]);
    }

    #[test]
    fn test_vector8_dot() {
        let a = Vector8::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let b = Vector8::new([8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        // 8 + 14 + 18 + 20 + 20 + 18 + 14 + 8 = 120
        assert!((a.dot(&b) - 120.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector4_ops() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a.add(&b).coords, [5.0; 4]);
        assert!((a.dot(&b) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Vector8::default().data, [0.0; 8]);
        assert_eq!(Vector4::default().coords, [0.0; 4]);
    }
}
