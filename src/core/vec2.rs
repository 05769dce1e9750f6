//! Immutable 2D Vector
//!
//! Every operation returns a new value; nothing here takes `&mut self`.
//! Screen coordinates: x grows right, y grows down.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// 2D vector with `f64` components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Facing direction at 0 degrees ("up" on screen).
    pub const UP: Self = Self { x: 0.0, y: -1.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Componentwise sum.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Difference, defined as `self + other * -1`.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        self.add(other.scale(-1.0))
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Componentwise product with a scalar.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Quarter turn: `(y, -x)`.
    ///
    /// Used to send split rocks off along perpendicular paths.
    #[inline]
    pub fn orthogonal(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Rotate by `degrees`.
    pub fn rotate(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Unit vector the ship faces at `degrees`; 0 points up the screen,
    /// 90 points right.
    #[inline]
    pub fn unit_vec_in_direction(degrees: f64) -> Self {
        Self::UP.rotate(degrees)
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.sub(other).length()
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vec2::add(self, rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vec2::sub(self, rhs)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_vec2_zero() {
        assert_eq!(Vec2::ZERO.x, 0.0);
        assert_eq!(Vec2::ZERO.y, 0.0);
        assert_eq!(Vec2::default(), Vec2::ZERO);
    }

    #[test]
    fn test_vec2_add_sub() {
        let result = Vec2::new(1.0, 2.0) + Vec2::new(2.0, 3.0);
        assert_eq!(result, Vec2::new(3.0, 5.0));

        let result = Vec2::new(4.0, 6.0) - Vec2::new(1.0, 2.0);
        assert_eq!(result, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_vec2_length() {
        // 3-4-5 triangle
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_vec2_scale_and_orthogonal() {
        assert_eq!(Vec2::new(1.0, 2.0).scale(2.0), Vec2::new(2.0, 4.0));
        assert_eq!(Vec2::new(1.0, 2.0).orthogonal(), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_vec2_rotate() {
        assert_close(Vec2::new(1.0, 0.0).rotate(90.0), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_unit_vec_in_direction() {
        let expected = [
            (0.0, Vec2::new(0.0, -1.0)),
            (90.0, Vec2::new(1.0, 0.0)),
            (180.0, Vec2::new(0.0, 1.0)),
            (270.0, Vec2::new(-1.0, 0.0)),
        ];
        for (degrees, want) in expected {
            assert_close(Vec2::unit_vec_in_direction(degrees), want);
        }
    }

    fn component() -> impl Strategy<Value = f64> {
        -1.0e6..1.0e6f64
    }

    proptest! {
        #[test]
        fn prop_add_sub_inverse(ax in component(), ay in component(), bx in component(), by in component()) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            let back = a.add(b).sub(b);
            prop_assert!((back.x - a.x).abs() < 1e-6);
            prop_assert!((back.y - a.y).abs() < 1e-6);
        }

        #[test]
        fn prop_scale_identity(x in component(), y in component()) {
            let v = Vec2::new(x, y);
            prop_assert_eq!(v.scale(1.0), v);
        }

        #[test]
        fn prop_negation_preserves_length(x in component(), y in component()) {
            let v = Vec2::new(x, y);
            prop_assert_eq!(v.scale(-1.0).length(), v.length());
        }

        #[test]
        fn prop_rotate_zero_is_identity(x in component(), y in component()) {
            let v = Vec2::new(x, y);
            let r = v.rotate(0.0);
            prop_assert!((r.x - v.x).abs() < 1e-9);
            prop_assert!((r.y - v.y).abs() < 1e-9);
        }

        #[test]
        fn prop_orthogonal_is_perpendicular(x in component(), y in component()) {
            let v = Vec2::new(x, y);
            let o = v.orthogonal();
            prop_assert_eq!(v.x * o.x + v.y * o.y, 0.0);
        }
    }
}
