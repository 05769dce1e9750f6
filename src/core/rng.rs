//! Deterministic Random Number Generator
//!
//! A stateless linear congruential hash (GCC constants). Callers thread the
//! returned hash back in as the next seed; nothing here holds state except
//! the convenience [`RngStream`] iterator, which owns its own copy.
//!
//! Arithmetic is exact integer math in `u64`, so the sequence is identical on
//! every platform.

use serde::{Deserialize, Serialize};

/// Modulus, 2^31.
pub const M: u64 = 0x8000_0000;

/// Multiplier.
pub const A: u64 = 1_103_515_245;

/// Increment.
pub const C: u64 = 12_345;

/// Next hash in the sequence: `(A * seed + C) mod M`.
///
/// # Example
///
/// ```
/// use asteroids::core::rng::hash;
///
/// assert_eq!(hash(0), 12345);
/// assert_eq!(hash(hash(0)), hash(12345));
/// ```
#[inline]
pub const fn hash(seed: u32) -> u32 {
    ((A * seed as u64 + C) % M) as u32
}

/// Map a hash in `[0, M-1]` onto `[-1, 1]`.
#[inline]
pub fn scale(hash: u32) -> f64 {
    2.0 * hash as f64 / (M - 1) as f64 - 1.0
}

/// Repeatable stream of values in `[-1, 1]`.
///
/// Yields `scale(h)` for the current hash `h`, then advances `h = hash(h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngStream {
    current: u32,
}

impl RngStream {
    /// Start a stream at `seed` (reduced into `[0, M)`).
    pub const fn new(seed: u32) -> Self {
        Self {
            current: (seed as u64 % M) as u32,
        }
    }

    /// Hash that will be scaled by the next call to `next`.
    ///
    /// Store this to resume the stream later.
    pub const fn seed(&self) -> u32 {
        self.current
    }

    /// Next value in `[-1, 1]`.
    #[inline]
    pub fn next_value(&mut self) -> f64 {
        let value = scale(self.current);
        self.current = hash(self.current);
        value
    }
}

impl Iterator for RngStream {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        Some(self.next_value())
    }
}

// =============================================================================
// TESTS
// =============================================================================
