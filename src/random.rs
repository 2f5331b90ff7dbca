//! Injectable random source for hue randomization.
//!
//! Random hues are drawn in two places: the starting hue when none is
//! configured, and every step whose size is non-finite. Both go through
//! [`RandomSource`] so tests can pin the stream with a fixed seed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A stream of uniformly distributed random bits.
pub trait RandomSource {
    /// Next 64 random bits.
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        // 53 high bits fill the f64 mantissa exactly.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// xorshift64 generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Create a generator from a seed. Any seed is accepted, zero included.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // xorshift has a fixed point at 0; mix the seed so it is never hit.
        let state = seed ^ 0x9E37_79B9_7F4A_7C15;
        Self {
            state: if state == 0 { 0x2545_F491_4F6C_DD1D } else { state },
        }
    }

    /// Create a generator seeded from the clock and a process-wide counter.
    #[must_use]
    pub fn from_entropy() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        let bump = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new(nanos ^ bump.wrapping_mul(0xBF58_476D_1CE4_E5B9))
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
