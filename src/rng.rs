//! Deterministic PRNG shared by the scheduler and every game in a universe.
//!
//! This is xorshift128+ with the same state update and float extraction as
//! V8's `Math.random`. Persisted universes depend on the exact bit recipe:
//! changing any shift or the mantissa extraction desynchronizes every saved
//! simulation.

// Float extraction and index scaling use intentional casts
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

/// Exponent bits for a double in [1, 2).
const ONE_EXPONENT: u64 = 0x3FF0_0000_0000_0000;

/// Seeded xorshift128+ generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rng {
    state0: u64,
    state1: u64,
}

impl Rng {
    /// Create a generator from two raw state words.
    ///
    /// The words are used as-is; two zero words produce a stream of zeros.
    #[must_use]
    pub const fn new(seed0: u64, seed1: u64) -> Self {
        Self {
            state0: seed0,
            state1: seed1,
        }
    }

    /// Current state words, in the order they were seeded.
    #[must_use]
    pub const fn state(&self) -> (u64, u64) {
        (self.state0, self.state1)
    }

    /// Advance the state and return a double in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        let (state0, state1) = xorshift128plus(self.state0, self.state1);
        self.state0 = state0;
        self.state1 = state1;
        state_to_double(self.state0)
    }

    /// Bernoulli trial: consumes one draw and returns true with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in [0, n), computed as `floor(next * n)`.
    ///
    /// Always consumes exactly one draw, even when `n` is zero or one.
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64).floor() as usize
    }
}

fn xorshift128plus(state0: u64, state1: u64) -> (u64, u64) {
    let mut s1 = state0;
    let s0 = state1;
    s1 ^= s1 << 23;
    s1 ^= s1 >> 17;
    s1 ^= s0;
    s1 ^= s0 >> 26;
    (state1, s1)
}

fn state_to_double(word: u64) -> f64 {
    f64::from_bits((word >> 12) | ONE_EXPONENT) - 1.0
}
