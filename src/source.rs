//! Uniform randomness, injected explicitly.
//!
//! Every stochastic step in this crate (Box-Muller draws, arm parameter
//! generation, exploration coin flips) pulls from a [`UniformSource`] handed in
//! by the caller rather than from a global generator. Any `rand` RNG qualifies;
//! tests can substitute a [`SequenceSource`] to script the exact draw sequence.

use rand::{Rng, RngCore};

/// A source of uniform deviates in `[0, 1)`.
pub trait UniformSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`.
    ///
    /// Degenerate ranges (`lo == hi`) return `lo`.
    fn uniform_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

impl<R: RngCore + ?Sized> UniformSource for R {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Deterministic source that replays a fixed list of uniforms, cycling forever.
///
/// Values outside `[0, 1)` are clamped into range so the trait contract holds.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values
            .into()
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, ONE_MINUS_ULP) } else { 0.0 })
            .collect();
        assert!(!values.is_empty(), "SequenceSource needs at least one value");
        Self { values, pos: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

const ONE_MINUS_ULP: f64 = 1.0 - f64::EPSILON / 2.0;

impl UniformSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

/// Derive an independent seed for stream `stream` of a run seeded with `base`.
///
/// SplitMix64 finalizer over `base ^ golden * (stream + 1)`; stable across
/// platforms, not cryptographic.
#[must_use]
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    splitmix64(base ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
