//! A single reward source.

use crate::{standard_normal, UniformSource};

/// One arm: Gaussian rewards with a fixed `mean` and `std_dev`.
///
/// Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arm {
    mean: f64,
    std_dev: f64,
}

impl Arm {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Arm with unit standard deviation.
    pub fn unit(mean: f64) -> Self {
        Self::new(mean, 1.0)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draw one reward: `mean + std_dev * z`, `z ~ N(0, 1)`.
    ///
    /// Always consumes source draws, even when `std_dev == 0`.
    pub fn sample<S: UniformSource + ?Sized>(&self, source: &mut S) -> f64 {
        self.mean + self.std_dev * standard_normal(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn unit_arm_defaults_std_dev_to_one() {
        let a = Arm::unit(2.5);
        assert_eq!(a.mean(), 2.5);
        assert_eq!(a.std_dev(), 1.0);
    }

    #[test]
    fn zero_spread_arm_is_deterministic() {
        let a = Arm::new(0.7, 0.0);
        let mut s = SequenceSource::new(vec![0.3, 0.9, 0.1]);
        for _ in 0..10 {
            assert_eq!(a.sample(&mut s), 0.7);
        }
    }

    #[test]
    fn sample_scales_and_shifts() {
        // z = -1 for this pair of draws (see gaussian tests).
        let a = Arm::new(3.0, 2.0);
        let mut s = SequenceSource::new(vec![(-0.5f64).exp(), 0.5]);
        assert!((a.sample(&mut s) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empirical_mean_tracks_configured_mean() {
        let a = Arm::new(-1.5, 3.0);
        let mut rng = StdRng::seed_from_u64(99);
        let n = 50_000;
        let mean = (0..n).map(|_| a.sample(&mut rng)).sum::<f64>() / n as f64;
        let se = 3.0 / (n as f64).sqrt();
        assert!((mean + 1.5).abs() < 4.0 * se, "mean={mean}");
    }
}
