//! A fixed set of arms with hidden, randomly drawn parameters.
//!
//! Two parameter-generation policies exist ([`ArmPrior`]); they are alternatives,
//! never mixed within one bandit:
//! - `StandardNormal` (default): `mean ~ N(0, 1)`, `std_dev = 1`.
//! - `Uniform`: `mean ~ U[mean_low, mean_high)`, `std_dev ~ U[std_dev_low, std_dev_high)`
//!   (heteroscedastic arms).
//!
//! Callers learn about arms only through [`Bandit::pull_arm`]; true means are not
//! part of the selection interface.

use std::fmt;

use tracing::trace;

use crate::{standard_normal, Arm, Error, Result, UniformSource};

/// How latent arm parameters are drawn when a [`Bandit`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ArmPrior {
    /// Means from a standard normal, unit reward spread.
    #[default]
    StandardNormal,
    /// Means and spreads drawn uniformly from bounded ranges.
    Uniform {
        mean_low: f64,
        mean_high: f64,
        std_dev_low: f64,
        std_dev_high: f64,
    },
}

impl ArmPrior {
    /// `Uniform` with means in `[0, 10)` and spreads in `[0, 5)`.
    pub fn uniform() -> Self {
        Self::Uniform {
            mean_low: 0.0,
            mean_high: 10.0,
            std_dev_low: 0.0,
            std_dev_high: 5.0,
        }
    }

    /// Check that bounds are finite, ordered, and spreads non-negative.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::StandardNormal => Ok(()),
            Self::Uniform {
                mean_low,
                mean_high,
                std_dev_low,
                std_dev_high,
            } => {
                let all_finite = [mean_low, mean_high, std_dev_low, std_dev_high]
                    .iter()
                    .all(|x| x.is_finite());
                if !all_finite {
                    return Err(Error::InvalidConfiguration(
                        "uniform prior bounds must be finite".to_string(),
                    ));
                }
                if !(mean_high - mean_low).is_finite() || !(std_dev_high - std_dev_low).is_finite() {
                    return Err(Error::InvalidConfiguration(
                        "uniform prior range width must be finite".to_string(),
                    ));
                }
                if mean_low > mean_high {
                    return Err(Error::InvalidConfiguration(format!(
                        "uniform prior mean range is empty: [{mean_low}, {mean_high})"
                    )));
                }
                if std_dev_low < 0.0 || std_dev_low > std_dev_high {
                    return Err(Error::InvalidConfiguration(format!(
                        "uniform prior std dev range invalid: [{std_dev_low}, {std_dev_high})"
                    )));
                }
                Ok(())
            }
        }
    }

    fn draw<S: UniformSource + ?Sized>(&self, source: &mut S) -> Arm {
        match *self {
            Self::StandardNormal => Arm::unit(standard_normal(source)),
            Self::Uniform {
                mean_low,
                mean_high,
                std_dev_low,
                std_dev_high,
            } => {
                let mean = source.uniform_in(mean_low, mean_high);
                let std_dev = source.uniform_in(std_dev_low, std_dev_high);
                Arm::new(mean, std_dev)
            }
        }
    }
}

/// A fixed-size collection of arms, structurally immutable after construction.
///
/// Arm parameters stay private; rewards from [`Bandit::pull_arm`] are the only
/// information a caller gets.
///
/// ```compile_fail
/// use banditsim::{ArmPrior, Bandit};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let b = Bandit::new(3, ArmPrior::StandardNormal, &mut rng).unwrap();
/// let _ = b.arms()[0].mean();
/// ```
#[derive(Clone, PartialEq)]
pub struct Bandit {
    arms: Vec<Arm>,
}

impl fmt::Debug for Bandit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bandit")
            .field("num_arms", &self.arms.len())
            .finish_non_exhaustive()
    }
}

impl Bandit {
    /// Build `num_arms` arms with parameters drawn independently from `prior`.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `num_arms == 0` or the prior is malformed.
    pub fn new<S: UniformSource + ?Sized>(
        num_arms: usize,
        prior: ArmPrior,
        source: &mut S,
    ) -> Result<Self> {
        if num_arms == 0 {
            return Err(Error::InvalidConfiguration(
                "a bandit needs at least one arm".to_string(),
            ));
        }
        prior.validate()?;
        let arms = (0..num_arms).map(|_| prior.draw(source)).collect();
        Ok(Self { arms })
    }

    /// Build a bandit from explicit arms (fixtures, replays).
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `arms` is empty.
    pub fn from_arms(arms: Vec<Arm>) -> Result<Self> {
        if arms.is_empty() {
            return Err(Error::InvalidConfiguration(
                "a bandit needs at least one arm".to_string(),
            ));
        }
        Ok(Self { arms })
    }

    pub fn num_arms(&self) -> usize {
        self.arms.len()
    }

    /// Draw a reward from arm `index`.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if `index >= num_arms()`.
    pub fn pull_arm<S: UniformSource + ?Sized>(&self, index: usize, source: &mut S) -> Result<f64> {
        let arm = self.arms.get(index).ok_or(Error::InvalidIndex {
            index,
            num_arms: self.arms.len(),
        })?;
        let reward = arm.sample(source);
        trace!(index, reward, "pull_arm");
        Ok(reward)
    }

    /// Index of the arm with the highest true mean (lowest index on ties).
    ///
    /// Used by the driver to score a run after the fact; never exposed.
    pub(crate) fn optimal_arm(&self) -> usize {
        let mut best = 0;
        for (i, a) in self.arms.iter().enumerate().skip(1) {
            if a.mean() > self.arms[best].mean() {
                best = i;
            }
        }
        best
    }

    pub(crate) fn arms(&self) -> &[Arm] {
        &self.arms
    }
}
