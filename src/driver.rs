//! Simulation driver: many independent players, one running-average curve each.
//!
//! The driver validates configuration at the boundary, then for each player
//! runs `num_plays` rounds and records `running_average[j] = (r_1 + .. + r_{j+1}) / (j + 1)`.
//! Curves leave the driver through a [`CurveSink`] (or are collected into a
//! [`SimulationReport`]); rendering is somebody else's job.
//!
//! Each player gets its own `StdRng` seeded by [`derive_seed`] from the run's base
//! seed, so a whole run is reproducible from one `u64`.

use tracing::{debug, info};

use crate::{derive_seed, ArmPrior, EpsilonGreedyPlayer, Error, Result};

/// Upper bound on `num_plays`; one curve holds one `f64` per play.
pub const MAX_PLAYS: usize = 100_000_000;

/// Upper bound on `num_bandits`.
pub const MAX_BANDITS: usize = 1_000_000;

/// Run parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Number of independent players (each with its own bandit).
    pub num_bandits: usize,
    /// Exploration probability in `[0, 1]`.
    pub epsilon: f64,
    /// Rounds per player.
    pub num_plays: usize,
    /// Arms per bandit.
    pub num_arms: usize,
    /// Arm parameter policy.
    pub prior: ArmPrior,
    /// Base seed; `None` draws one from the thread RNG.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_bandits: 5,
            epsilon: 0.1,
            num_plays: 1_000,
            num_arms: 10,
            prior: ArmPrior::StandardNormal,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn num_bandits(mut self, n: usize) -> Self {
        self.num_bandits = n;
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn num_plays(mut self, n: usize) -> Self {
        self.num_plays = n;
        self
    }

    pub fn num_arms(mut self, n: usize) -> Self {
        self.num_arms = n;
        self
    }

    pub fn prior(mut self, prior: ArmPrior) -> Self {
        self.prior = prior;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// `InvalidConfiguration` for zero counts, counts above [`MAX_PLAYS`] /
    /// [`MAX_BANDITS`], epsilon outside `[0, 1]`, or a malformed prior.
    pub fn validate(&self) -> Result<()> {
        if self.num_bandits == 0 {
            return Err(Error::InvalidConfiguration(
                "num_bandits must be positive".to_string(),
            ));
        }
        if self.num_plays == 0 {
            return Err(Error::InvalidConfiguration(
                "num_plays must be positive".to_string(),
            ));
        }
        if self.num_plays > MAX_PLAYS {
            return Err(Error::InvalidConfiguration(format!(
                "num_plays must be at most {MAX_PLAYS}, got {}",
                self.num_plays
            )));
        }
        if self.num_bandits > MAX_BANDITS {
            return Err(Error::InvalidConfiguration(format!(
                "num_bandits must be at most {MAX_BANDITS}, got {}",
                self.num_bandits
            )));
        }
        if self.num_arms == 0 {
            return Err(Error::InvalidConfiguration(
                "num_arms must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::InvalidConfiguration(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        self.prior.validate()
    }
}

/// Running-average reward curve for one player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    /// 1-based player label.
    pub label: usize,
    /// One entry per play.
    pub running_average: Vec<f64>,
    /// How many plays chose the arm with the highest true mean.
    pub optimal_pulls: u64,
}

impl Curve {
    pub fn final_average(&self) -> Option<f64> {
        self.running_average.last().copied()
    }

    /// Share of plays that hit the best arm, in `[0, 1]`.
    pub fn optimal_share(&self) -> f64 {
        if self.running_average.is_empty() {
            0.0
        } else {
            self.optimal_pulls as f64 / self.running_average.len() as f64
        }
    }
}

/// Destination for finished curves, in player order.
pub trait CurveSink {
    fn accept(&mut self, curve: Curve);
}

impl CurveSink for Vec<Curve> {
    fn accept(&mut self, curve: Curve) {
        self.push(curve);
    }
}

impl<F: FnMut(Curve)> CurveSink for F {
    fn accept(&mut self, curve: Curve) {
        self(curve)
    }
}

/// All curves from one run plus what is needed to label and replay it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    pub num_plays: usize,
    pub seed: u64,
    pub epsilon: f64,
    pub curves: Vec<Curve>,
}

impl SimulationReport {
    /// Mean of the curves' last running averages (`0.0` with no curves).
    pub fn mean_final_average(&self) -> f64 {
        let finals: Vec<f64> = self.curves.iter().filter_map(Curve::final_average).collect();
        if finals.is_empty() {
            0.0
        } else {
            finals.iter().sum::<f64>() / finals.len() as f64
        }
    }
}

/// A validated simulation, ready to run.
#[derive(Debug, Clone)]
pub struct Simulation {
    cfg: SimulationConfig,
}

impl Simulation {
    /// # Errors
    ///
    /// Propagates [`SimulationConfig::validate`].
    pub fn new(cfg: SimulationConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.cfg
    }

    /// Run every player in order, handing each finished curve to `sink`.
    ///
    /// Returns the base seed actually used.
    pub fn run_into<K: CurveSink + ?Sized>(&self, sink: &mut K) -> Result<u64> {
        let cfg = &self.cfg;
        let base = cfg.seed.unwrap_or_else(rand::random::<u64>);
        info!(
            seed = base,
            num_bandits = cfg.num_bandits,
            num_plays = cfg.num_plays,
            epsilon = cfg.epsilon,
            "starting simulation"
        );

        for i in 0..cfg.num_bandits {
            let mut player = EpsilonGreedyPlayer::with_prior_and_seed(
                cfg.num_arms,
                cfg.epsilon,
                cfg.prior,
                derive_seed(base, i as u64),
            )?;
            let best = player.bandit().optimal_arm();

            let mut running_average = Vec::with_capacity(cfg.num_plays);
            let mut total = 0.0;
            let mut optimal_pulls = 0u64;
            for j in 0..cfg.num_plays {
                let r = player.play();
                total += r.reward;
                running_average.push(total / (j + 1) as f64);
                if r.chosen_arm == best {
                    optimal_pulls += 1;
                }
            }

            let curve = Curve {
                label: i + 1,
                running_average,
                optimal_pulls,
            };
            debug!(
                label = curve.label,
                final_average = ?curve.final_average(),
                optimal_share = curve.optimal_share(),
                "player finished"
            );
            sink.accept(curve);
        }
        Ok(base)
    }

    /// Run and collect every curve.
    pub fn run(&self) -> Result<SimulationReport> {
        let mut curves: Vec<Curve> = Vec::with_capacity(self.cfg.num_bandits);
        let seed = self.run_into(&mut curves)?;
        Ok(SimulationReport {
            num_plays: self.cfg.num_plays,
            seed,
            epsilon: self.cfg.epsilon,
            curves,
        })
    }
}
