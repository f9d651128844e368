//! Epsilon-greedy player: sample-mean value estimates over one owned bandit.
//!
//! Each [`EpsilonGreedyPlayer::play`]:
//! 1. draws `r ~ U[0, 1)`; if `r < epsilon` picks an arm uniformly at random,
//!    otherwise the arm with the highest q-value (lowest index on ties);
//! 2. pulls that arm;
//! 3. folds the reward into `counts`, `total_rewards`, `q_values`.
//!
//! Unpulled arms are valued at `0.0`.
//!
//! Like the other seeded types in this crate, default construction uses a fixed
//! seed, so `EpsilonGreedyPlayer::new` is reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::{ArmPrior, Bandit, Error, Result, UniformSource};

/// Outcome of a single round. Not retained by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayResult {
    pub chosen_arm: usize,
    pub reward: f64,
}

/// Per-arm running statistics.
///
/// Invariant: `q_values[i] == total_rewards[i] / counts[i]` when `counts[i] > 0`,
/// and `q_values[i] == 0.0` otherwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimates {
    total_rewards: Vec<f64>,
    counts: Vec<u64>,
    q_values: Vec<f64>,
}

impl Estimates {
    /// All-zero statistics for `num_arms` arms.
    pub fn new(num_arms: usize) -> Self {
        Self {
            total_rewards: vec![0.0; num_arms],
            counts: vec![0; num_arms],
            q_values: vec![0.0; num_arms],
        }
    }

    /// Rebuild statistics from per-arm reward totals and pull counts.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the two slices differ in length, or an arm has
    /// a non-zero total with zero pulls.
    pub fn from_totals(total_rewards: Vec<f64>, counts: Vec<u64>) -> Result<Self> {
        if total_rewards.len() != counts.len() {
            return Err(Error::InvalidConfiguration(format!(
                "estimates length mismatch: {} totals vs {} counts",
                total_rewards.len(),
                counts.len()
            )));
        }
        if let Some(i) = (0..counts.len()).find(|&i| counts[i] == 0 && total_rewards[i] != 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "arm {i} has reward total {} but no pulls",
                total_rewards[i]
            )));
        }
        let q_values = total_rewards
            .iter()
            .zip(&counts)
            .map(|(&t, &n)| if n == 0 { 0.0 } else { t / n as f64 })
            .collect();
        Ok(Self {
            total_rewards,
            counts,
            q_values,
        })
    }

    pub fn num_arms(&self) -> usize {
        self.counts.len()
    }

    pub fn total_rewards(&self) -> &[f64] {
        &self.total_rewards
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn q_values(&self) -> &[f64] {
        &self.q_values
    }

    /// Index of the highest q-value; the first maximum wins ties.
    ///
    /// Returns `0` for zero arms.
    pub fn greedy_arm(&self) -> usize {
        let mut best = 0;
        let mut best_q = f64::NEG_INFINITY;
        for (i, &q) in self.q_values.iter().enumerate() {
            if q > best_q {
                best = i;
                best_q = q;
            }
        }
        best
    }

    fn record(&mut self, arm: usize, reward: f64) {
        self.counts[arm] += 1;
        self.total_rewards[arm] += reward;
        self.q_values[arm] = self.total_rewards[arm] / self.counts[arm] as f64;
    }
}

/// Epsilon-greedy player owning one bandit and its random source.
#[derive(Debug, Clone)]
pub struct EpsilonGreedyPlayer<S = StdRng> {
    epsilon: f64,
    bandit: Bandit,
    estimates: Estimates,
    source: S,
    plays: u64,
}

impl EpsilonGreedyPlayer<StdRng> {
    /// Player over a fresh standard-normal bandit, seeded with `0`.
    ///
    /// `epsilon` must lie in `[0, 1]`; this is not checked at runtime.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `num_arms == 0`.
    pub fn new(num_arms: usize, epsilon: f64) -> Result<Self> {
        Self::with_seed(num_arms, epsilon, 0)
    }

    /// Like [`EpsilonGreedyPlayer::new`] with an explicit seed.
    pub fn with_seed(num_arms: usize, epsilon: f64, seed: u64) -> Result<Self> {
        Self::with_prior_and_seed(num_arms, epsilon, ArmPrior::default(), seed)
    }

    /// Seeded player whose bandit draws arm parameters from `prior`.
    pub fn with_prior_and_seed(
        num_arms: usize,
        epsilon: f64,
        prior: ArmPrior,
        seed: u64,
    ) -> Result<Self> {
        Self::with_source(num_arms, epsilon, prior, StdRng::seed_from_u64(seed))
    }
}

impl<S: UniformSource> EpsilonGreedyPlayer<S> {
    /// Build the bandit from `source`, then keep `source` for play.
    pub fn with_source(num_arms: usize, epsilon: f64, prior: ArmPrior, mut source: S) -> Result<Self> {
        let bandit = Bandit::new(num_arms, prior, &mut source)?;
        debug!(num_arms, epsilon, ?prior, "created epsilon-greedy player");
        Self::from_parts(bandit, epsilon, Estimates::new(num_arms), source)
    }

    /// Assemble a player from an existing bandit and prior statistics.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `estimates` does not cover exactly the bandit's arms.
    pub fn from_parts(bandit: Bandit, epsilon: f64, estimates: Estimates, source: S) -> Result<Self> {
        debug_assert!(
            (0.0..=1.0).contains(&epsilon),
            "epsilon must be in [0, 1], got {epsilon}"
        );
        if estimates.num_arms() != bandit.num_arms() {
            return Err(Error::InvalidConfiguration(format!(
                "estimates cover {} arms but the bandit has {}",
                estimates.num_arms(),
                bandit.num_arms()
            )));
        }
        Ok(Self {
            epsilon,
            bandit,
            estimates,
            source,
            plays: 0,
        })
    }

    /// Play one round.
    pub fn play(&mut self) -> PlayResult {
        let chosen_arm = self.select_arm();
        let reward = self
            .bandit
            .pull_arm(chosen_arm, &mut self.source)
            .expect("selection only yields indices below num_arms");
        self.estimates.record(chosen_arm, reward);
        self.plays += 1;
        trace!(play = self.plays, chosen_arm, reward, "play");
        PlayResult { chosen_arm, reward }
    }

    /// Play `n` rounds in order, returning every result.
    pub fn play_for(&mut self, n: usize) -> Vec<PlayResult> {
        (0..n).map(|_| self.play()).collect()
    }

    fn select_arm(&mut self) -> usize {
        let n = self.bandit.num_arms();
        if self.source.next_f64() < self.epsilon {
            let idx = (self.source.next_f64() * n as f64) as usize;
            idx.min(n - 1)
        } else {
            self.estimates.greedy_arm()
        }
    }

    /// Arm the exploit branch would choose right now.
    pub fn greedy_arm(&self) -> usize {
        self.estimates.greedy_arm()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn num_arms(&self) -> usize {
        self.bandit.num_arms()
    }

    pub fn estimates(&self) -> &Estimates {
        &self.estimates
    }

    pub fn counts(&self) -> &[u64] {
        self.estimates.counts()
    }

    pub fn total_rewards(&self) -> &[f64] {
        self.estimates.total_rewards()
    }

    pub fn q_values(&self) -> &[f64] {
        self.estimates.q_values()
    }

    /// Number of rounds played since construction.
    pub fn plays(&self) -> u64 {
        self.plays
    }

    pub(crate) fn bandit(&self) -> &Bandit {
        &self.bandit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arm, SequenceSource};

    fn fixed_bandit(means: &[f64]) -> Bandit {
        Bandit::from_arms(means.iter().map(|&m| Arm::new(m, 0.0)).collect()).unwrap()
    }

    #[test]
    fn greedy_ties_break_to_lowest_index() {
        let est = Estimates::from_totals(vec![0.5, 0.5, 0.2], vec![1, 1, 1]).unwrap();
        assert_eq!(est.q_values(), &[0.5, 0.5, 0.2]);
        let mut p = EpsilonGreedyPlayer::from_parts(
            fixed_bandit(&[1.0, 2.0, 3.0]),
            0.0,
            est,
            SequenceSource::new(vec![0.5]),
        )
        .unwrap();
        let r = p.play();
        assert_eq!(r.chosen_arm, 0);
        assert_eq!(r.reward, 1.0);
        assert_eq!(p.q_values(), &[0.75, 0.5, 0.2]);
    }

    #[test]
    fn zero_epsilon_always_exploits() {
        // Arm 0 pays -1 so it drops below the untouched arms after one pull.
        let mut p = EpsilonGreedyPlayer::from_parts(
            fixed_bandit(&[-1.0, 2.0, 3.0]),
            0.0,
            Estimates::new(3),
            SequenceSource::new(vec![0.01, 0.6, 0.3]),
        )
        .unwrap();
        let arms: Vec<usize> = p.play_for(4).iter().map(|r| r.chosen_arm).collect();
        assert_eq!(arms, vec![0, 1, 1, 1]);
    }

    #[test]
    fn full_epsilon_explores_by_uniform_index() {
        let mut p = EpsilonGreedyPlayer::from_parts(
            fixed_bandit(&[0.0, 0.0, 0.0]),
            1.0,
            Estimates::new(3),
            SequenceSource::new(vec![0.3, 0.7]),
        )
        .unwrap();
        assert_eq!(p.play().chosen_arm, 2);
    }

    #[test]
    fn unpulled_arms_stay_at_zero() {
        let mut p = EpsilonGreedyPlayer::new(5, 0.0).unwrap();
        p.play();
        let pulled = p.play_for(0).len();
        assert_eq!(pulled, 0);
        for i in 0..5 {
            if p.counts()[i] == 0 {
                assert_eq!(p.q_values()[i], 0.0);
                assert_eq!(p.total_rewards()[i], 0.0);
            }
        }
        assert_eq!(p.plays(), 1);
    }

    #[test]
    fn play_for_matches_repeated_play() {
        let mut a = EpsilonGreedyPlayer::with_seed(10, 0.1, 77).unwrap();
        let mut b = EpsilonGreedyPlayer::with_seed(10, 0.1, 77).unwrap();
        let singles: Vec<PlayResult> = (0..500).map(|_| a.play()).collect();
        let batch = b.play_for(500);
        assert_eq!(singles, batch);
        assert_eq!(a.estimates(), b.estimates());
    }

    #[test]
    fn mismatched_estimates_are_rejected() {
        let err = EpsilonGreedyPlayer::from_parts(
            fixed_bandit(&[0.0, 1.0]),
            0.1,
            Estimates::new(3),
            SequenceSource::new(vec![0.5]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(Estimates::from_totals(vec![1.0], vec![0]).is_err());
        assert!(Estimates::from_totals(vec![1.0, 2.0], vec![1]).is_err());
    }

    #[test]
    fn zero_arms_cannot_be_played() {
        assert!(EpsilonGreedyPlayer::new(0, 0.1).is_err());
    }
}
