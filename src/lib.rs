//! `banditsim`: multi-armed bandit simulation with an epsilon-greedy player.
//!
//! A [`Bandit`] holds a fixed set of [`Arm`]s whose parameters are drawn once, at
//! construction, from an [`ArmPrior`]. An [`EpsilonGreedyPlayer`] owns one bandit
//! and learns sample-mean value estimates (q-values) by pulling arms: with
//! probability `epsilon` it explores a uniformly random arm, otherwise it exploits
//! the arm with the highest current estimate.
//!
//! The [`Simulation`] driver runs many independent players and reports, per
//! player, the running average reward after each play. [`LineChart`] turns a
//! report into line-chart data.
//!
//! **Randomness is injected.** Every stochastic step takes a [`UniformSource`]:
//! any `rand` RNG, or a scripted [`SequenceSource`] in tests. Seeded types are
//! deterministic by default (seed `0`).
//!
//! **Rewards** are Gaussian: `mean + std_dev * z`, with `z` from the Box-Muller
//! transform ([`standard_normal`], [`BoxMuller`]).
//!
//! ```rust
//! use banditsim::{EpsilonGreedyPlayer, Simulation, SimulationConfig};
//!
//! let mut player = EpsilonGreedyPlayer::with_seed(10, 0.1, 7).unwrap();
//! let results = player.play_for(100);
//! assert_eq!(results.len(), 100);
//! assert_eq!(player.counts().iter().sum::<u64>(), 100);
//!
//! let report = Simulation::new(SimulationConfig::default().num_bandits(3).num_plays(200).seed(1))
//!     .unwrap()
//!     .run()
//!     .unwrap();
//! assert_eq!(report.curves.len(), 3);
//! ```
//!
//! **Non-goals:** persistence, other bandit algorithms (UCB, Thompson), and
//! concurrent play.

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod source;
pub use source::*;

mod gaussian;
pub use gaussian::*;

mod arm;
pub use arm::*;

mod bandit;
pub use bandit::*;

mod player;
pub use player::*;

mod driver;
pub use driver::*;

mod chart;
pub use chart::*;
