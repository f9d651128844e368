use thiserror::Error;

/// Errors surfaced by bandit construction, arm pulls, and run configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// `pull_arm` was asked for an arm that does not exist.
    #[error("arm index {index} out of range for a bandit with {num_arms} arms")]
    InvalidIndex { index: usize, num_arms: usize },

    /// Counts, epsilon, or prior bounds outside their allowed ranges.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
