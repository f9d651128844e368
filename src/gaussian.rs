//! Standard-normal deviates via the Box-Muller transform.
//!
//! Uses the cosine branch: `sqrt(-2 ln u) * cos(2 pi v)`. Both uniforms are
//! redrawn while exactly zero (`ln 0` is undefined), so each call consumes at
//! least two draws from the source.

use rand::Rng;
use rand_distr::Distribution;
use std::f64::consts::TAU;

use crate::UniformSource;

/// Draw one standard-normal deviate (mean 0, standard deviation 1).
pub fn standard_normal<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    let u = nonzero_uniform(source);
    let v = nonzero_uniform(source);
    (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
}

fn nonzero_uniform<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    loop {
        let x = source.next_f64();
        if x != 0.0 {
            return x;
        }
    }
}

/// The Box-Muller sampler as a `rand_distr` distribution.
///
/// ```rust
/// use banditsim::BoxMuller;
/// use rand::{rngs::StdRng, SeedableRng};
/// use rand_distr::Distribution;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let z: f64 = BoxMuller.sample(&mut rng);
/// assert!(z.is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxMuller;

impl Distribution<f64> for BoxMuller {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        standard_normal(rng)
    }
}
