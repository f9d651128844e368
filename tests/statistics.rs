//! Statistical behaviour of arms, bandits, and whole runs.
//!
//! Seeds are fixed, so these are deterministic; tolerances are still set a few
//! standard errors wide so that reseeding would not make them flaky.

use banditsim::{
    standard_normal, ArmPrior, Bandit, Error, Simulation, SimulationConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn sampler_has_unit_moments() {
    let mut rng = StdRng::seed_from_u64(0xB0C5);
    let n = 100_000;
    let xs: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
    let mean = xs.iter().sum::<f64>() / n as f64;
    let sd = (xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0)).sqrt();
    assert!(mean.abs() < 0.05, "mean={mean}");
    assert!((sd - 1.0).abs() < 0.05, "sd={sd}");
}

#[test]
fn pull_arm_guards_both_ends() {
    let mut rng = StdRng::seed_from_u64(3);
    let bandit = Bandit::new(10, ArmPrior::StandardNormal, &mut rng).unwrap();
    assert!(matches!(
        bandit.pull_arm(10, &mut rng),
        Err(Error::InvalidIndex { index: 10, num_arms: 10 })
    ));
    let minus_one = -1i64 as usize;
    assert!(matches!(
        bandit.pull_arm(minus_one, &mut rng),
        Err(Error::InvalidIndex { .. })
    ));
}

#[test]
fn pulled_rewards_average_out_near_the_prior_mean() {
    // Only rewards are observable: over many uniform-prior bandits, arm 0's
    // rewards average to the prior's mean of 5.
    let mut rng = StdRng::seed_from_u64(5);
    let (bandits, pulls) = (400, 50);
    let mut sum = 0.0;
    for _ in 0..bandits {
        let b = Bandit::new(1, ArmPrior::uniform(), &mut rng).unwrap();
        for _ in 0..pulls {
            sum += b.pull_arm(0, &mut rng).unwrap();
        }
    }
    let avg = sum / (bandits * pulls) as f64;
    assert!((avg - 5.0).abs() < 0.75, "avg={avg}");
}

#[test]
fn learning_beats_uniform_random_play() {
    let run = |epsilon: f64| {
        Simulation::new(
            SimulationConfig::default()
                .num_bandits(20)
                .num_plays(2_000)
                .epsilon(epsilon)
                .seed(2024),
        )
        .unwrap()
        .run()
        .unwrap()
    };
    let greedy = run(0.1);
    let random = run(1.0);
    assert!(
        greedy.mean_final_average() > random.mean_final_average() + 0.5,
        "greedy={} random={}",
        greedy.mean_final_average(),
        random.mean_final_average()
    );
    let greedy_share: f64 =
        greedy.curves.iter().map(|c| c.optimal_share()).sum::<f64>() / greedy.curves.len() as f64;
    let random_share: f64 =
        random.curves.iter().map(|c| c.optimal_share()).sum::<f64>() / random.curves.len() as f64;
    assert!(greedy_share > random_share, "{greedy_share} <= {random_share}");
}
