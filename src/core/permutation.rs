use itertools::Itertools as _;
use noisy_float::types::N64;

use crate::core::statistic::PermutationStatistic;
use crate::RNG;

/// Evaluate the statistic under `n_permutations` random permutations.
///
/// One generator is forked per permutation before the parallel section,
/// so the result does not depend on the number of threads.
pub fn permuted_statistics(
    statistic: &dyn PermutationStatistic,
    n_permutations: usize,
    rng: &mut RNG,
) -> Vec<f64> {
    use rayon::prelude::*;

    let n = statistic.n_permutable();
    let rngs = (0..n_permutations)
        .map(|_| rng.fork_random_state())
        .collect_vec();

    rngs.into_par_iter()
        .map(|mut rng| statistic.evaluate(&rng.permutation(n)))
        .collect()
}

/// The `ceil((1 - alpha) (B + 1))`-th smallest value
/// among the B permuted statistics and the observed statistic.
pub fn permutation_quantile(observed: f64, permuted: &[f64], alpha: f64) -> f64 {
    assert!(
        0.0 < alpha && alpha < 1.0,
        "alpha {} must be in range (0, 1)",
        alpha
    );
    let mut values = permuted
        .iter()
        .chain(std::iter::once(&observed))
        .map(|&x| N64::from_f64(x))
        .collect_vec();
    values.sort();

    let rank = ((1.0 - alpha) * values.len() as f64).ceil() as usize;
    let rank = rank.max(1).min(values.len());
    values[rank - 1].raw()
}

/// Monte Carlo p-value of the observed statistic
/// after shifting every permuted statistic up by `correction`.
/// The observed statistic counts as one of the permutations.
pub fn permutation_p_value(observed: f64, permuted: &[f64], correction: f64) -> f64 {
    let exceeding = permuted
        .iter()
        .filter(|&&value| value + correction >= observed)
        .count();
    (1 + exceeding) as f64 / (1 + permuted.len()) as f64
}
