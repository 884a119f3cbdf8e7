use ndarray::prelude::*;
use ndarray_stats as ndstats;
use noisy_float::types::N64;

use crate::kernel::distance::pairwise_distances;
use crate::kernel::{Metric, Scalar};

/// How the kernel bandwidth is chosen.
///
/// A data-independent bandwidth is needed for the corruption guarantee to hold exactly:
/// with `Median`, corrupted samples may also move the bandwidth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bandwidth {
    Fixed(f64),
    Median,
}

impl Bandwidth {
    /// Resolve the bandwidth for a sample of shape (n_samples, n_features).
    pub fn resolve<A: Scalar>(self, x: ArrayView2<A>, metric: Metric) -> Result<f64, failure::Error> {
        match self {
            Bandwidth::Fixed(bandwidth) => {
                ensure!(
                    bandwidth > 0.0 && bandwidth.is_finite(),
                    "bandwidth must be positive and finite, got: {}",
                    bandwidth,
                );
                Ok(bandwidth)
            }
            Bandwidth::Median => median_heuristic(x, metric),
        }
    }
}

impl Default for Bandwidth {
    fn default() -> Self {
        Bandwidth::Median
    }
}

impl std::str::FromStr for Bandwidth {
    type Err = failure::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use failure::ResultExt as _;
        if s.eq_ignore_ascii_case("median") {
            return Ok(Bandwidth::Median);
        }
        let bandwidth = s
            .parse::<f64>()
            .with_context(|err| format!("expected 'median' or a positive number: {}", err))?;
        ensure!(
            bandwidth > 0.0 && bandwidth.is_finite(),
            "bandwidth must be positive and finite, got: {}",
            s,
        );
        Ok(Bandwidth::Fixed(bandwidth))
    }
}

impl std::fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Bandwidth::Fixed(bandwidth) => write!(f, "{}", bandwidth),
            Bandwidth::Median => f.write_str("median"),
        }
    }
}

/// Median of the pairwise distances between distinct rows.
///
/// Zero distances from duplicated rows are skipped.
/// Fails if fewer than two distinct rows exist.
pub fn median_heuristic<A: Scalar>(x: ArrayView2<A>, metric: Metric) -> Result<f64, failure::Error> {
    use ndstats::Quantile1dExt as _;

    let n = x.shape()[0];
    ensure!(
        n >= 2,
        "median heuristic requires at least two samples, got: {}",
        n
    );

    let dists = pairwise_distances(x, x, metric);
    ensure!(
        dists.iter().all(|d| d.is_finite()),
        "pairwise distances overflow, the sample should be rescaled"
    );
    let mut upper: Array1<N64> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .map(|(i, j)| dists[[i, j]].to_n64())
        .filter(|&d| d > N64::from_f64(0.0))
        .collect();

    ensure!(
        !upper.is_empty(),
        "median heuristic requires at least two distinct samples"
    );

    let median = upper
        .quantile_mut(N64::from_f64(0.5), &ndstats::interpolate::Lower)
        .map_err(|err| format_err!("cannot compute median distance: {:?}", err))?;

    Ok(median.raw())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn median_of_three_points_on_a_line() {
        // distances: 1, 3, 4
        let x = array![[0.], [1.], [4.]];
        let median = median_heuristic(x.view(), Metric::Euclidean).unwrap();
        assert_eq!(median, 3.0);
    }

    #[test]
    fn median_ignores_duplicates() {
        let x = array![[0.], [0.], [2.]];
        let median = median_heuristic(x.view(), Metric::Manhattan).unwrap();
        assert_eq!(median, 2.0);
    }

    #[test]
    fn median_requires_distinct_samples() {
        let x = array![[1., 1.], [1., 1.]];
        assert!(median_heuristic(x.view(), Metric::Euclidean).is_err());
        let x = array![[1., 1.]];
        assert!(median_heuristic(x.view(), Metric::Euclidean).is_err());
    }

    #[test]
    fn median_rejects_overflowing_distances() {
        let x = array![[0.], [1e200], [2e200]];
        assert!(median_heuristic(x.view(), Metric::Euclidean).is_err());
        let x = array![[0f32], [1e19f32], [3e19f32]];
        assert!(median_heuristic(x.view(), Metric::Euclidean).is_err());
    }

    #[test]
    fn bandwidth_can_be_parsed() {
        assert_eq!("median".parse::<Bandwidth>().unwrap(), Bandwidth::Median);
        assert_eq!("0.5".parse::<Bandwidth>().unwrap(), Bandwidth::Fixed(0.5));
        assert!("-1".parse::<Bandwidth>().is_err());
        assert!("wide".parse::<Bandwidth>().is_err());
    }
}
