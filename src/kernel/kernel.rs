use ndarray::prelude::*;

use crate::kernel::Scalar;

/// A bounded, nonnegative kernel function with a fixed bandwidth.
///
/// Robust tests rely on two facts about every implementation:
/// `0 <= k(x, y) <= bound()` for all inputs,
/// so that the effect of one replaced sample on a test statistic is bounded.
pub trait Kernel: Clone + std::fmt::Debug + Send + Sync {
    /// Evaluate the kernel function.
    /// Input arrays have shape (n_samples, n_features).
    fn kernel<A: Scalar>(&self, x1: ArrayView2<A>, x2: ArrayView2<A>) -> Array2<A>;

    /// Supremum of the kernel function over all pairs of inputs.
    fn bound(&self) -> f64;

    /// The length scale the distances are divided by.
    fn bandwidth(&self) -> f64;

    /// The distance that the median heuristic should be applied to.
    fn metric(&self) -> Metric;
}

/// Distance metric that a kernel is a function of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Euclidean,
    Manhattan,
}
