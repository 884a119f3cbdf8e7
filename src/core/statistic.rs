//! Kernel test statistics evaluated under permutations of the sample indices.
//!
//! Both statistics are the biased (V-statistic) estimators without the square,
//! i.e. RKHS norms of empirical embeddings.
//! Norms satisfy the triangle inequality,
//! which is what bounds the effect of a replaced sample.

use ndarray::prelude::*;

use crate::kernel::{Kernel, Scalar};

/// A statistic that can be recomputed under a permutation of its samples.
pub trait PermutationStatistic: Sync {
    /// Short name for reports.
    fn name(&self) -> &'static str;

    /// Length of the permutations accepted by `evaluate()`.
    fn n_permutable(&self) -> usize;

    /// Evaluate the statistic with sample indices rearranged by `permutation`.
    /// The identity permutation gives the observed statistic.
    fn evaluate(&self, permutation: &[usize]) -> f64;

    /// Largest change of a single statistic (observed or permuted)
    /// when one sample is replaced arbitrarily.
    fn sensitivity(&self) -> f64;

    /// Amount by which the rejection threshold must be raised
    /// so that the test stays valid with `corruptions` replaced samples.
    fn corruption_correction(&self, corruptions: usize) -> f64;

    fn observed(&self) -> f64 {
        let identity: Vec<usize> = (0..self.n_permutable()).collect();
        self.evaluate(&identity)
    }
}

/// Maximum Mean Discrepancy between the first `m` and the last `n` pooled samples.
#[derive(Debug, Clone)]
pub struct Mmd<A> {
    pooled_kernel: Array2<A>,
    m: usize,
    n: usize,
    kernel_bound: f64,
}

impl<A: Scalar> Mmd<A> {
    /// Precompute the kernel matrix of the pooled sample `[x; y]`.
    pub fn new<K: Kernel>(kernel: &K, x: ArrayView2<A>, y: ArrayView2<A>) -> Self {
        assert_eq!(
            x.shape()[1],
            y.shape()[1],
            "both samples must have the same number of features",
        );
        let (m, n) = (x.shape()[0], y.shape()[0]);
        assert!(m > 0 && n > 0, "both samples must be non-empty");
        let pooled = ndarray::stack(Axis(0), &[x.view(), y.view()]).expect("feature counts were checked");
        let pooled_kernel = kernel.kernel(pooled.view(), pooled.view());
        Self::from_kernel_matrix(pooled_kernel, m, n, kernel.bound())
    }

    /// Use an already computed pooled kernel matrix.
    pub fn from_kernel_matrix(pooled_kernel: Array2<A>, m: usize, n: usize, kernel_bound: f64) -> Self {
        assert_eq!(
            pooled_kernel.shape(),
            &[m + n, m + n],
            "pooled kernel matrix must be square with m + n rows",
        );
        Mmd {
            pooled_kernel,
            m,
            n,
            kernel_bound,
        }
    }
}

impl<A: Scalar> PermutationStatistic for Mmd<A> {
    fn name(&self) -> &'static str {
        "mmd"
    }

    fn n_permutable(&self) -> usize {
        self.m + self.n
    }

    fn evaluate(&self, permutation: &[usize]) -> f64 {
        assert_eq!(permutation.len(), self.m + self.n, "permutation has wrong length");
        let wx = A::from_f(1.0 / self.m as f64);
        let wy = A::from_f(-1.0 / self.n as f64);
        let mut weights = Array1::zeros(self.m + self.n);
        for (position, &index) in permutation.iter().enumerate() {
            weights[index] = if position < self.m { wx } else { wy };
        }
        let squared: f64 = weights.dot(&self.pooled_kernel.dot(&weights)).into();
        squared.max(0.0).sqrt()
    }

    fn sensitivity(&self) -> f64 {
        // |phi(z) - phi(z')| <= sqrt(2K) for nonnegative kernels,
        // and a replaced sample enters one mean embedding with weight 1/m or 1/n.
        (2.0 * self.kernel_bound).sqrt() / std::cmp::min(self.m, self.n) as f64
    }

    fn corruption_correction(&self, corruptions: usize) -> f64 {
        // observed statistic and permutation quantile each shift by at most r * sensitivity
        2.0 * corruptions as f64 * self.sensitivity()
    }
}

/// Hilbert-Schmidt Independence Criterion between paired samples.
#[derive(Debug, Clone)]
pub struct Hsic<A> {
    centered_kx: Array2<A>,
    ly: Array2<A>,
    n: usize,
    bound_x: f64,
    bound_y: f64,
}

impl<A: Scalar> Hsic<A> {
    /// Precompute the kernel matrices of `x` and `y`, which must have the same number of rows.
    pub fn new<K: Kernel, L: Kernel>(
        kernel_x: &K,
        kernel_y: &L,
        x: ArrayView2<A>,
        y: ArrayView2<A>,
    ) -> Self {
        let n = x.shape()[0];
        assert_eq!(n, y.shape()[0], "x and y must have the same number of rows");
        assert!(n > 0, "samples must be non-empty");
        let kx = kernel_x.kernel(x, x);
        let ly = kernel_y.kernel(y, y);
        Hsic {
            centered_kx: center_kernel_matrix(kx),
            ly,
            n,
            bound_x: kernel_x.bound(),
            bound_y: kernel_y.bound(),
        }
    }
}

impl<A: Scalar> PermutationStatistic for Hsic<A> {
    fn name(&self) -> &'static str {
        "hsic"
    }

    fn n_permutable(&self) -> usize {
        self.n
    }

    /// Permutes the rows of y relative to x.
    fn evaluate(&self, permutation: &[usize]) -> f64 {
        assert_eq!(permutation.len(), self.n, "permutation has wrong length");
        let permuted_ly = self
            .ly
            .select(Axis(0), permutation)
            .select(Axis(1), permutation);
        let squared: f64 = (&self.centered_kx * &permuted_ly).sum().into();
        squared.max(0.0).sqrt() / self.n as f64
    }

    fn sensitivity(&self) -> f64 {
        // Cross-covariance operator (1/n) sum phi(x_i) (x) psi(y_i) - mu_x (x) mu_y:
        // the first term moves by sqrt(2KL)/n, the product of means by 2 sqrt(2KL)/n.
        3.0 * (2.0 * self.bound_x * self.bound_y).sqrt() / self.n as f64
    }

    fn corruption_correction(&self, corruptions: usize) -> f64 {
        // A corrupted pair changes one row of the observed sample,
        // but its x and y parts land in two different rows after permuting y.
        3.0 * corruptions as f64 * self.sensitivity()
    }
}

/// Double centering `H K H` with `H = I - 1/n`.
pub fn center_kernel_matrix<A: Scalar>(kernel: Array2<A>) -> Array2<A> {
    let n = kernel.shape()[0];
    assert_eq!(n, kernel.shape()[1], "kernel matrix must be square");
    assert!(n > 0, "kernel matrix must be non-empty");
    let size = A::from_f(n as f64);
    let row_means = kernel.sum_axis(Axis(1)) / size;
    let col_means = kernel.sum_axis(Axis(0)) / size;
    let total_mean = row_means.sum() / size;
    kernel - &row_means.insert_axis(Axis(1)) - &col_means.insert_axis(Axis(0)) + total_mean
}
