use ndarray::prelude::*;
use num_traits::Float;

use crate::kernel::distance::cdist;
use crate::kernel::{Kernel, Metric, Scalar};

/// Matern kernel family, parameterized by smoothness parameter nu.
/// Nu should be of for p/2, e.g. 3/2.
///
/// All members are bounded by one and equal one on the diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct Matern {
    nu: f64,
    bandwidth: f64,
}

impl Matern {
    /// Create a new matern kernel with certain smoothness and bandwidth.
    ///
    /// Panics unless nu is one of 1/2, 3/2, 5/2 and the bandwidth is positive.
    pub fn new(nu: f64, bandwidth: f64) -> Self {
        assert!(
            Self::is_supported_nu(nu),
            "Matern kernel requires nu in {{0.5, 1.5, 2.5}}, got: {}",
            nu,
        );
        assert!(
            bandwidth > 0.0 && bandwidth.is_finite(),
            "bandwidth must be positive and finite, got: {}",
            bandwidth,
        );
        Matern { nu, bandwidth }
    }

    pub fn is_supported_nu(nu: f64) -> bool {
        [0.5, 1.5, 2.5]
            .iter()
            .any(|&supported| abs_diff_eq!(nu, supported, epsilon = 1e-9))
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }
}

impl Kernel for Matern {
    fn kernel<A: Scalar>(&self, x1: ArrayView2<A>, x2: ArrayView2<A>) -> Array2<A> {
        let bandwidth = A::from_f(self.bandwidth);

        // scaled euclidean distance matrix
        let dists = cdist(x1, x2) / bandwidth;

        match self.nu {
            nu if abs_diff_eq!(nu, 0.5, epsilon = 1e-9) => (-dists).mapv(Float::exp),
            nu if abs_diff_eq!(nu, 1.5, epsilon = 1e-9) => {
                let kernel: Array2<A> = dists * A::from_f(3.0.sqrt());
                (kernel.clone() + A::from_i(1)) * (-kernel).mapv(Float::exp)
            }
            nu if abs_diff_eq!(nu, 2.5, epsilon = 1e-9) => {
                let kernel: Array2<A> = dists * A::from_f(5.0.sqrt());
                // (1 + K + K**2 / 3) * exp(-K)
                (kernel.mapv(|x| x.powi(2)) / A::from_i(3) + &kernel + A::from_i(1))
                    * (-kernel).mapv(Float::exp)
            }
            nu => unreachable!("Matern kernel with unsupported nu: {}", nu),
        }
    }

    fn bound(&self) -> f64 {
        1.0
    }

    fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    fn metric(&self) -> Metric {
        Metric::Euclidean
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[allow(clippy::unreadable_literal)]
    fn it_produces_a_kernel_with_nu_3_2() {
        let kernel = Matern::new(1.5, 1.0);

        let x = array![[0., 0.], [1., 1.], [1., 2.]];

        let kernel_matrix = array![
            // produced by sklearn
            [1., 0.29782077, 0.1013397],
            [0.29782077, 1., 0.48335772],
            [0.1013397, 0.48335772, 1.]
        ];

        let actual_kernel = kernel.kernel(x.view(), x.view());
        assert_all_close!(&actual_kernel, &kernel_matrix, 0.001);
        assert_all_close!(actual_kernel.diag(), Array1::<f64>::ones(3), 1e-9);
    }

    #[test]
    #[allow(clippy::unreadable_literal)]
    fn it_produces_a_kernel_with_nu_5_2() {
        let kernel = Matern::new(2.5, 1.0);

        let x = array![[0., 0.], [1., 1.], [1., 2.]];

        let kernel_matrix = array![
            // produced by sklearn
            [1., 0.31728336, 0.09657724],
            [0.31728336, 1., 0.52399411],
            [0.09657724, 0.52399411, 1.]
        ];

        let actual_kernel = kernel.kernel(x.view(), x.view());
        assert_all_close!(&actual_kernel, &kernel_matrix, 0.001);
        assert_all_close!(actual_kernel.diag(), Array1::<f64>::ones(3), 1e-9);
    }

    #[test]
    fn nu_1_2_is_the_exponential_kernel() {
        let kernel = Matern::new(0.5, 2.0);
        let x = array![[0.], [4.]];
        let actual = kernel.kernel(x.view(), x.view());
        assert_all_close!(&actual[[0, 1]], &(-2.0f64).exp(), 1e-9);
    }

    #[test]
    fn larger_bandwidth_gives_larger_similarity() {
        let x = array![[0., 0.], [1., 1.]];
        let narrow = Matern::new(1.5, 0.5).kernel(x.view(), x.view());
        let wide = Matern::new(1.5, 5.0).kernel(x.view(), x.view());
        assert!(narrow[[0, 1]] < wide[[0, 1]]);
    }

    #[test]
    #[should_panic(expected = "requires nu")]
    fn it_rejects_unsupported_nu() {
        Matern::new(3.5, 1.0);
    }
}
