use ndarray::prelude::*;

use crate::kernel::distance::{cdist, cdist_l1};
use crate::kernel::{Kernel, Metric, Scalar};

/// Gaussian kernel `exp(-|x - y|^2 / (2 h^2))` on euclidean distances.
#[derive(Clone, Debug, PartialEq)]
pub struct Gaussian {
    bandwidth: f64,
}

impl Gaussian {
    pub fn new(bandwidth: f64) -> Self {
        assert!(
            bandwidth > 0.0 && bandwidth.is_finite(),
            "bandwidth must be positive and finite, got: {}",
            bandwidth,
        );
        Gaussian { bandwidth }
    }
}

impl Kernel for Gaussian {
    fn kernel<A: Scalar>(&self, x1: ArrayView2<A>, x2: ArrayView2<A>) -> Array2<A> {
        let scale = A::from_f(2.0 * self.bandwidth.powi(2));
        cdist(x1, x2).mapv(|d| (-d.powi(2) / scale).exp())
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

/// Laplace kernel `exp(-|x - y|_1 / h)` on l1 distances.
#[derive(Clone, Debug, PartialEq)]
pub struct Laplace {
    bandwidth: f64,
}

impl Laplace {
    pub fn new(bandwidth: f64) -> Self {
        assert!(
            bandwidth > 0.0 && bandwidth.is_finite(),
            "bandwidth must be positive and finite, got: {}",
            bandwidth,
        );
        Laplace { bandwidth }
    }
}

impl Kernel for Laplace {
    fn kernel<A: Scalar>(&self, x1: ArrayView2<A>, x2: ArrayView2<A>) -> Array2<A> {
        let bandwidth = A::from_f(self.bandwidth);
        cdist_l1(x1, x2).mapv(|d| (-d / bandwidth).exp())
    }

    fn bound(&self) -> f64 {
        1.0
    }

    fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    fn metric(&self) -> Metric {
        Metric::Manhattan
    }
}
