use ndarray::prelude::*;
use num_traits::Float;

use crate::kernel::{Metric, Scalar};

/// Pairwise distances between the rows of `xa` and the rows of `xb`.
pub fn pairwise_distances<A: Scalar>(
    xa: ArrayView2<A>,
    xb: ArrayView2<A>,
    metric: Metric,
) -> Array2<A> {
    match metric {
        Metric::Euclidean => cdist(xa, xb),
        Metric::Manhattan => cdist_l1(xa, xb),
    }
}

/// Euclidean distance matrix.
pub fn cdist<A: Scalar>(xa: ArrayView2<A>, xb: ArrayView2<A>) -> Array2<A> {
    assert_eq!(
        xa.shape()[1],
        xb.shape()[1],
        "number of xa columns must match number of xb columns",
    );
    let mut out = Array2::zeros((xa.shape()[0], xb.shape()[0]));
    for (i, a) in xa.outer_iter().enumerate() {
        for (j, b) in xb.outer_iter().enumerate() {
            out[[i, j]] = (&a - &b).mapv_into(|x| x.powi(2)).sum().sqrt();
        }
    }
    out
}

/// Manhattan (l1) distance matrix.
pub fn cdist_l1<A: Scalar>(xa: ArrayView2<A>, xb: ArrayView2<A>) -> Array2<A> {
    assert_eq!(
        xa.shape()[1],
        xb.shape()[1],
        "number of xa columns must match number of xb columns",
    );
    let mut out = Array2::zeros((xa.shape()[0], xb.shape()[0]));
    for (i, a) in xa.outer_iter().enumerate() {
        for (j, b) in xb.outer_iter().enumerate() {
            out[[i, j]] = (&a - &b).mapv_into(Float::abs).sum();
        }
    }
    out
}
