//! Bounded kernels for the MMD and HSIC statistics.
//!
//! Matern code adapted from the sklearn.gaussian_process.kernels Python module.

mod bandwidth;
mod distance;
mod gaussian_kernel;
mod kernel;
mod matern_kernel;
mod scalar;

pub use bandwidth::{median_heuristic, Bandwidth};
pub use distance::{cdist, cdist_l1, pairwise_distances};
pub use gaussian_kernel::{Gaussian, Laplace};
pub use kernel::{Kernel, Metric};
pub use matern_kernel::Matern;
pub use scalar::Scalar;

use ndarray::prelude::*;

/// Kernel family selected at runtime, e.g. from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelKind {
    Gaussian,
    Laplace,
    Matern { nu: f64 },
}

impl KernelKind {
    /// Instantiate the kernel family with a concrete bandwidth.
    pub fn with_bandwidth(self, bandwidth: f64) -> AnyKernel {
        match self {
            KernelKind::Gaussian => AnyKernel::Gaussian(Gaussian::new(bandwidth)),
            KernelKind::Laplace => AnyKernel::Laplace(Laplace::new(bandwidth)),
            KernelKind::Matern { nu } => AnyKernel::Matern(Matern::new(nu, bandwidth)),
        }
    }

    pub fn metric(self) -> Metric {
        match self {
            KernelKind::Gaussian | KernelKind::Matern { .. } => Metric::Euclidean,
            KernelKind::Laplace => Metric::Manhattan,
        }
    }
}

impl Default for KernelKind {
    fn default() -> Self {
        KernelKind::Gaussian
    }
}

impl std::str::FromStr for KernelKind {
    type Err = failure::Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name.to_ascii_lowercase().as_ref() {
            "gaussian" | "rbf" => KernelKind::Gaussian,
            "laplace" => KernelKind::Laplace,
            "matern-1/2" | "matern12" => KernelKind::Matern { nu: 0.5 },
            "matern-3/2" | "matern32" => KernelKind::Matern { nu: 1.5 },
            "matern-5/2" | "matern52" => KernelKind::Matern { nu: 2.5 },
            _ => bail!(
                "expected gaussian, laplace, matern-1/2, matern-3/2 or matern-5/2, got: {:?}",
                name
            ),
        })
    }
}

impl std::fmt::Display for KernelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            KernelKind::Gaussian => f.write_str("gaussian"),
            KernelKind::Laplace => f.write_str("laplace"),
            KernelKind::Matern { nu } => write!(f, "matern-{}/2", (nu * 2.0).round()),
        }
    }
}

/// One of the built-in kernels.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyKernel {
    Gaussian(Gaussian),
    Laplace(Laplace),
    Matern(Matern),
}

macro_rules! delegate {
    ($self:expr, $kernel:ident => $body:expr) => {
        match $self {
            AnyKernel::Gaussian($kernel) => $body,
            AnyKernel::Laplace($kernel) => $body,
            AnyKernel::Matern($kernel) => $body,
        }
    };
}

impl Kernel for AnyKernel {
    fn kernel<A: Scalar>(&self, x1: ArrayView2<A>, x2: ArrayView2<A>) -> Array2<A> {
        delegate!(self, k => k.kernel(x1, x2))
    }

    fn bound(&self) -> f64 {
        delegate!(self, k => k.bound())
    }

    fn bandwidth(&self) -> f64 {
        delegate!(self, k => k.bandwidth())
    }

    fn metric(&self) -> Metric {
        delegate!(self, k => k.metric())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kernel_kind_can_be_parsed() {
        assert_eq!("Gaussian".parse::<KernelKind>().unwrap(), KernelKind::Gaussian);
        assert_eq!("laplace".parse::<KernelKind>().unwrap(), KernelKind::Laplace);
        assert_eq!(
            "matern-5/2".parse::<KernelKind>().unwrap(),
            KernelKind::Matern { nu: 2.5 }
        );
        assert!("polynomial".parse::<KernelKind>().is_err());
    }

    #[test]
    fn kernel_kind_display_roundtrips() {
        for kind in &[
            KernelKind::Gaussian,
            KernelKind::Laplace,
            KernelKind::Matern { nu: 1.5 },
        ] {
            assert_eq!(kind.to_string().parse::<KernelKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn any_kernel_delegates() {
        let x = array![[0., 1.], [2., 3.]];
        let kernel = KernelKind::Laplace.with_bandwidth(1.5);
        assert_eq!(kernel.metric(), Metric::Manhattan);
        assert_eq!(
            kernel.kernel(x.view(), x.view()),
            Laplace::new(1.5).kernel(x.view(), x.view())
        );
        assert_eq!(kernel.bandwidth(), 1.5);
    }
}
