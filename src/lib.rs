//! Robust Kernel Testing under Data Corruption
//!
//! Kernel two-sample (MMD) and independence (HSIC) permutation tests
//! that remain valid when up to `r` samples have been replaced by arbitrary values.
//! The statistics are RKHS norms, so one replaced sample can move the observed statistic
//! and every permuted statistic by a bounded amount;
//! the rejection threshold is raised by the worst case for `r` replaced samples.
//!
//! ```
//! # use dckernel::{simulate, Output, RobustTest, RNG};
//! let mut rng = RNG::new_with_seed(7);
//! let x = simulate::gaussian_sample(50, 2, 0.0, 1.0, &mut rng);
//! let y = simulate::gaussian_sample(50, 2, 3.0, 1.0, &mut rng);
//! let test = RobustTest { corruptions: 1, ..RobustTest::default() };
//! let result = test.two_sample(x.view(), y.view(), &mut rng, &mut Output::new()).unwrap();
//! assert!(result.reject);
//! ```

#[macro_use]
extern crate approx;
extern crate csv;
#[macro_use]
extern crate failure;
extern crate itertools;
extern crate ndarray;
extern crate ndarray_stats;
extern crate noisy_float;
extern crate num_traits;
extern crate rayon;
extern crate serde;
#[macro_use]
extern crate structopt;

#[macro_use]
mod util;

mod core;
pub mod kernel;

pub use crate::core::dataset::{parse_csv_sample, read_csv_sample};
pub use crate::core::outputs::{
    CompositeOutputEventHandler, CsvOutput, HumanReadableOutput, Output, OutputEventHandler,
};
pub use crate::core::permutation::{
    permutation_p_value, permutation_quantile, permuted_statistics,
};
pub use crate::core::random::RNG;
pub use crate::core::robust_test::{max_tolerated_corruptions, RobustTest, TestResult};
pub use crate::core::simulate;
pub use crate::core::statistic::{center_kernel_matrix, Hsic, Mmd, PermutationStatistic};
pub use crate::kernel::{AnyKernel, Bandwidth, Kernel, KernelKind, Scalar};
