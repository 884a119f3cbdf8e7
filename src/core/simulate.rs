//! Synthetic samples and corruption models for experiments.

use ndarray::prelude::*;

use crate::RNG;

/// Isotropic gaussian sample of shape (n, dim).
///
/// ```
/// # use dckernel::{simulate, RNG};
/// let x = simulate::gaussian_sample(10, 3, 0.0, 1.0, &mut RNG::new_with_seed(1));
/// assert_eq!(x.shape(), &[10, 3]);
/// ```
pub fn gaussian_sample(n: usize, dim: usize, mean: f64, std: f64, rng: &mut RNG) -> Array2<f64> {
    Array2::from_shape_fn((n, dim), |_| rng.normal(mean, std))
}

/// Paired sample where each y feature is `dependence * x_0 + noise`.
///
/// With `dependence = 0`, x and y are independent.
pub fn dependent_pairs(
    n: usize,
    dim: usize,
    dependence: f64,
    rng: &mut RNG,
) -> (Array2<f64>, Array2<f64>) {
    let x = gaussian_sample(n, dim, 0.0, 1.0, rng);
    let noise = gaussian_sample(n, dim, 0.0, 1.0, rng);
    let driver = x.column(0).to_owned().insert_axis(Axis(1));
    let y = noise + &(driver * dependence);
    (x, y)
}

/// How a corrupted sample is altered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Corruption {
    /// Replace every feature by a constant, e.g. a far-away outlier.
    Constant(f64),
    /// Add gaussian noise with the given standard deviation.
    Noise { std: f64 },
    /// Replace the row by a randomly chosen row of the other sample.
    Swap,
}

impl std::str::FromStr for Corruption {
    type Err = failure::Error;

    /// Parses `constant:<value>`, `noise:<std>` or `swap`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use failure::ResultExt as _;
        let mut items = s.splitn(2, ':');
        let name = items.next().unwrap_or_default().to_ascii_lowercase();
        let value = items.next();
        let parse_value = |what: &str| -> Result<f64, failure::Error> {
            let raw = value.ok_or_else(|| {
                format_err!("expected '{}:<{}>' but got: {}", name, what, s)
            })?;
            Ok(raw
                .parse::<f64>()
                .with_context(|err| format!("while parsing <{}>: {}", what, err))?)
        };
        match name.as_ref() {
            "constant" => Ok(Corruption::Constant(parse_value("value")?)),
            "noise" => {
                let std = parse_value("std")?;
                ensure!(
                    std >= 0.0 && std.is_finite(),
                    "noise std must be finite and non-negative, got: {}",
                    std
                );
                Ok(Corruption::Noise { std })
            }
            "swap" => {
                ensure!(value.is_none(), "swap takes no value, got: {}", s);
                Ok(Corruption::Swap)
            }
            _ => bail!("expected constant:<value>, noise:<std> or swap, got: {:?}", s),
        }
    }
}

/// Corrupt `corruptions` randomly chosen rows of `target` in place.
/// `other` is the sample that `Swap` takes its rows from.
///
/// Returns the indices of the corrupted rows.
pub fn corrupt(
    mut target: ArrayViewMut2<f64>,
    other: ArrayView2<f64>,
    corruptions: usize,
    corruption: Corruption,
    rng: &mut RNG,
) -> Result<Vec<usize>, failure::Error> {
    let n = target.shape()[0];
    ensure!(
        corruptions <= n,
        "cannot corrupt {} rows of a sample with {} rows",
        corruptions,
        n
    );
    match corruption {
        Corruption::Swap => ensure!(
            other.shape()[0] > 0 && other.shape()[1] == target.shape()[1],
            "swap requires a non-empty sample with matching features"
        ),
        Corruption::Noise { std } => ensure!(
            std >= 0.0 && std.is_finite(),
            "noise std must be finite and non-negative, got: {}",
            std
        ),
        Corruption::Constant(_) => {}
    }

    let rows = rng.choose_indices(n, corruptions);
    for &row in &rows {
        let mut values = target.row_mut(row);
        match corruption {
            Corruption::Constant(value) => values.fill(value),
            Corruption::Noise { std } => values.map_inplace(|x| *x += rng.normal(0.0, std)),
            Corruption::Swap => {
                let source = rng.uniform(0..other.shape()[0]);
                values.assign(&other.row(source));
            }
        }
    }
    Ok(rows)
}
