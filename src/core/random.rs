extern crate rand;
extern crate rand_core;
extern crate rand_distr;
extern crate rand_xoshiro;
use rand::seq::SliceRandom as _;
use rand_core::SeedableRng;
use rand_distr::{self as distributions, Distribution as _};

type BasicRNG = rand_xoshiro::Xoshiro256StarStar;

/// Seedable random number generator shared by permutations and simulations.
#[derive(Debug, Clone)]
pub struct RNG {
    basic_rng: BasicRNG,
}

impl RNG {
    pub fn new_with_seed(seed: usize) -> Self {
        let basic_rng = SeedableRng::seed_from_u64(seed as u64);
        RNG { basic_rng }
    }

    /// Derive an independent generator, e.g. for work on another thread.
    pub fn fork_random_state(&mut self) -> Self {
        let basic_rng = BasicRNG::seed_from_u64(rand::RngCore::next_u64(&mut self.basic_rng));
        RNG { basic_rng }
    }

    pub fn basic_rng_mut(&mut self) -> &mut BasicRNG {
        &mut self.basic_rng
    }

    pub fn uniform<T, Range>(&mut self, range: Range) -> T
    where
        Range: Into<distributions::Uniform<T>>,
        T: distributions::uniform::SampleUniform,
    {
        range.into().sample(self.basic_rng_mut())
    }

    /// Draw from a normal distribution. The std must be finite and non-negative.
    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        assert!(
            std >= 0.0 && std.is_finite(),
            "std must be finite and non-negative, got: {}",
            std
        );
        mean + std * self.standard_normal()
    }

    pub fn standard_normal(&mut self) -> f64 {
        distributions::StandardNormal.sample(self.basic_rng_mut())
    }

    /// A uniformly random permutation of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(self.basic_rng_mut());
        indices
    }

    /// `amount` distinct indices from `0..n`, in random order.
    pub fn choose_indices(&mut self, n: usize, amount: usize) -> Vec<usize> {
        assert!(
            amount <= n,
            "cannot choose {} distinct indices out of {}",
            amount,
            n
        );
        rand::seq::index::sample(self.basic_rng_mut(), n, amount).into_vec()
    }
}
