pub mod dataset;
pub mod outputs;
pub mod permutation;
pub mod random;
pub mod simulate;
pub mod statistic;
