//! Reference strategies used by tests and demos.

pub mod fixed_weight;
pub mod ma_cross;

pub use fixed_weight::FixedWeight;
pub use ma_cross::MaCross;
