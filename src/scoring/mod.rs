pub mod normalizer;
pub mod stress;

pub use normalizer::{normalize, MinMaxNormalizer};
pub use stress::{calculate_stress_score, StressWeights};
