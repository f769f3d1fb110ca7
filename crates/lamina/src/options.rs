use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderOptions {
    /// Seed for the heuristic's RNG. Runs with the same seed and input are reproducible.
    pub random_seed: u64,
    /// Width of the uniform noise added to computed barycenter sums. `0.0` disables it.
    pub random_amount: f64,
    /// Lane heuristic only: sort the layer a second time after the insertion pass.
    pub corrective_pass: bool,
    pub max_sweeps_without_improvement: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            random_seed: 1,
            random_amount: 0.07,
            corrective_pass: false,
            max_sweeps_without_improvement: 4,
        }
    }
}
