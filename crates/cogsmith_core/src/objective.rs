use crate::placement::Placement;
use serde::{Deserialize, Serialize};

/// Weights of the scalar objective `build * b + flaggy * f + exp * e`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub build: f64,
    pub flaggy: f64,
    pub exp: f64,
}

impl ObjectiveWeights {
    #[must_use]
    pub const fn new(build: f64, flaggy: f64, exp: f64) -> Self {
        Self { build, flaggy, exp }
    }

    #[must_use]
    pub fn evaluate(&self, placement: &Placement) -> f64 {
        placement.objective(self)
    }
}
