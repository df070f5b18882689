//! Objective weights from the configured exchange rates.

use anyhow::Context;
use cogsmith_core::config::ObjectiveConfig;
use cogsmith_core::ObjectiveWeights;
use nalgebra::{Matrix3, Vector3};

/// Solves for weights that sum to one and value `inverse_build_weight` units
/// of build rate the same as `inverse_flaggy_weight` units of flaggy rate and
/// `inverse_exp_weight` units of experience:
///
/// ```text
/// | 1    1    1   |   | b |   | 1 |
/// | ib  -if   0   | * | f | = | 0 |
/// | 0    if  -ie  |   | e |   | 0 |
/// ```
pub fn solve_weights(config: &ObjectiveConfig) -> anyhow::Result<ObjectiveWeights> {
    let (ib, i_f, ie) = (
        config.inverse_build_weight,
        config.inverse_flaggy_weight,
        config.inverse_exp_weight,
    );
    let a = Matrix3::new(
        1.0, 1.0, 1.0, //
        ib, -i_f, 0.0, //
        0.0, i_f, -ie,
    );
    let rhs = Vector3::new(1.0, 0.0, 0.0);
    let w = a
        .lu()
        .solve(&rhs)
        .context("Objective weight system is singular; check the inverse weights")?;
    anyhow::ensure!(
        w.iter().all(|v| v.is_finite()),
        "Objective weights are not finite"
    );
    tracing::debug!(build = w[0], flaggy = w[1], exp = w[2], "Objective weights solved");
    Ok(ObjectiveWeights::new(w[0], w[1], w[2]))
}
