use crate::config::StrengthConfig;
use crate::placement::PointMutation;
use crate::template::Template;

/// Result of a strength update after a point mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    Applied { z_score: f64, factor: f64 },
    /// Zero combined spread, a missing estimate, or a non-finite factor.
    Skipped,
}

/// Reinforces the swap recorded in `mutation`.
///
/// The objective change is compared with the difference of the two cogs'
/// marginal estimates and scaled by their combined spread. The resulting
/// z-score sets `factor = factor_base ^ z`; the placed cog's strength at the
/// cell is multiplied by `factor` and the evicted cog's by `1 / factor`, both
/// under the configured clamps.
pub fn reinforce(
    template: &Template,
    mutation: &PointMutation,
    old_objective: f64,
    new_objective: f64,
    config: &StrengthConfig,
) -> UpdateOutcome {
    let (Some(old_item), Some(new_item)) = (
        template.item(mutation.evicted),
        template.item(mutation.placed),
    ) else {
        return UpdateOutcome::Skipped;
    };
    let (Some(old_est), Some(new_est)) = (old_item.marginal(), new_item.marginal()) else {
        return UpdateOutcome::Skipped;
    };

    let spread = new_est.spread.hypot(old_est.spread);
    if spread == 0.0 {
        return UpdateOutcome::Skipped;
    }
    let z_score = (new_objective - old_objective - (new_est.median - old_est.median)) / spread;
    let factor = config.factor_base.powf(z_score);
    if !factor.is_finite() || factor <= 0.0 {
        return UpdateOutcome::Skipped;
    }

    old_item.update_strength(
        mutation.coord,
        1.0 / factor,
        config.max_factor,
        config.max_multiplier,
    );
    new_item.update_strength(
        mutation.coord,
        factor,
        config.max_factor,
        config.max_multiplier,
    );
    UpdateOutcome::Applied { z_score, factor }
}
