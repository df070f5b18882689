//! Sampling of each cog's marginal contribution to the objective.

use crate::error::Result;
use crate::item::ItemId;
use crate::objective::ObjectiveWeights;
use crate::placement::Placement;
use crate::stats;
use crate::strength::MarginalEstimate;
use crate::template::Template;
use rand::Rng;
use std::sync::Arc;

/// Settings for [`estimate_marginal_with_rng`].
#[derive(Debug, Clone, Copy)]
pub struct EstimateParams {
    pub weights: ObjectiveWeights,
    pub samples_per_coord: usize,
    pub one_sigma: f64,
}

/// Samples the objective delta of cog `id` over every placeable cell.
///
/// Each sample clears the shelf, places the cog at the cell, fills the rest
/// at random and scores it, then removes the cog and scores again. The median
/// delta is the estimate; the spread is half the distance between the
/// `50 ± one_sigma` percentiles.
pub fn estimate_marginal_with_rng<R: Rng>(
    template: &Arc<Template>,
    id: ItemId,
    params: &EstimateParams,
    rng: &mut R,
) -> Result<MarginalEstimate> {
    let mut scratch = Placement::new(template);
    scratch.seed_from_pool(template.item_ids())?;

    let capacity = template.mask().placeable_count() * params.samples_per_coord;
    let mut deltas = Vec::with_capacity(capacity);
    for &coord in template.mask().placeable() {
        for _ in 0..params.samples_per_coord {
            scratch.clear();
            scratch.assign(coord, id)?;
            scratch.randomize_fill(true, rng);
            let with_cog = params.weights.evaluate(&scratch);
            scratch.evict(coord);
            deltas.push(with_cog - params.weights.evaluate(&scratch));
        }
    }

    let median = stats::median(&deltas).unwrap_or(0.0);
    let upper = stats::percentile(&deltas, 100.0 * (0.5 + params.one_sigma)).unwrap_or(0.0);
    let lower = stats::percentile(&deltas, 100.0 * (0.5 - params.one_sigma)).unwrap_or(0.0);
    Ok(MarginalEstimate {
        median,
        spread: (upper - lower) / 2.0,
    })
}

/// Computes and memoizes the estimate of every cog that does not have one yet.
pub fn estimate_marginals_with_rng<R: Rng>(
    template: &Arc<Template>,
    params: &EstimateParams,
    rng: &mut R,
) -> Result<()> {
    for item in template.items() {
        if item.marginal().is_some() {
            continue;
        }
        let estimate = estimate_marginal_with_rng(template, item.id(), params, rng)?;
        item.marginal_or_init(|| estimate);
        tracing::debug!(
            cog = item.id(),
            kind = %item.kind(),
            median = estimate.median,
            spread = estimate.spread,
            "Marginal estimated"
        );
    }
    Ok(())
}
