//! Placements ranked by objective value.

use crate::objective::ObjectiveWeights;
use crate::placement::Placement;
use rand::Rng;

/// A placement with its objective value, computed once on insertion.
#[derive(Debug, Clone)]
pub struct Member {
    pub placement: Placement,
    pub objective: f64,
}

/// Members kept in descending objective order.
///
/// `cull` truncates back to the size the population was created with.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Member>,
    target_size: usize,
    weights: ObjectiveWeights,
}

impl Population {
    #[must_use]
    pub fn new(placements: Vec<Placement>, weights: ObjectiveWeights) -> Self {
        let target_size = placements.len();
        let mut population = Self {
            members: Vec::with_capacity(target_size),
            target_size,
            weights,
        };
        for placement in placements {
            population.add(placement);
        }
        population
    }

    /// Scores and inserts `placement`, returning its objective value.
    ///
    /// Ties keep insertion order.
    pub fn add(&mut self, placement: Placement) -> f64 {
        let objective = self.weights.evaluate(&placement);
        let at = self.members.partition_point(|m| m.objective >= objective);
        self.members.insert(
            at,
            Member {
                placement,
                objective,
            },
        );
        objective
    }

    /// Drops the worst members beyond the target size.
    pub fn cull(&mut self) {
        self.members.truncate(self.target_size);
    }

    /// `k` distinct member indices drawn uniformly; fewer if the population is smaller.
    pub fn sample_indices<R: Rng>(&self, k: usize, rng: &mut R) -> Vec<usize> {
        rand::seq::index::sample(rng, self.members.len(), k.min(self.members.len())).into_vec()
    }

    #[must_use]
    pub fn member(&self, index: usize) -> Option<&Member> {
        self.members.get(index)
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn best(&self) -> Option<&Member> {
        self.members.first()
    }

    /// Member at the `p`-quantile from the bottom, i.e. index `floor((1 - p) * len)`
    /// into the descending order, clamped to the last member.
    #[must_use]
    pub fn percentile(&self, p: f64) -> Option<&Member> {
        let last = self.members.len().checked_sub(1)?;
        let idx = ((1.0 - p) * self.members.len() as f64).max(0.0) as usize;
        self.members.get(idx.min(last))
    }

    #[must_use]
    pub fn median(&self) -> Option<&Member> {
        self.percentile(0.5)
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.members.is_empty() {
            return None;
        }
        let total: f64 = self.members.iter().map(|m| m.objective).sum();
        Some(total / self.members.len() as f64)
    }

    /// Objective distance from the median to the one-sigma-equivalent upper percentile.
    #[must_use]
    pub fn spread(&self, one_sigma: f64) -> Option<f64> {
        let upper = self.percentile(0.5 + one_sigma)?.objective;
        Some(upper - self.median()?.objective)
    }

    /// How far `other`'s median lies above this population's, in units of this
    /// population's spread. `None` when empty or the spread is zero.
    #[must_use]
    pub fn z_score(&self, other: &Population, one_sigma: f64) -> Option<f64> {
        let spread = self.spread(one_sigma)?;
        if spread == 0.0 {
            return None;
        }
        Some((other.median()?.objective - self.median()?.objective) / spread)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    #[must_use]
    pub fn weights(&self) -> ObjectiveWeights {
        self.weights
    }

    /// Consumes the population, returning its best member.
    #[must_use]
    pub fn into_best(self) -> Option<Member> {
        self.members.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::AvailabilityMask;
    use crate::template::Template;
    use cogsmith_data::{Coord, ItemRecord};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Ten placements, each holding a single cog with build rate 1..=10.
    fn ladder() -> Population {
        let records: Vec<_> = (1..=10).map(|b| ItemRecord::plain(b, 0, 0.0)).collect();
        let template = Arc::new(Template::new(
            AvailabilityMask::default(),
            &records,
            HashSet::new(),
        ));
        let placements = (0..10)
            .map(|id| {
                let mut p = Placement::new(&template);
                p.seed_from_pool([id]).unwrap();
                p.assign(Coord::new(0, 0), id).unwrap();
                p
            })
            .collect();
        Population::new(placements, ObjectiveWeights::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_members_are_sorted_descending() {
        let pop = ladder();
        let values: Vec<f64> = pop.members().iter().map(|m| m.objective).collect();
        assert_eq!(values, vec![10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(pop.best().map(|m| m.objective), Some(10.0));
        assert_eq!(pop.mean(), Some(5.5));
    }

    #[test]
    fn test_percentile_indexing() {
        let pop = ladder();
        assert_eq!(pop.percentile(0.9).map(|m| m.objective), Some(10.0));
        assert_eq!(pop.median().map(|m| m.objective), Some(5.0));
        // p = 0 would index one past the end; clamped to the worst member.
        assert_eq!(pop.percentile(0.0).map(|m| m.objective), Some(1.0));
        assert_eq!(pop.percentile(1.0).map(|m| m.objective), Some(10.0));
    }

    #[test]
    fn test_spread_and_z_score() {
        let pop = ladder();
        // 0.8413 -> index 1 -> 9.0; median 5.0.
        assert_eq!(pop.spread(0.3413), Some(4.0));
        assert_eq!(pop.z_score(&pop, 0.3413), Some(0.0));
    }

    #[test]
    fn test_cull_restores_target_size() {
        let mut pop = ladder();
        let extra = pop.members()[0].placement.clone();
        pop.add(extra);
        assert_eq!(pop.len(), 11);
        assert_eq!(pop.members()[1].objective, 10.0);
        pop.cull();
        assert_eq!(pop.len(), 10);
        assert_eq!(pop.members()[9].objective, 2.0);
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let pop = ladder();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let picks = pop.sample_indices(2, &mut rng);
        assert_eq!(picks.len(), 2);
        assert_ne!(picks[0], picks[1]);
        assert_eq!(pop.sample_indices(50, &mut rng).len(), 10);
    }
}
