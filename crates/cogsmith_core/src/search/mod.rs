//! The genetic search: restarts, generations and mutation rounds.

mod controller;
mod learning;

pub use controller::IterationController;
pub use learning::{reinforce, UpdateOutcome};

use crate::config::{SearchConfig, StrengthConfig};
use crate::error::{CoreError, Result};
use crate::estimate::{estimate_marginals_with_rng, EstimateParams};
use crate::metrics::SearchMetrics;
use crate::objective::ObjectiveWeights;
use crate::placement::Placement;
use crate::population::{Member, Population};
use crate::template::Template;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Best placement found, with per-restart results and counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Placement,
    pub objective: f64,
    /// Best objective of each restart, in order.
    pub restart_bests: Vec<f64>,
    pub metrics: SearchMetrics,
}

/// Ratio of `current` to `original`, or 1 when the ratio is undefined.
fn improvement(current: f64, original: f64) -> f64 {
    let ratio = current / original;
    if ratio.is_finite() {
        ratio
    } else {
        1.0
    }
}

/// Objective values of the restart's original population, for progress reports.
#[derive(Debug, Clone, Copy)]
struct Baseline {
    best: f64,
    p90: f64,
    p50: f64,
}

impl Baseline {
    fn of(population: &Population) -> Self {
        let value = |m: Option<&Member>| m.map_or(0.0, |m| m.objective);
        Self {
            best: value(population.best()),
            p90: value(population.percentile(0.9)),
            p50: value(population.median()),
        }
    }
}

/// Runs the search over one template.
#[derive(Debug, Clone)]
pub struct Searcher {
    template: Arc<Template>,
    weights: ObjectiveWeights,
    search: SearchConfig,
    strength: StrengthConfig,
}

impl Searcher {
    #[must_use]
    pub fn new(
        template: Arc<Template>,
        weights: ObjectiveWeights,
        search: SearchConfig,
        strength: StrengthConfig,
    ) -> Self {
        Self {
            template,
            weights,
            search,
            strength,
        }
    }

    #[must_use]
    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    /// Runs with a `ChaCha8Rng` seeded from the configured seed.
    pub fn run(&self) -> Result<SearchOutcome> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.search.seed);
        self.run_with_rng(&mut rng)
    }

    /// Estimates every cog's marginal value, then runs the configured restarts
    /// and returns the best member across all of them.
    ///
    /// All randomness is drawn from `rng` in a fixed order, so a seeded
    /// generator reproduces the run exactly.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<SearchOutcome> {
        let params = EstimateParams {
            weights: self.weights,
            samples_per_coord: self.strength.samples_per_coord,
            one_sigma: self.strength.one_sigma_probability,
        };
        estimate_marginals_with_rng(&self.template, &params, rng)?;

        tracing::info!(
            restarts = self.search.restarts,
            min_generations = self.search.min_generations,
            max_generations = self.search.max_generations,
            cogs = self.template.items().len(),
            "Search started"
        );

        let mut controller = IterationController::new(&self.search);
        let mut metrics = SearchMetrics::new();
        let mut best: Option<Member> = None;
        let mut restart_bests = Vec::with_capacity(self.search.restarts);

        while controller.next_restart() {
            let population = self.run_restart(&mut controller, &mut metrics, rng);
            let Some(restart_best) = population.into_best() else {
                continue;
            };
            restart_bests.push(restart_best.objective);
            if best
                .as_ref()
                .map_or(true, |b| restart_best.objective > b.objective)
            {
                best = Some(restart_best);
            }
            if let Some(b) = &best {
                tracing::info!(
                    restart = controller.restart_index(),
                    best_so_far = b.objective,
                    build_rate = b.placement.build_rate(),
                    flaggy_rate = b.placement.flaggy_rate(),
                    exp_mult = b.placement.experience_total(),
                    "Restart closed"
                );
            }
        }

        let best = best.ok_or(CoreError::EmptySearch)?;
        tracing::info!(
            objective = best.objective,
            generations = metrics.generations,
            crossovers = metrics.crossovers,
            point_mutations = metrics.point_mutations,
            skipped_updates = metrics.skipped_updates,
            "Search finished"
        );
        Ok(SearchOutcome {
            best: best.placement,
            objective: best.objective,
            restart_bests,
            metrics,
        })
    }

    fn run_restart<R: Rng>(
        &self,
        controller: &mut IterationController,
        metrics: &mut SearchMetrics,
        rng: &mut R,
    ) -> Population {
        self.template.reset_strengths();
        let placements = (0..self.search.population_size)
            .map(|_| Placement::random_with_rng(&self.template, rng))
            .collect();
        let mut population = Population::new(placements, self.weights);
        let baseline = Baseline::of(&population);

        tracing::info!(
            restart = controller.restart_index(),
            population_size = population.len(),
            "Restart opened"
        );

        loop {
            let best_now = population.best().map_or(0.0, |m| m.objective);
            if !controller.next_generation(improvement(best_now, baseline.best)) {
                break;
            }
            let generation = controller.generation_index();
            if generation % 10 == 0 {
                self.log_generation(generation, &population, &baseline);
            }
            while controller.next_mutation() {
                if controller.choose_crossover(rng) {
                    self.crossover_round(&mut population, metrics, rng);
                } else {
                    self.mutation_round(&mut population, metrics, rng);
                }
            }
            population.cull();
            metrics.record_generation();
        }
        population
    }

    fn log_generation(&self, generation: usize, population: &Population, baseline: &Baseline) {
        let value = |m: Option<&Member>| m.map_or(0.0, |m| m.objective);
        let pct = |current: f64, original: f64| (improvement(current, original) - 1.0) * 100.0;
        tracing::info!(
            generation,
            max_improvement_pct = pct(value(population.best()), baseline.best),
            p90_improvement_pct = pct(value(population.percentile(0.9)), baseline.p90),
            p50_improvement_pct = pct(value(population.median()), baseline.p50),
            "Generation"
        );
        if let Some(best) = population.best() {
            tracing::debug!("\n{}", best.placement.abbreviation_grid());
        }
    }

    fn crossover_round<R: Rng>(
        &self,
        population: &mut Population,
        metrics: &mut SearchMetrics,
        rng: &mut R,
    ) {
        let picks = population.sample_indices(2, rng);
        let (Some(a), Some(b)) = (
            picks.first().and_then(|&i| population.member(i)),
            picks.get(1).and_then(|&i| population.member(i)),
        ) else {
            return;
        };
        let child = a.placement.crossover_with_rng(&b.placement, rng);
        population.add(child);
        metrics.record_crossover();
    }

    fn mutation_round<R: Rng>(
        &self,
        population: &mut Population,
        metrics: &mut SearchMetrics,
        rng: &mut R,
    ) {
        let Some(parent) = population
            .sample_indices(1, rng)
            .first()
            .and_then(|&i| population.member(i))
        else {
            return;
        };
        let old_objective = parent.objective;
        let mut child = parent.placement.clone();
        let Some(mutation) = child.mutate_one_point(rng) else {
            metrics.record_skipped_mutation();
            return;
        };
        let new_objective = population.add(child);
        metrics.record_point_mutation();

        let outcome = reinforce(
            &self.template,
            &mutation,
            old_objective,
            new_objective,
            &self.strength,
        );
        if outcome == UpdateOutcome::Skipped {
            metrics.record_skipped_update();
            tracing::debug!(
                coord = %mutation.coord,
                evicted = mutation.evicted,
                placed = mutation.placed,
                "Strength update skipped"
            );
        }
    }
}
