use crate::config::SearchConfig;
use rand::Rng;

/// Drives the restart, generation and mutation-round loops.
///
/// Each `next_*` call answers whether another iteration of that loop should
/// run and advances the matching counter. A `false` answer resets the counter
/// so the loop can be entered again.
///
/// Generations keep running until `max_generations`, but once past the
/// early-stop threshold a plateau ends the restart: the improvement of the
/// best member over the restart's original population is accumulated across
/// generations, and when more than `max_running_total_len` generations pass
/// without the accumulated gain reaching `required_running_total`, the loop
/// exits.
#[derive(Debug, Clone)]
pub struct IterationController {
    config: SearchConfig,
    restart_count: usize,
    generation_count: usize,
    mutation_count: usize,
    running_total: f64,
    running_total_len: usize,
    previous_best_improve: f64,
}

impl IterationController {
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            config: config.clone(),
            restart_count: 0,
            generation_count: 0,
            mutation_count: 0,
            running_total: 0.0,
            running_total_len: 0,
            previous_best_improve: 1.0,
        }
    }

    /// Zero-based index of the current restart.
    #[must_use]
    pub fn restart_index(&self) -> usize {
        self.restart_count.saturating_sub(1)
    }

    /// Zero-based index of the current generation.
    #[must_use]
    pub fn generation_index(&self) -> usize {
        self.generation_count.saturating_sub(1)
    }

    #[must_use]
    pub fn running_total(&self) -> f64 {
        self.running_total
    }

    #[must_use]
    pub fn running_total_len(&self) -> usize {
        self.running_total_len
    }

    /// Generation count up to which plateaus never end a restart.
    #[must_use]
    pub fn early_stop_threshold(&self) -> f64 {
        let min = self.config.min_generations as f64;
        let max = self.config.max_generations as f64;
        min + (max - min) * self.config.early_stop_factor
    }

    /// Starts the next restart, if any remain, with a clean plateau window.
    pub fn next_restart(&mut self) -> bool {
        if self.restart_count >= self.config.restarts {
            return false;
        }
        self.restart_count += 1;
        self.generation_count = 0;
        self.mutation_count = 0;
        self.running_total = 0.0;
        self.running_total_len = 0;
        self.previous_best_improve = 1.0;
        true
    }

    /// Decides whether another generation runs, given the current ratio of the
    /// best objective to the original population's best.
    pub fn next_generation(&mut self, best_improve: f64) -> bool {
        let gen = self.generation_count;
        let keep_going = (gen as f64 <= self.early_stop_threshold()
            || self.running_total_len <= self.config.max_running_total_len)
            && gen <= self.config.max_generations;
        if !keep_going {
            self.generation_count = 0;
            return false;
        }

        let increment = best_improve - self.previous_best_improve;
        if increment + self.running_total >= self.config.required_running_total
            || gen <= self.config.min_generations
        {
            self.running_total = 0.0;
            self.running_total_len = 0;
        } else {
            self.running_total += increment;
            self.running_total_len += 1;
        }
        self.previous_best_improve = best_improve;
        self.generation_count += 1;
        true
    }

    /// Counts off the proposals of one generation.
    pub fn next_mutation(&mut self) -> bool {
        if self.mutation_count >= self.config.mutations_per_generation {
            self.mutation_count = 0;
            return false;
        }
        self.mutation_count += 1;
        true
    }

    pub fn choose_crossover<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.config.crossover_probability.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(min: usize, max: usize) -> SearchConfig {
        SearchConfig {
            restarts: 2,
            mutations_per_generation: 3,
            min_generations: min,
            max_generations: max,
            max_running_total_len: 2,
            required_running_total: 0.01,
            early_stop_factor: 0.5,
            ..Default::default()
        }
    }

    fn count_generations(
        controller: &mut IterationController,
        improve: impl Fn(usize) -> f64,
    ) -> usize {
        let mut n = 0;
        while controller.next_generation(improve(n)) {
            n += 1;
        }
        n
    }

    #[test]
    fn test_restart_loop_runs_configured_count() {
        let mut c = IterationController::new(&config(0, 0));
        assert!(c.next_restart());
        assert_eq!(c.restart_index(), 0);
        assert!(c.next_restart());
        assert!(!c.next_restart());
    }

    #[test]
    fn test_mutation_loop_resets_after_round() {
        let mut c = IterationController::new(&config(0, 0));
        for _ in 0..2 {
            assert_eq!(std::iter::from_fn(|| c.next_mutation().then_some(())).count(), 3);
        }
    }

    #[test]
    fn test_plateau_runs_to_threshold_then_stops() {
        let mut c = IterationController::new(&config(4, 20));
        c.next_restart();
        // Threshold 12: generations 0..=12 always run, then the window fills.
        let n = count_generations(&mut c, |_| 1.0);
        assert_eq!(c.early_stop_threshold(), 12.0);
        assert_eq!(n, 13);
    }

    #[test]
    fn test_steady_progress_runs_to_max() {
        let mut c = IterationController::new(&config(4, 20));
        c.next_restart();
        let n = count_generations(&mut c, |g| 1.0 + 0.02 * g as f64);
        assert_eq!(n, 21);
    }

    #[test]
    fn test_small_gains_accumulate_into_progress() {
        let mut c = IterationController::new(&config(0, 10));
        c.next_restart();
        assert!(c.next_generation(1.0));
        assert!(c.next_generation(1.006));
        assert_eq!(c.running_total_len(), 1);
        assert!(c.next_generation(1.012));
        assert_eq!(c.running_total_len(), 0);
        assert_eq!(c.running_total(), 0.0);
    }

    #[test]
    fn test_restart_clears_plateau_window() {
        let mut c = IterationController::new(&config(0, 10));
        c.next_restart();
        count_generations(&mut c, |_| 1.0);
        assert!(c.running_total_len() > 0);
        assert!(c.next_restart());
        assert_eq!(c.running_total_len(), 0);
        assert_eq!(c.generation_index(), 0);
    }

    #[test]
    fn test_crossover_probability_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut cfg = config(0, 0);
        cfg.crossover_probability = 0.0;
        let never = IterationController::new(&cfg);
        cfg.crossover_probability = 1.0;
        let always = IterationController::new(&cfg);
        for _ in 0..100 {
            assert!(!never.choose_crossover(&mut rng));
            assert!(always.choose_crossover(&mut rng));
        }
    }
}
