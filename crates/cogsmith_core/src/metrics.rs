//! Search counters and logging bootstrap.
//!
//! Progress is reported through structured `tracing` events; the counters
//! below are returned with the search outcome.

use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Counts of what the mutation rounds did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchMetrics {
    pub crossovers: u64,
    pub point_mutations: u64,
    /// Strength updates skipped for a zero combined spread or a non-finite factor.
    pub skipped_updates: u64,
    /// Point mutations that found no spare to swap in.
    pub skipped_mutations: u64,
    pub generations: u64,
}

impl SearchMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_crossover(&mut self) {
        self.crossovers += 1;
    }

    pub fn record_point_mutation(&mut self) {
        self.point_mutations += 1;
    }

    pub fn record_skipped_update(&mut self) {
        self.skipped_updates += 1;
    }

    pub fn record_skipped_mutation(&mut self) {
        self.skipped_mutations += 1;
    }

    pub fn record_generation(&mut self) {
        self.generations += 1;
    }

    /// Share of proposals that were crossovers.
    #[must_use]
    pub fn crossover_share(&self) -> f64 {
        let total = self.crossovers + self.point_mutations + self.skipped_mutations;
        if total == 0 {
            0.0
        } else {
            self.crossovers as f64 / total as f64
        }
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level`. Calling this more than once is harmless.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = SearchMetrics::new();
        assert_eq!(metrics.crossovers, 0);
        assert_eq!(metrics.crossover_share(), 0.0);
    }

    #[test]
    fn test_crossover_share() {
        let mut metrics = SearchMetrics::new();
        metrics.record_crossover();
        metrics.record_point_mutation();
        metrics.record_point_mutation();
        metrics.record_skipped_mutation();
        assert_eq!(metrics.crossover_share(), 0.25);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging("info");
        init_logging("debug");
    }
}
