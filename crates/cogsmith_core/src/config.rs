//! Configuration management for search parameters.
//!
//! Strongly-typed configuration structures mapping to `cogsmith.toml`. Every
//! section and field is optional in the file; missing values take the
//! defaults below.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `cogsmith.toml` (overrides defaults)
//! 3. Command-line flags (seed, output path, log level)
//!
//! ## Example `cogsmith.toml`
//!
//! ```toml
//! [search]
//! seed = 42
//! population_size = 500
//! max_generations = 200
//!
//! [strength]
//! factor_base = 2.0
//!
//! [io]
//! items_path = "cogs.csv"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Restart, generation and mutation-round parameters of the genetic search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub seed: u64,
    pub restarts: usize,
    /// Members kept after every generation; also the size of each fresh population.
    pub population_size: usize,
    pub mutations_per_generation: usize,
    /// Chance that a proposal is a crossover rather than a point mutation.
    pub crossover_probability: f64,
    pub min_generations: usize,
    pub max_generations: usize,
    /// Plateau length, in generations, that ends a restart early.
    pub max_running_total_len: usize,
    /// Accumulated improvement that counts as progress and clears the plateau.
    pub required_running_total: f64,
    /// Fraction of the way from `min_generations` to `max_generations` before
    /// plateaus may end a restart.
    pub early_stop_factor: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: 133_742_069,
            restarts: 1,
            population_size: 2000,
            mutations_per_generation: 800,
            crossover_probability: 0.5,
            min_generations: 100,
            max_generations: 400,
            max_running_total_len: 10,
            required_running_total: 0.01,
            early_stop_factor: 0.5,
        }
    }
}

/// Strength-learning parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StrengthConfig {
    /// Base raised to the z-score to form the update factor.
    pub factor_base: f64,
    /// Per-update factor clamp, `[1/max, max]`.
    pub max_factor: Option<f64>,
    /// Cumulative clamp relative to the uniform weight.
    pub max_multiplier: Option<f64>,
    pub one_sigma_probability: f64,
    pub samples_per_coord: usize,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            factor_base: 2.0,
            max_factor: Some(4.0),
            max_multiplier: Some(16.0),
            one_sigma_probability: 0.3413,
            samples_per_coord: 1,
        }
    }
}

/// Inverse objective weights: how many units of each metric are worth the same.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ObjectiveConfig {
    pub inverse_build_weight: f64,
    pub inverse_flaggy_weight: f64,
    pub inverse_exp_weight: f64,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            inverse_build_weight: 7000.0,
            inverse_flaggy_weight: 2000.0,
            inverse_exp_weight: 3.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IoConfig {
    pub items_path: String,
    pub blocked_path: String,
    pub flaggies_path: Option<String>,
    pub output_path: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            items_path: "cog_datas.csv".to_string(),
            blocked_path: "empties_datas.csv".to_string(),
            flaggies_path: None,
            output_path: "output.txt".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub strength: StrengthConfig,
    pub objective: ObjectiveConfig,
    pub io: IoConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // Search validation
        let s = &self.search;
        anyhow::ensure!(s.restarts > 0, "Restart count must be positive");
        anyhow::ensure!(s.population_size >= 2, "Population size must be at least 2");
        anyhow::ensure!(
            (0.0..=1.0).contains(&s.crossover_probability),
            "Crossover probability must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            s.min_generations <= s.max_generations,
            "Min generations must not exceed max generations"
        );
        anyhow::ensure!(
            s.required_running_total.is_finite(),
            "Required running total must be finite"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&s.early_stop_factor),
            "Early stop factor must be in [0.0, 1.0]"
        );

        // Strength validation
        let st = &self.strength;
        anyhow::ensure!(st.factor_base > 1.0, "Factor base must be greater than 1");
        anyhow::ensure!(
            st.max_factor.map_or(true, |m| m >= 1.0),
            "Max factor must be at least 1"
        );
        anyhow::ensure!(
            st.max_multiplier.map_or(true, |m| m >= 1.0),
            "Max multiplier must be at least 1"
        );
        anyhow::ensure!(
            st.one_sigma_probability > 0.0 && st.one_sigma_probability < 0.5,
            "One-sigma probability must be in (0.0, 0.5)"
        );
        anyhow::ensure!(st.samples_per_coord > 0, "Samples per coordinate must be positive");

        // Objective validation
        let o = &self.objective;
        anyhow::ensure!(
            o.inverse_build_weight > 0.0
                && o.inverse_flaggy_weight > 0.0
                && o.inverse_exp_weight > 0.0,
            "Inverse objective weights must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// An invalid file is reported and replaced by defaults. A missing file is
    /// created with the defaults.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let Ok(content) = std::fs::read_to_string(path) {
            match Self::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to load config, using defaults"
                    );
                }
            }
        }
        let default = Self::default();
        if !path.exists() {
            if let Ok(toml_str) = toml::to_string(&default) {
                let _ = std::fs::write(path, toml_str);
            }
        }
        default
    }
}
