//! The run pipeline: read inputs, build the template, search, write the result.

pub mod weights;

pub use weights::solve_weights;

use anyhow::Context;
use cogsmith_core::config::IoConfig;
use cogsmith_core::{AppConfig, AvailabilityMask, SearchOutcome, Searcher, Template};
use cogsmith_data::{Coord, ItemKind, ItemRecord};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Everything read from the input files.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub records: Vec<ItemRecord>,
    pub blocked: HashSet<Coord>,
    pub flaggies: HashSet<Coord>,
}

impl Inputs {
    /// Reads the inventory, the blocked cells and, if configured, the flagged cells.
    pub fn load(io: &IoConfig) -> anyhow::Result<Self> {
        let records = cogsmith_io::read_items(&io.items_path)
            .with_context(|| format!("Failed to read cogs from {}", io.items_path))?;
        let blocked = cogsmith_io::read_blocked(&io.blocked_path)
            .with_context(|| format!("Failed to read blocked cells from {}", io.blocked_path))?;
        let flaggies = match &io.flaggies_path {
            Some(path) => cogsmith_io::read_flaggies(path)
                .with_context(|| format!("Failed to read flagged cells from {path}"))?,
            None => HashSet::new(),
        };
        tracing::info!(
            cogs = records.len(),
            blocked = blocked.len(),
            flaggies = flaggies.len(),
            "Inputs loaded"
        );
        Ok(Self {
            records,
            blocked,
            flaggies,
        })
    }

    /// Shared template for the search.
    ///
    /// Flags sit on the shelf, so their cells are blocked as well.
    #[must_use]
    pub fn template(&self) -> Arc<Template> {
        let unavailable: HashSet<Coord> = self.blocked.union(&self.flaggies).copied().collect();
        Arc::new(Template::new(
            AvailabilityMask::new(&unavailable),
            &self.records,
            self.flaggies.clone(),
        ))
    }

    /// Number of cogs of each kind, in kind order.
    #[must_use]
    pub fn kind_counts(&self) -> BTreeMap<ItemKind, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Runs the search over `inputs` with `config`.
pub fn search(config: &AppConfig, inputs: &Inputs) -> anyhow::Result<SearchOutcome> {
    let weights = solve_weights(&config.objective)?;
    let searcher = Searcher::new(
        inputs.template(),
        weights,
        config.search.clone(),
        config.strength.clone(),
    );
    Ok(searcher.run()?)
}

/// Loads inputs, searches and writes the best placement to the output path.
pub fn run(config: &AppConfig) -> anyhow::Result<SearchOutcome> {
    let inputs = Inputs::load(&config.io)?;
    let outcome = search(config, &inputs)?;
    cogsmith_io::write_placement(&config.io.output_path, &outcome.best)
        .with_context(|| format!("Failed to write {}", config.io.output_path))?;
    Ok(outcome)
}
