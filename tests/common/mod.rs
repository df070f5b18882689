pub mod macros;

use cogsmith_core::config::{SearchConfig, StrengthConfig};
use cogsmith_core::{AvailabilityMask, ObjectiveWeights, Placement, Searcher, Template};
use cogsmith_data::{Boosts, Coord, ItemKind, ItemRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::sync::Arc;

#[allow(dead_code)]
pub struct ShelfBuilder {
    blocked: HashSet<Coord>,
    open_only: Option<HashSet<Coord>>,
    flaggies: HashSet<Coord>,
    records: Vec<ItemRecord>,
    seed: u64,
}

#[allow(dead_code)]
impl ShelfBuilder {
    pub fn new() -> Self {
        Self {
            blocked: HashSet::new(),
            open_only: None,
            flaggies: HashSet::new(),
            records: Vec::new(),
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_blocked(mut self, x: i32, y: i32) -> Self {
        self.blocked.insert(Coord::new(x, y));
        self
    }

    /// Blocks every cell except the listed ones.
    pub fn with_open_cells(mut self, cells: &[(i32, i32)]) -> Self {
        self.open_only = Some(cells.iter().map(|&(x, y)| Coord::new(x, y)).collect());
        self
    }

    /// Marks a flagged cell. The cell is blocked, as when read from disk.
    pub fn with_flaggy(mut self, x: i32, y: i32) -> Self {
        let coord = Coord::new(x, y);
        self.flaggies.insert(coord);
        self.blocked.insert(coord);
        self
    }

    pub fn with_item(mut self, record: ItemRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Adds `count` plain cogs with build rates 1, 2, ..., `count`.
    pub fn with_plain(mut self, count: u32) -> Self {
        self.records
            .extend((1..=count).map(|i| ItemRecord::plain(i, i % 3, 0.01 * f64::from(i % 4))));
        self
    }

    pub fn with_boost(mut self, kind: ItemKind, boosts: Boosts) -> Self {
        self.records.push(ItemRecord::boost(kind, 0, 0, 0.0, boosts));
        self
    }

    pub fn build_template(self) -> Arc<Template> {
        let mask = match &self.open_only {
            Some(open) => {
                let open: HashSet<Coord> = open.difference(&self.blocked).copied().collect();
                AvailabilityMask::with_open_cells(&open)
            }
            None => AvailabilityMask::new(&self.blocked),
        };
        Arc::new(Template::new(mask, &self.records, self.flaggies))
    }

    /// The template and a seeded generator for drawing placements from it.
    pub fn build(self) -> (Arc<Template>, ChaCha8Rng) {
        let rng = ChaCha8Rng::seed_from_u64(self.seed);
        (self.build_template(), rng)
    }
}

/// A small but complete search setup that finishes in a few milliseconds.
#[allow(dead_code)]
pub fn quick_searcher(seed: u64) -> Searcher {
    let (template, _) = ShelfBuilder::new()
        .with_plain(110)
        .with_boost(
            ItemKind::Plus,
            Boosts {
                build_rate: 0.5,
                ..Default::default()
            },
        )
        .with_boost(
            ItemKind::Yang,
            Boosts {
                build_rate: 0.2,
                flaggy_rate: 0.2,
                ..Default::default()
            },
        )
        .build();
    Searcher::new(
        template,
        ObjectiveWeights::new(1.0, 0.5, 10.0),
        SearchConfig {
            seed,
            restarts: 2,
            population_size: 10,
            mutations_per_generation: 8,
            min_generations: 2,
            max_generations: 5,
            ..Default::default()
        },
        StrengthConfig::default(),
    )
}

/// Number of cogs the placement accounts for, on the shelf or spare.
#[allow(dead_code)]
pub fn accounted_ids(placement: &Placement) -> Vec<usize> {
    let mut ids: Vec<usize> = placement
        .occupied()
        .map(|(_, item)| item.id())
        .chain(placement.spares().iter().copied())
        .collect();
    ids.sort_unstable();
    ids
}
