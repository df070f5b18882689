//! # Cogsmith Core
//!
//! The optimization engine behind cogsmith: it searches for a high-value
//! arrangement of cogs on a fixed 12 by 8 shelf.
//!
//! This crate contains:
//! - The availability mask and shared shelf template (blocked cells, exclusion zones)
//! - The cog model, including each cog's learned strength distribution
//! - The placement grid with its metrics and genetic operators
//! - A ranked population and the restart / generation / mutation controller
//! - Configuration, structured logging and search counters
//!
//! ## Determinism
//!
//! Every random choice draws from one caller-supplied RNG, so a run is fully
//! reproducible from its seed.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cogsmith_core::{AvailabilityMask, ObjectiveWeights, Placement, Template};
//! use cogsmith_data::ItemRecord;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let records = vec![ItemRecord::plain(40, 10, 0.1), ItemRecord::plain(25, 0, 0.0)];
//! let mask = AvailabilityMask::default();
//! let template = Arc::new(Template::new(mask, &records, Default::default()));
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let placement = Placement::random_with_rng(&template, &mut rng);
//! assert_eq!(placement.build_rate(), 65.0);
//! let value = placement.objective(&ObjectiveWeights::new(1.0, 0.0, 0.0));
//! assert_eq!(value, 65.0);
//! ```

/// Configuration management for search parameters
pub mod config;
/// Error types for engine operations
pub mod error;
/// Sampling of each cog's marginal contribution to the objective
pub mod estimate;
/// Cog instances and their type-specific influence patterns
pub mod item;
/// Blocked cells and the ordered list of placeable cells
pub mod mask;
/// Search counters and structured logging bootstrap
pub mod metrics;
/// Weighted objective over the three shelf metrics
pub mod objective;
/// The placement grid and its genetic operators
pub mod placement;
/// Placements ranked by objective value
pub mod population;
/// Restart, generation and mutation loops
pub mod search;
/// Robust order statistics
pub mod stats;
/// Per-cog strength distribution over placeable cells
pub mod strength;
/// Shared shelf template: mask, cogs, exclusion zones and flagged cells
pub mod template;

pub use config::AppConfig;
pub use error::{CoreError, IllegalReason};
pub use item::{Item, ItemId, ItemLogic};
pub use mask::AvailabilityMask;
pub use metrics::{init_logging, SearchMetrics};
pub use objective::ObjectiveWeights;
pub use placement::{Placement, PointMutation};
pub use population::{Member, Population};
pub use search::{SearchOutcome, Searcher};
pub use strength::{MarginalEstimate, StrengthTable};
pub use template::Template;
