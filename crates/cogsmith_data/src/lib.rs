//! Plain data shared by the cogsmith crates: grid coordinates, item kinds and
//! the typed records read from input files.

pub mod data;

pub use data::coord::{Coord, GRID_HEIGHT, GRID_WIDTH, TOTAL_CELLS};
pub use data::item::{Boosts, ItemArgs, ItemKind, ItemRecord, DEFAULT_CHARACTER_NAME};
