//! Error types for cogsmith_core.
//!
//! These errors signal misuse of the placement API. The search's own
//! operators only ever target placeable cells and never produce them.

use crate::item::ItemId;
use cogsmith_data::Coord;
use thiserror::Error;

/// Why a cell cannot hold a cog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    OutOfBounds,
    Blocked,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::OutOfBounds => f.write_str("outside the grid"),
            IllegalReason::Blocked => f.write_str("blocked"),
        }
    }
}

/// Main error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Assignment to a cell that is out of bounds or blocked
    #[error("Cannot place a cog at {coord}: cell is {reason}")]
    IllegalAssignment {
        coord: Coord,
        reason: IllegalReason,
    },

    /// The cog is already placed on the shelf
    #[error("Cog {item} is not among the spares")]
    NotInSpares { item: ItemId },

    /// The cog is already part of this placement
    #[error("Cog {item} is already on the shelf or among the spares")]
    AlreadyPresent { item: ItemId },

    /// Random instantiation on a placement that already holds cogs
    #[error("Placement is already instantiated")]
    AlreadyInstantiated,

    /// Id outside the template's cog list
    #[error("Unknown cog id {0}")]
    UnknownItem(ItemId),

    /// No restart produced a population member
    #[error("Search produced no placement")]
    EmptySearch,
}

/// Result type alias for cogsmith_core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
