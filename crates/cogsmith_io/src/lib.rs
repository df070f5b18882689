//! # Cogsmith IO
//!
//! Input and output adapters around the engine.
//!
//! This crate provides:
//! - Readers for the cog inventory and the blocked and flagged cell lists,
//!   failing with row- and column-specific errors on malformed input
//! - The results writer for the best placement's text rendering

/// Error types and result aliases for reading and writing
pub mod error;
/// Readers for cog, blocked-cell and flagged-cell CSV files
pub mod readers;
/// Header-keyed CSV table with typed field access
pub mod table;
/// Results writer
pub mod writer;

pub use error::{FieldKind, ReadError, Result};
pub use readers::{
    parse_blocked, parse_flaggies, parse_items, read_blocked, read_flaggies, read_items,
};
pub use writer::write_placement;
