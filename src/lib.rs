//! # Cogsmith
//!
//! Finds a high-value arrangement of cogs on the cog shelf.
//!
//! The engine lives in `cogsmith_core`; this crate wires configuration, input
//! files and the objective-weight solve around it.

pub mod app;

pub use app::{run, search, solve_weights, Inputs};
