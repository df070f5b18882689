//! Availability mask: which cells of the shelf can hold a cog.

use cogsmith_data::{Coord, TOTAL_CELLS};
use std::collections::HashSet;

/// Blocked cells plus the ordered list of placeable cells derived from them.
///
/// The placeable list is computed once, bottom row first and left to right,
/// and never reordered; sampling and iteration rely on that order being stable.
#[derive(Debug, Clone)]
pub struct AvailabilityMask {
    blocked: Vec<bool>,
    placeable: Vec<Coord>,
}

impl Default for AvailabilityMask {
    fn default() -> Self {
        Self::new(&HashSet::new())
    }
}

impl AvailabilityMask {
    /// Builds a mask from blocked coordinates. Out-of-bounds entries are ignored.
    #[must_use]
    pub fn new(blocked: &HashSet<Coord>) -> Self {
        let mut cells = vec![false; TOTAL_CELLS];
        for idx in blocked.iter().filter_map(Coord::index) {
            cells[idx] = true;
        }
        let placeable = Coord::all()
            .filter(|c| c.index().is_some_and(|i| !cells[i]))
            .collect();
        Self {
            blocked: cells,
            placeable,
        }
    }

    /// Mask whose only placeable cells are `open`.
    #[must_use]
    pub fn with_open_cells(open: &HashSet<Coord>) -> Self {
        let blocked: HashSet<Coord> = Coord::all().filter(|c| !open.contains(c)).collect();
        Self::new(&blocked)
    }

    #[must_use]
    pub fn is_blocked(&self, coord: Coord) -> bool {
        coord.index().is_some_and(|i| self.blocked[i])
    }

    /// In bounds and not blocked.
    #[must_use]
    pub fn is_placeable(&self, coord: Coord) -> bool {
        coord.index().is_some_and(|i| !self.blocked[i])
    }

    #[must_use]
    pub fn placeable(&self) -> &[Coord] {
        &self.placeable
    }

    #[must_use]
    pub fn placeable_count(&self) -> usize {
        self.placeable.len()
    }

    pub fn blocked(&self) -> impl Iterator<Item = Coord> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| Coord::from_index(i))
    }
}
