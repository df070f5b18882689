//! The shelf template shared by every placement of one search run.

use crate::item::{Item, ItemId, ItemLogic};
use crate::mask::AvailabilityMask;
use cogsmith_data::{Coord, ItemKind, ItemRecord, TOTAL_CELLS};
use std::collections::{HashMap, HashSet};

/// Mask, cog inventory, per-kind exclusion zones and flagged cells.
///
/// Built once per run and shared behind an `Arc` by all placements.
#[derive(Debug)]
pub struct Template {
    mask: AvailabilityMask,
    items: Vec<Item>,
    exclusions: HashMap<ItemKind, Vec<bool>>,
    flaggies: HashSet<Coord>,
}

impl Template {
    /// Creates the template and instantiates one cog per record, in order.
    #[must_use]
    pub fn new(mask: AvailabilityMask, records: &[ItemRecord], flaggies: HashSet<Coord>) -> Self {
        let items: Vec<Item> = records
            .iter()
            .enumerate()
            .map(|(id, record)| Item::from_record(id, record, &mask))
            .collect();

        let mut exclusions = HashMap::new();
        for kind in items.iter().map(Item::kind).filter(ItemKind::is_boost) {
            exclusions
                .entry(kind)
                .or_insert_with(|| exclusion_zone(&mask, kind));
        }

        tracing::debug!(
            items = items.len(),
            placeable = mask.placeable_count(),
            excluded_kinds = exclusions.len(),
            "Template built"
        );

        Self {
            mask,
            items,
            exclusions,
            flaggies,
        }
    }

    #[must_use]
    pub fn mask(&self) -> &AvailabilityMask {
        &self.mask
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> {
        0..self.items.len()
    }

    /// Whether `kind` should preferably not be placed at `coord`.
    ///
    /// Only boost kinds have exclusion zones, and only kinds present in the
    /// inventory are tracked.
    #[must_use]
    pub fn excludes(&self, coord: Coord, kind: ItemKind) -> bool {
        match (self.exclusions.get(&kind), coord.index()) {
            (Some(zone), Some(idx)) => zone[idx],
            _ => false,
        }
    }

    #[must_use]
    pub fn flaggies(&self) -> &HashSet<Coord> {
        &self.flaggies
    }

    #[must_use]
    pub fn is_flaggy(&self, coord: Coord) -> bool {
        self.flaggies.contains(&coord)
    }

    /// Resets every cog's strength table to uniform.
    pub fn reset_strengths(&self) {
        for item in &self.items {
            item.reset_strengths(&self.mask);
        }
    }
}

/// Placeable cells where more of the kind's influence falls off the grid than it tolerates.
fn exclusion_zone(mask: &AvailabilityMask, kind: ItemKind) -> Vec<bool> {
    let mut zone = vec![false; TOTAL_CELLS];
    for &coord in mask.placeable() {
        let oob = kind
            .influence_pattern()
            .iter()
            .filter(|&&offset| (coord + offset).is_out_of_bounds())
            .count();
        if oob > kind.max_tolerated_oob() {
            if let Some(idx) = coord.index() {
                zone[idx] = true;
            }
        }
    }
    zone
}
