//! The placement grid: one cog per placeable cell plus a pool of spares.
//!
//! Every cog of the template is either on the shelf or among the spares, never
//! both and never twice. All mutators preserve that multiset, and every change
//! to the cell array invalidates the cached metrics.

mod operators;
mod render;

pub use operators::PointMutation;

use crate::error::{CoreError, IllegalReason, Result};
use crate::item::{Item, ItemId, ItemLogic};
use crate::objective::ObjectiveWeights;
use crate::template::Template;
use cogsmith_data::{Coord, TOTAL_CELLS};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::cell::Cell;
use std::sync::Arc;

/// Lazily computed aggregate metrics, cleared on every assignment change.
#[derive(Debug, Clone, Default)]
struct MetricCache {
    build: Cell<Option<f64>>,
    flaggy: Cell<Option<f64>>,
    exp: Cell<Option<f64>>,
}

impl MetricCache {
    fn invalidate(&self) {
        self.build.set(None);
        self.flaggy.set(None);
        self.exp.set(None);
    }

    fn get_or(cell: &Cell<Option<f64>>, compute: impl FnOnce() -> f64) -> f64 {
        if let Some(v) = cell.get() {
            return v;
        }
        let v = compute();
        cell.set(Some(v));
        v
    }
}

/// An arrangement of the template's cogs on the shelf.
///
/// Cloning copies the cell array and the spare pool; the cogs themselves,
/// including their learned strengths, stay shared through the template.
#[derive(Debug, Clone)]
pub struct Placement {
    template: Arc<Template>,
    cells: Vec<Option<ItemId>>,
    spares: Vec<ItemId>,
    cache: MetricCache,
}

impl Placement {
    /// An empty shelf with no spares.
    #[must_use]
    pub fn new(template: &Arc<Template>) -> Self {
        Self {
            template: Arc::clone(template),
            cells: vec![None; TOTAL_CELLS],
            spares: Vec::new(),
            cache: MetricCache::default(),
        }
    }

    /// A shelf holding the whole inventory, laid out at random.
    pub fn random_with_rng<R: Rng>(template: &Arc<Template>, rng: &mut R) -> Self {
        let mut placement = Self::new(template);
        placement.spares.extend(template.item_ids());
        placement.randomize_fill(true, rng);
        placement
    }

    #[must_use]
    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    fn check_placeable(&self, coord: Coord) -> Result<usize> {
        let idx = coord.index().ok_or(CoreError::IllegalAssignment {
            coord,
            reason: IllegalReason::OutOfBounds,
        })?;
        if self.template.mask().is_blocked(coord) {
            return Err(CoreError::IllegalAssignment {
                coord,
                reason: IllegalReason::Blocked,
            });
        }
        Ok(idx)
    }

    /// Id of the cog at `coord`. Out-of-bounds and blocked cells read as empty.
    #[must_use]
    pub fn occupant(&self, coord: Coord) -> Option<ItemId> {
        if !self.template.mask().is_placeable(coord) {
            return None;
        }
        coord.index().and_then(|i| self.cells[i])
    }

    /// The cog at `coord`. Out-of-bounds and blocked cells read as empty.
    #[must_use]
    pub fn read(&self, coord: Coord) -> Option<&Item> {
        self.occupant(coord).map(|id| self.item(id))
    }

    #[must_use]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.occupant(coord).is_some()
    }

    #[must_use]
    pub fn is_flaggy(&self, coord: Coord) -> bool {
        self.template.is_flaggy(coord)
    }

    fn item(&self, id: ItemId) -> &Item {
        &self.template.items()[id]
    }

    /// Moves `item` from the spares to `coord`.
    ///
    /// A cog already at `coord` goes back to the spares first. Exclusion zones
    /// are ignored here.
    pub fn assign(&mut self, coord: Coord, item: ItemId) -> Result<()> {
        let idx = self.check_placeable(coord)?;
        if self.template.item(item).is_none() {
            return Err(CoreError::UnknownItem(item));
        }
        let pos = self
            .spares
            .iter()
            .position(|&id| id == item)
            .ok_or(CoreError::NotInSpares { item })?;
        self.place_spare(idx, pos);
        Ok(())
    }

    /// Moves the cog at `coord`, if any, to the spares and returns its id.
    pub fn evict(&mut self, coord: Coord) -> Option<ItemId> {
        let idx = self.check_placeable(coord).ok()?;
        let id = self.cells[idx].take()?;
        self.spares.push(id);
        self.cache.invalidate();
        Some(id)
    }

    /// Moves every placed cog to the spares.
    pub fn clear(&mut self) {
        let placeable = self.template.mask().placeable().to_vec();
        for coord in placeable {
            self.evict(coord);
        }
    }

    /// Adds cogs to the spares. Each id may enter a placement only once.
    pub fn seed_from_pool(&mut self, items: impl IntoIterator<Item = ItemId>) -> Result<()> {
        for item in items {
            if self.template.item(item).is_none() {
                return Err(CoreError::UnknownItem(item));
            }
            if self.spares.contains(&item) || self.cells.contains(&Some(item)) {
                return Err(CoreError::AlreadyPresent { item });
            }
            self.spares.push(item);
        }
        Ok(())
    }

    /// Seeds an empty placement with `items` and lays them out at random.
    pub fn instantiate_randomly<R: Rng>(
        &mut self,
        items: impl IntoIterator<Item = ItemId>,
        rng: &mut R,
    ) -> Result<()> {
        if self.occupied_count() > 0 || !self.spares.is_empty() {
            return Err(CoreError::AlreadyInstantiated);
        }
        self.seed_from_pool(items)?;
        self.randomize_fill(true, rng);
        Ok(())
    }

    /// Fills cells from the spares, visiting placeable cells in random order.
    ///
    /// With `restrict_to_vacant`, occupied cells are left alone; otherwise
    /// every cell is redrawn and its previous cog returns to the spares. Each
    /// draw prefers cogs whose kind is not excluded at the cell. Stops early
    /// once the spares run out. Returns the number of cogs placed.
    pub fn randomize_fill<R: Rng>(&mut self, restrict_to_vacant: bool, rng: &mut R) -> usize {
        let mut order = self.template.mask().placeable().to_vec();
        order.shuffle(rng);
        let mut placed = 0;
        for coord in order {
            if self.spares.is_empty() {
                break;
            }
            if restrict_to_vacant && self.is_occupied(coord) {
                continue;
            }
            if let (Some(idx), Some(pos)) = (coord.index(), self.pick_spare(coord, rng)) {
                self.place_spare(idx, pos);
                placed += 1;
            }
        }
        placed
    }

    /// Position in the spares of a random cog, preferring kinds not excluded at `coord`.
    fn pick_spare<R: Rng>(&self, coord: Coord, rng: &mut R) -> Option<usize> {
        let preferred = (0..self.spares.len())
            .filter(|&pos| {
                let kind = self.item(self.spares[pos]).kind();
                !self.template.excludes(coord, kind)
            })
            .choose(rng);
        preferred.or_else(|| self.random_spare(rng))
    }

    fn random_spare<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.spares.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.spares.len()))
        }
    }

    /// Moves `spares[pos]` into cell `idx`, returning any previous occupant to the spares.
    fn place_spare(&mut self, idx: usize, pos: usize) {
        let id = self.spares.remove(pos);
        if let Some(previous) = self.cells[idx].replace(id) {
            self.spares.push(previous);
        }
        self.cache.invalidate();
    }

    /// Placed cogs in placeable-cell order.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &Item)> + '_ {
        self.template
            .mask()
            .placeable()
            .iter()
            .filter_map(|&c| self.read(c).map(|item| (c, item)))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    #[must_use]
    pub fn vacant_count(&self) -> usize {
        self.template.mask().placeable_count() - self.occupied_count()
    }

    #[must_use]
    pub fn spares(&self) -> &[ItemId] {
        &self.spares
    }

    #[must_use]
    pub fn is_spare(&self, item: ItemId) -> bool {
        self.spares.contains(&item)
    }

    pub fn spare_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.spares.iter().map(|&id| self.item(id))
    }

    /// Sum over the boost cog's influence cells of `rate(neighbour) * magnitude`.
    fn neighbour_bonus(
        &self,
        coord: Coord,
        item: &Item,
        magnitude: f64,
        rate: fn(&Item) -> f64,
    ) -> f64 {
        item.kind()
            .influence_pattern()
            .iter()
            .filter_map(|&offset| self.read(coord + offset))
            .map(|neighbour| rate(neighbour) * magnitude)
            .sum()
    }

    /// Total build rate including build-rate boosts.
    #[must_use]
    pub fn build_rate(&self) -> f64 {
        MetricCache::get_or(&self.cache.build, || {
            let mut total = 0.0;
            for (coord, item) in self.occupied() {
                let boost = item.boosts().build_rate;
                if item.kind().is_boost() && boost > 0.0 {
                    total += self.neighbour_bonus(coord, item, boost, Item::build_rate);
                }
                total += item.build_rate();
            }
            total
        })
    }

    /// Total flaggy rate.
    ///
    /// Flaggy-rate boosts add to neighbouring flaggy rates. Flaggy-speed
    /// boosts do not add to anything directly: each influence cell that holds
    /// a flag contributes `speed / flag_count` to a correction, and the whole
    /// rate is scaled by `1 + correction`.
    #[must_use]
    pub fn flaggy_rate(&self) -> f64 {
        MetricCache::get_or(&self.cache.flaggy, || {
            let flag_count = self.template.flaggies().len() as f64;
            let mut total_rate = 0.0;
            let mut total_speed = 0.0;
            for (coord, item) in self.occupied() {
                if item.kind().is_boost() {
                    let boosts = item.boosts();
                    if boosts.flaggy_rate > 0.0 {
                        total_rate += self.neighbour_bonus(
                            coord,
                            item,
                            boosts.flaggy_rate,
                            Item::flaggy_rate,
                        );
                    }
                    if boosts.flaggy_speed > 0.0 {
                        let flagged = item
                            .kind()
                            .influence_pattern()
                            .iter()
                            .filter(|&&offset| self.is_flaggy(coord + offset))
                            .count();
                        if flagged > 0 {
                            total_speed += flagged as f64 * boosts.flaggy_speed / flag_count;
                        }
                    }
                }
                total_rate += item.flaggy_rate();
            }
            total_rate * (1.0 + total_speed)
        })
    }

    /// Sum of experience multipliers of placed cogs. Experience boosts have no effect.
    #[must_use]
    pub fn experience_total(&self) -> f64 {
        MetricCache::get_or(&self.cache.exp, || {
            self.occupied().map(|(_, item)| item.exp_mult()).sum()
        })
    }

    #[must_use]
    pub fn objective(&self, weights: &ObjectiveWeights) -> f64 {
        self.build_rate() * weights.build
            + self.flaggy_rate() * weights.flaggy
            + self.experience_total() * weights.exp
    }
}
