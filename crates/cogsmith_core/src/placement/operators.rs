use super::Placement;
use crate::item::ItemId;
use cogsmith_data::Coord;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::sync::Arc;

/// Outcome of [`Placement::mutate_one_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointMutation {
    pub coord: Coord,
    pub evicted: ItemId,
    pub placed: ItemId,
}

/// Probability of inheriting the first parent's cog at a cell.
fn inherit_probability(first: f64, second: f64) -> f64 {
    let p = first / (first + second);
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

impl Placement {
    /// Strength of the occupant at `coord` scaled by its estimated marginal value.
    ///
    /// Vacant cells contribute nothing. Cogs without an estimate count their
    /// strength alone.
    fn local_strength(&self, coord: Coord, occupant: Option<ItemId>) -> f64 {
        occupant
            .and_then(|id| self.template.item(id))
            .map_or(0.0, |item| {
                let median = item.marginal().map_or(1.0, |m| m.median);
                item.strength_at(coord) * median
            })
    }

    /// Builds a child holding this placement's cogs, cell by cell inherited
    /// from either parent in proportion to their local strengths.
    ///
    /// Cells are visited in random order. When the chosen cog is already used
    /// elsewhere in the child, the other parent's cog is tried, then any
    /// remaining spare.
    pub fn crossover_with_rng<R: Rng>(&self, other: &Placement, rng: &mut R) -> Placement {
        debug_assert!(Arc::ptr_eq(&self.template, &other.template));
        let mut child = Placement::new(&self.template);
        child.spares.extend(self.cells.iter().flatten().copied());
        child.spares.extend(self.spares.iter().copied());

        let mut order = self.template.mask().placeable().to_vec();
        order.shuffle(rng);
        for coord in order {
            let Some(idx) = coord.index() else { continue };
            let mine = self.occupant(coord);
            let theirs = other.occupant(coord);
            let p = inherit_probability(
                self.local_strength(coord, mine),
                self.local_strength(coord, theirs),
            );
            let (first, second) = if rng.gen::<f64>() < p {
                (mine, theirs)
            } else {
                (theirs, mine)
            };
            let pos = [first, second]
                .into_iter()
                .flatten()
                .find_map(|id| child.spares.iter().position(|&s| s == id))
                .or_else(|| child.random_spare(rng));
            if let Some(pos) = pos {
                child.place_spare(idx, pos);
            }
        }
        child
    }

    /// Swaps the cog at one random occupied cell for a spare.
    ///
    /// The replacement is drawn, preferring kinds not excluded at the cell,
    /// before the evicted cog joins the spares, so the cell always changes
    /// hands. Returns `None` when the shelf is empty or there are no spares.
    pub fn mutate_one_point<R: Rng>(&mut self, rng: &mut R) -> Option<PointMutation> {
        let coord = self
            .template
            .mask()
            .placeable()
            .iter()
            .copied()
            .filter(|&c| self.is_occupied(c))
            .choose(rng)?;
        let idx = coord.index()?;
        let evicted = self.cells[idx]?;
        let pos = self.pick_spare(coord, rng)?;
        let placed = self.spares[pos];
        self.place_spare(idx, pos);
        Some(PointMutation {
            coord,
            evicted,
            placed,
        })
    }
}
