//! Learned per-cog preference over placeable cells.

use crate::mask::AvailabilityMask;
use cogsmith_data::{Coord, TOTAL_CELLS};

/// Robust statistics of one cog's sampled contribution to the objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginalEstimate {
    /// Median objective delta from placing the cog.
    pub median: f64,
    /// Half the width of the central one-sigma-equivalent percentile band.
    pub spread: f64,
}

/// A normalized, non-negative weight per placeable cell.
///
/// Weights of non-placeable cells are zero and stay zero. After every update
/// the table sums to one.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthTable {
    weights: Vec<f64>,
    start_value: f64,
}

impl StrengthTable {
    /// Uniform weights over the placeable cells of `mask`.
    #[must_use]
    pub fn uniform(mask: &AvailabilityMask) -> Self {
        let mut weights = vec![0.0; TOTAL_CELLS];
        let n = mask.placeable_count();
        let start_value = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        for idx in mask.placeable().iter().filter_map(Coord::index) {
            weights[idx] = start_value;
        }
        Self {
            weights,
            start_value,
        }
    }

    #[must_use]
    pub fn get(&self, coord: Coord) -> f64 {
        coord.index().map_or(0.0, |i| self.weights[i])
    }

    /// The uniform weight the table started from.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Multiplies the weight at `coord` by `factor` and renormalizes.
    ///
    /// With `max_factor`, the factor is first clamped to
    /// `[1 / max_factor, max_factor]`. With `max_multiplier`, the resulting
    /// weight is clamped to `[start / max_multiplier, start * max_multiplier]`
    /// before renormalizing.
    ///
    /// Returns `false` and leaves the table untouched when the cell is not
    /// placeable or the factor is not a finite positive number.
    pub fn update(
        &mut self,
        coord: Coord,
        factor: f64,
        max_factor: Option<f64>,
        max_multiplier: Option<f64>,
    ) -> bool {
        let Some(idx) = coord.index() else {
            return false;
        };
        let current = self.weights[idx];
        if current <= 0.0 || !factor.is_finite() || factor <= 0.0 {
            return false;
        }

        let factor = match max_factor {
            Some(m) if m >= 1.0 => factor.clamp(1.0 / m, m),
            _ => factor,
        };
        let mut updated = current * factor;
        if let Some(m) = max_multiplier.filter(|m| *m >= 1.0) {
            updated = updated.clamp(self.start_value / m, self.start_value * m);
        }
        self.weights[idx] = updated;

        let total = self.sum();
        if total > 0.0 && total.is_finite() {
            for w in &mut self.weights {
                *w /= total;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn open_mask(n: i32) -> AvailabilityMask {
        let open: HashSet<Coord> = (0..n).map(|x| Coord::new(x, 0)).collect();
        AvailabilityMask::with_open_cells(&open)
    }

    #[test]
    fn test_uniform_sums_to_one() {
        let table = StrengthTable::uniform(&open_mask(4));
        assert!((table.sum() - 1.0).abs() < 1e-12);
        assert_eq!(table.start_value(), 0.25);
        assert_eq!(table.get(Coord::new(2, 0)), 0.25);
        assert_eq!(table.get(Coord::new(2, 1)), 0.0);
    }

    #[test]
    fn test_update_shifts_mass_and_renormalizes() {
        let mut table = StrengthTable::uniform(&open_mask(4));
        assert!(table.update(Coord::new(0, 0), 2.0, None, None));
        // 0.5 / (0.5 + 0.75)
        assert!((table.get(Coord::new(0, 0)) - 0.4).abs() < 1e-12);
        assert!((table.get(Coord::new(1, 0)) - 0.2).abs() < 1e-12);
        assert!((table.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_factor_clamps_step() {
        let mut clamped = StrengthTable::uniform(&open_mask(4));
        let mut reference = StrengthTable::uniform(&open_mask(4));
        clamped.update(Coord::new(0, 0), 100.0, Some(4.0), None);
        reference.update(Coord::new(0, 0), 4.0, None, None);
        assert_eq!(clamped, reference);

        let mut low = StrengthTable::uniform(&open_mask(4));
        low.update(Coord::new(0, 0), 1e-9, Some(4.0), None);
        let ratio = low.get(Coord::new(0, 0)) / low.get(Coord::new(1, 0));
        assert!((ratio - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_max_multiplier_clamps_weight() {
        let mut table = StrengthTable::uniform(&open_mask(4));
        table.update(Coord::new(0, 0), 1000.0, None, Some(2.0));
        // Raw weight capped at 0.25 * 2 = 0.5 before renormalizing.
        assert!((table.get(Coord::new(0, 0)) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_updates_are_skipped() {
        let mut table = StrengthTable::uniform(&open_mask(4));
        let before = table.clone();
        assert!(!table.update(Coord::new(0, 3), 2.0, None, None));
        assert!(!table.update(Coord::new(-1, 0), 2.0, None, None));
        assert!(!table.update(Coord::new(0, 0), f64::INFINITY, None, None));
        assert!(!table.update(Coord::new(0, 0), f64::NAN, Some(4.0), None));
        assert!(!table.update(Coord::new(0, 0), 0.0, None, None));
        assert_eq!(table, before);
    }
}
