use super::Placement;
use crate::item::ItemLogic;
use cogsmith_data::{Coord, GRID_HEIGHT, GRID_WIDTH, TOTAL_CELLS};
use std::fmt;

const CELL_WIDTH: usize = 4;

impl Placement {
    /// Lays out one label per cell, top row first, with a blank line between rows.
    fn grid_text(labels: &[String]) -> String {
        (0..GRID_HEIGHT)
            .rev()
            .map(|y| {
                let line: String = (0..GRID_WIDTH)
                    .filter_map(|x| Coord::new(x, y).index())
                    .map(|idx| format!("{:<width$}", labels[idx], width = CELL_WIDTH))
                    .collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn cell_label(&self, coord: Coord, occupied: impl FnOnce() -> String) -> String {
        if self.template.mask().is_blocked(coord) {
            "E".to_string()
        } else if !self.is_occupied(coord) {
            "e".to_string()
        } else {
            occupied()
        }
    }

    /// Grid of cog-kind abbreviations; `E` marks blocked cells, `e` vacant ones.
    #[must_use]
    pub fn abbreviation_grid(&self) -> String {
        let labels: Vec<String> = Coord::all()
            .map(|coord| {
                self.cell_label(coord, || {
                    self.read(coord)
                        .map(|item| item.kind().abbreviation().to_string())
                        .unwrap_or_default()
                })
            })
            .collect();
        Self::grid_text(&labels)
    }

    /// Grid numbering occupied cells in iteration order, matching the `Cog i` listing.
    #[must_use]
    pub fn numbered_grid(&self) -> String {
        let mut next = 0;
        let mut labels = Vec::with_capacity(TOTAL_CELLS);
        for coord in Coord::all() {
            labels.push(self.cell_label(coord, || {
                next += 1;
                next.to_string()
            }));
        }
        Self::grid_text(&labels)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n\n{}", self.abbreviation_grid(), self.numbered_grid())?;
        for (i, (coord, item)) in self.occupied().enumerate() {
            write!(f, "\n\n\nCog {}\nCoords:            {coord}\n{item}", i + 1)?;
        }
        for item in self.spare_items() {
            write!(f, "\n\n\nSpare Cog\n{item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::AvailabilityMask;
    use crate::template::Template;
    use cogsmith_data::{Boosts, ItemKind, ItemRecord};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn small_shelf() -> Placement {
        let blocked: HashSet<Coord> = [Coord::new(1, 0)].into_iter().collect();
        let records = [
            ItemRecord::plain(10, 0, 0.0),
            ItemRecord::boost(ItemKind::Up, 5, 0, 0.0, Boosts::default()),
            ItemRecord::plain(1, 0, 0.0),
        ];
        let template = Arc::new(Template::new(
            AvailabilityMask::new(&blocked),
            &records,
            HashSet::new(),
        ));
        let mut p = Placement::new(&template);
        p.seed_from_pool([0, 1, 2]).unwrap();
        p.assign(Coord::new(0, 0), 0).unwrap();
        p.assign(Coord::new(2, 0), 1).unwrap();
        p
    }

    #[test]
    fn test_bottom_row_is_printed_last() {
        let p = small_shelf();
        let grid = p.abbreviation_grid();
        let rows: Vec<&str> = grid.split("\n\n").collect();
        assert_eq!(rows.len(), GRID_HEIGHT as usize);
        assert!(rows[0].starts_with("e   e"));
        assert!(rows[7].starts_with("O   E   ^   e"));
    }

    #[test]
    fn test_numbered_grid_counts_occupied_cells() {
        let p = small_shelf();
        let grid = p.numbered_grid();
        let bottom = grid.rsplit("\n\n").next().unwrap();
        assert!(bottom.starts_with("1   E   2   e"));
    }

    #[test]
    fn test_display_lists_cogs_then_spares() {
        let text = small_shelf().to_string();
        let cog1 = text
            .find("Cog 1\nCoords:            (0, 0)\nType:               Cog")
            .unwrap();
        let cog2 = text
            .find("Cog 2\nCoords:            (2, 0)\nType:               Up_Cog")
            .unwrap();
        let spare = text.find("Spare Cog\nType:               Cog").unwrap();
        assert!(cog1 < cog2 && cog2 < spare);
        assert!(!text.ends_with('\n'));
    }
}
