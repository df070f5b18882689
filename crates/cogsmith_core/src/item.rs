//! Cog instances and the type-specific behaviour of each kind.

use crate::mask::AvailabilityMask;
use crate::strength::{MarginalEstimate, StrengthTable};
use cogsmith_data::{
    Boosts, Coord, ItemArgs, ItemKind, ItemRecord, DEFAULT_CHARACTER_NAME, GRID_HEIGHT, GRID_WIDTH,
};
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Index of a cog within its template.
pub type ItemId = usize;

/// Capability interface over the closed set of cog kinds.
pub trait ItemLogic {
    /// Offsets, relative to the cog, of the cells its bonuses reach.
    fn influence_pattern(&self) -> &'static [Coord];
    /// How many offsets may fall off the grid before a cell is avoided.
    fn max_tolerated_oob(&self) -> usize;
    fn abbreviation(&self) -> char;
}

const fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

const fn line_pattern<const N: usize>(horizontal: bool, extent: i32) -> [Coord; N] {
    let mut out = [c(0, 0); N];
    let mut i = 0;
    let mut d = -extent;
    while d <= extent {
        if d != 0 {
            out[i] = if horizontal { c(d, 0) } else { c(0, d) };
            i += 1;
        }
        d += 1;
    }
    out
}

const YANG: [Coord; 12] = [
    c(-1, -1),
    c(-1, 0),
    c(-1, 1),
    c(0, -1),
    c(0, 1),
    c(1, -1),
    c(1, 0),
    c(1, 1),
    c(-2, 0),
    c(2, 0),
    c(0, -2),
    c(0, 2),
];
const X: [Coord; 4] = [c(-1, -1), c(-1, 1), c(1, -1), c(1, 1)];
const PLUS: [Coord; 4] = [c(-1, 0), c(1, 0), c(0, -1), c(0, 1)];
const LEFT: [Coord; 6] = [c(-2, -1), c(-2, 0), c(-2, 1), c(-1, -1), c(-1, 0), c(-1, 1)];
const RIGHT: [Coord; 6] = [c(2, -1), c(2, 0), c(2, 1), c(1, -1), c(1, 0), c(1, 1)];
const UP: [Coord; 6] = [c(-1, 1), c(0, 1), c(1, 1), c(-1, 2), c(0, 2), c(1, 2)];
const DOWN: [Coord; 6] = [c(-1, -1), c(0, -1), c(1, -1), c(-1, -2), c(0, -2), c(1, -2)];
const ROW: [Coord; 2 * GRID_WIDTH as usize] = line_pattern(true, GRID_WIDTH);
const COL: [Coord; 2 * GRID_HEIGHT as usize] = line_pattern(false, GRID_HEIGHT);
const OMNI: [Coord; 4] = [c(-2, -2), c(-2, 2), c(2, -2), c(2, 2)];

impl ItemLogic for ItemKind {
    fn influence_pattern(&self) -> &'static [Coord] {
        match self {
            ItemKind::Plain | ItemKind::Character => &[],
            ItemKind::Yang => &YANG,
            ItemKind::X => &X,
            ItemKind::Plus => &PLUS,
            ItemKind::Left => &LEFT,
            ItemKind::Right => &RIGHT,
            ItemKind::Up => &UP,
            ItemKind::Down => &DOWN,
            ItemKind::Row => &ROW,
            ItemKind::Col => &COL,
            ItemKind::Omni => &OMNI,
        }
    }

    fn max_tolerated_oob(&self) -> usize {
        match self {
            ItemKind::Plain | ItemKind::Character => 0,
            ItemKind::Yang => 4,
            ItemKind::X | ItemKind::Plus | ItemKind::Omni => 2,
            ItemKind::Left | ItemKind::Right | ItemKind::Up | ItemKind::Down => 3,
            ItemKind::Row => GRID_WIDTH as usize,
            ItemKind::Col => GRID_HEIGHT as usize,
        }
    }

    fn abbreviation(&self) -> char {
        match self {
            ItemKind::Plain => 'O',
            ItemKind::Character => 'C',
            ItemKind::Yang => 'Y',
            ItemKind::X => 'X',
            ItemKind::Plus => '+',
            ItemKind::Left => '<',
            ItemKind::Right => '>',
            ItemKind::Up => '^',
            ItemKind::Down => 'v',
            ItemKind::Row => '-',
            ItemKind::Col => '|',
            ItemKind::Omni => '*',
        }
    }
}

/// One cog of the inventory.
///
/// Base yields never change. The strength table and the marginal estimate are
/// learned state: the table is updated in place by the search and the estimate
/// is computed at most once. Placements refer to cogs by [`ItemId`] and share
/// them through the template, so learning is visible to every placement.
#[derive(Debug)]
pub struct Item {
    id: ItemId,
    kind: ItemKind,
    build_rate: f64,
    flaggy_rate: f64,
    exp_mult: f64,
    exp_rate: f64,
    name: Option<String>,
    boosts: Boosts,
    strength: RwLock<StrengthTable>,
    estimate: OnceLock<MarginalEstimate>,
}

impl Item {
    #[must_use]
    pub fn from_record(id: ItemId, record: &ItemRecord, mask: &AvailabilityMask) -> Self {
        let (exp_rate, name) = match &record.args {
            ItemArgs::Character { exp_rate, name, .. } => (
                *exp_rate,
                Some(name.clone().unwrap_or_else(|| DEFAULT_CHARACTER_NAME.to_string())),
            ),
            _ => (0.0, None),
        };
        Self {
            id,
            kind: record.kind,
            build_rate: f64::from(record.build_rate()),
            flaggy_rate: f64::from(record.flaggy_rate()),
            exp_mult: record.exp_mult(),
            exp_rate,
            name,
            boosts: record.boosts(),
            strength: RwLock::new(StrengthTable::uniform(mask)),
            estimate: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    #[must_use]
    pub fn build_rate(&self) -> f64 {
        self.build_rate
    }

    #[must_use]
    pub fn flaggy_rate(&self) -> f64 {
        self.flaggy_rate
    }

    #[must_use]
    pub fn exp_mult(&self) -> f64 {
        self.exp_mult
    }

    /// Experience rate of a character; zero for every other kind.
    #[must_use]
    pub fn exp_rate(&self) -> f64 {
        self.exp_rate
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn boosts(&self) -> Boosts {
        self.boosts
    }

    #[must_use]
    pub fn strength_at(&self, coord: Coord) -> f64 {
        self.strength.read().unwrap_or_else(|e| e.into_inner()).get(coord)
    }

    /// Copy of the current strength table.
    #[must_use]
    pub fn strengths(&self) -> StrengthTable {
        self.strength.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// See [`StrengthTable::update`].
    pub fn update_strength(
        &self,
        coord: Coord,
        factor: f64,
        max_factor: Option<f64>,
        max_multiplier: Option<f64>,
    ) -> bool {
        self.strength
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .update(coord, factor, max_factor, max_multiplier)
    }

    /// Resets the strength table to uniform over `mask`.
    pub fn reset_strengths(&self, mask: &AvailabilityMask) {
        *self.strength.write().unwrap_or_else(|e| e.into_inner()) = StrengthTable::uniform(mask);
    }

    /// The memoized marginal estimate, if it has been computed.
    #[must_use]
    pub fn marginal(&self) -> Option<MarginalEstimate> {
        self.estimate.get().copied()
    }

    /// Returns the memoized estimate, computing it with `f` on first use.
    pub fn marginal_or_init(&self, f: impl FnOnce() -> MarginalEstimate) -> MarginalEstimate {
        *self.estimate.get_or_init(f)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type:               {}", self.kind)?;
        if self.build_rate > 0.0 {
            write!(f, "\nBuild rate:         {}", self.build_rate)?;
        }
        if self.flaggy_rate > 0.0 {
            write!(f, "\nFlaggy rate:        {}", self.flaggy_rate)?;
        }
        if self.exp_mult > 0.0 {
            write!(f, "\nExp rate:           {}%", percent(self.exp_mult))?;
        }
        if let Some(name) = &self.name {
            write!(f, "\nName:               {name}")?;
        }
        let b = self.boosts;
        for (label, value) in [
            ("Build rate boost:  ", b.build_rate),
            ("Flaggy rate boost: ", b.flaggy_rate),
            ("Flaggy speed boost:", b.flaggy_speed),
            ("Exp boost:         ", b.exp),
        ] {
            if value > 0.0 {
                write!(f, "\n{label} {}%", percent(value))?;
            }
        }
        Ok(())
    }
}

/// Whole percent, truncated toward zero as the game displays it.
fn percent(fraction: f64) -> i64 {
    (fraction * 100.0).trunc() as i64
}
