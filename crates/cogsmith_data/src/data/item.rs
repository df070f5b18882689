use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name given to characters whose record leaves the name blank.
pub const DEFAULT_CHARACTER_NAME: &str = "Unnamed";

/// The closed set of cog types.
///
/// Every kind except `Plain` and `Character` is a boost kind with its own
/// neighbour-influence shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// A cog without adjacency bonuses.
    Plain,
    /// A player character standing on the shelf.
    Character,
    /// Ring of eight neighbours plus the four cells two steps away.
    Yang,
    /// The four diagonal neighbours.
    X,
    /// The four orthogonal neighbours.
    Plus,
    /// Two columns to the left.
    Left,
    /// Two columns to the right.
    Right,
    /// Two rows above.
    Up,
    /// Two rows below.
    Down,
    /// The whole row.
    Row,
    /// The whole column.
    Col,
    /// The four cells two steps away diagonally.
    Omni,
}

impl ItemKind {
    pub const ALL: [ItemKind; 12] = [
        ItemKind::Plain,
        ItemKind::Character,
        ItemKind::Yang,
        ItemKind::X,
        ItemKind::Plus,
        ItemKind::Left,
        ItemKind::Right,
        ItemKind::Up,
        ItemKind::Down,
        ItemKind::Row,
        ItemKind::Col,
        ItemKind::Omni,
    ];

    /// The type tag used in input files.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            ItemKind::Plain => "Cog",
            ItemKind::Character => "Character",
            ItemKind::Yang => "Yang_Cog",
            ItemKind::X => "X_Cog",
            ItemKind::Plus => "Plus_Cog",
            ItemKind::Left => "Left_Cog",
            ItemKind::Right => "Right_Cog",
            ItemKind::Up => "Up_Cog",
            ItemKind::Down => "Down_Cog",
            ItemKind::Row => "Row_Cog",
            ItemKind::Col => "Col_Cog",
            ItemKind::Omni => "Omni_Cog",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag.trim())
    }

    #[must_use]
    pub const fn is_boost(&self) -> bool {
        !matches!(self, ItemKind::Plain | ItemKind::Character)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Conditional bonus magnitudes of a boost cog, as fractions (0.15 = 15%).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Boosts {
    pub build_rate: f64,
    pub flaggy_rate: f64,
    pub flaggy_speed: f64,
    pub exp: f64,
}

/// Constructor arguments, shaped by the kind of cog they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemArgs {
    Plain {
        build_rate: u32,
        flaggy_rate: u32,
        exp_mult: f64,
    },
    Character {
        build_rate: u32,
        flaggy_rate: u32,
        exp_rate: f64,
        name: Option<String>,
    },
    Boost {
        build_rate: u32,
        flaggy_rate: u32,
        exp_mult: f64,
        boosts: Boosts,
    },
}

/// One row of the cog inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub kind: ItemKind,
    pub args: ItemArgs,
}

impl ItemRecord {
    #[must_use]
    pub fn plain(build_rate: u32, flaggy_rate: u32, exp_mult: f64) -> Self {
        Self {
            kind: ItemKind::Plain,
            args: ItemArgs::Plain {
                build_rate,
                flaggy_rate,
                exp_mult,
            },
        }
    }

    #[must_use]
    pub fn character(
        build_rate: u32,
        flaggy_rate: u32,
        exp_rate: f64,
        name: Option<String>,
    ) -> Self {
        Self {
            kind: ItemKind::Character,
            args: ItemArgs::Character {
                build_rate,
                flaggy_rate,
                exp_rate,
                name,
            },
        }
    }

    /// A boost cog. `kind` must be a boost kind.
    #[must_use]
    pub fn boost(
        kind: ItemKind,
        build_rate: u32,
        flaggy_rate: u32,
        exp_mult: f64,
        boosts: Boosts,
    ) -> Self {
        debug_assert!(kind.is_boost(), "{kind} is not a boost kind");
        Self {
            kind,
            args: ItemArgs::Boost {
                build_rate,
                flaggy_rate,
                exp_mult,
                boosts,
            },
        }
    }

    #[must_use]
    pub fn build_rate(&self) -> u32 {
        match &self.args {
            ItemArgs::Plain { build_rate, .. }
            | ItemArgs::Character { build_rate, .. }
            | ItemArgs::Boost { build_rate, .. } => *build_rate,
        }
    }

    #[must_use]
    pub fn flaggy_rate(&self) -> u32 {
        match &self.args {
            ItemArgs::Plain { flaggy_rate, .. }
            | ItemArgs::Character { flaggy_rate, .. }
            | ItemArgs::Boost { flaggy_rate, .. } => *flaggy_rate,
        }
    }

    /// Experience multiplier; characters carry an experience rate instead and report zero here.
    #[must_use]
    pub fn exp_mult(&self) -> f64 {
        match &self.args {
            ItemArgs::Plain { exp_mult, .. } | ItemArgs::Boost { exp_mult, .. } => *exp_mult,
            ItemArgs::Character { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn boosts(&self) -> Boosts {
        match &self.args {
            ItemArgs::Boost { boosts, .. } => *boosts,
            _ => Boosts::default(),
        }
    }
}
