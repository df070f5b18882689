pub mod coord;
pub mod item;
