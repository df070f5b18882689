//! Readers for the cog inventory and the blocked / flagged cell lists.
//!
//! Every reader comes in two forms: `parse_*` works on text already in memory
//! and `read_*` loads a file first. Malformed input fails the whole read.

use crate::error::{FieldKind, ReadError, Result};
use crate::table::Table;
use cogsmith_data::{Boosts, Coord, ItemKind, ItemRecord, GRID_HEIGHT, GRID_WIDTH};
use std::collections::HashSet;
use std::path::Path;

pub const COG_TYPE: &str = "cog type";
pub const BUILD_RATE: &str = "build_rate";
pub const FLAGGY_RATE: &str = "flaggy_rate";
pub const EXP_MULT: &str = "exp_mult";
pub const EXP_RATE: &str = "exp_rate";
pub const NAME: &str = "name";
pub const BUILD_RATE_BOOST: &str = "build_rate_boost";
pub const FLAGGY_RATE_BOOST: &str = "flaggy_rate_boost";
pub const FLAGGY_SPEED: &str = "flaggy_speed";
pub const EXP_RATE_BOOST: &str = "exp_rate_boost";

pub const EMPTIES_X: &str = "empties_x";
pub const EMPTIES_Y: &str = "empties_y";
pub const FLAGGIES_X: &str = "flaggies_x";
pub const FLAGGIES_Y: &str = "flaggies_y";

fn read_text(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

fn file_label(path: &Path) -> String {
    path.display().to_string()
}

/// Parses the cog inventory.
///
/// Columns: `cog type`, `build_rate`, `flaggy_rate`, then `exp_mult` for
/// everything but characters, `exp_rate` and an optional `name` for
/// characters, and the four boost magnitudes for boost kinds. Empty numeric
/// fields read as zero.
pub fn parse_items(file: &str, text: &str) -> Result<Vec<ItemRecord>> {
    let table = Table::parse(file, text);
    table.require_columns(&[COG_TYPE, BUILD_RATE, FLAGGY_RATE])?;
    (0..table.len()).map(|row| parse_item(&table, row)).collect()
}

fn parse_item(table: &Table, row: usize) -> Result<ItemRecord> {
    let tag = table.text(row, COG_TYPE)?;
    let kind = ItemKind::from_tag(tag).ok_or_else(|| {
        ReadError::invalid_field(table.file(), row, COG_TYPE, FieldKind::CogType, tag)
    })?;
    let build_rate = table.non_negative_integer(row, BUILD_RATE)?;
    let flaggy_rate = table.non_negative_integer(row, FLAGGY_RATE)?;

    let record = match kind {
        ItemKind::Character => {
            let exp_rate = table.non_negative_real(row, EXP_RATE)?;
            let name = if table.has_column(NAME) {
                Some(table.text(row, NAME)?.to_string()).filter(|n| !n.is_empty())
            } else {
                None
            };
            ItemRecord::character(build_rate, flaggy_rate, exp_rate, name)
        }
        ItemKind::Plain => {
            ItemRecord::plain(build_rate, flaggy_rate, table.non_negative_real(row, EXP_MULT)?)
        }
        _ => {
            let exp_mult = table.non_negative_real(row, EXP_MULT)?;
            let boosts = Boosts {
                build_rate: table.non_negative_real(row, BUILD_RATE_BOOST)?,
                flaggy_rate: table.non_negative_real(row, FLAGGY_RATE_BOOST)?,
                flaggy_speed: table.non_negative_real(row, FLAGGY_SPEED)?,
                exp: table.non_negative_real(row, EXP_RATE_BOOST)?,
            };
            ItemRecord::boost(kind, build_rate, flaggy_rate, exp_mult, boosts)
        }
    };
    Ok(record)
}

pub fn read_items(path: impl AsRef<Path>) -> Result<Vec<ItemRecord>> {
    let path = path.as_ref();
    let records = parse_items(&file_label(path), &read_text(path)?)?;
    tracing::debug!(path = %path.display(), cogs = records.len(), "Cog inventory read");
    Ok(records)
}

/// Parses a list of shelf coordinates from the named x and y columns.
pub fn parse_coords(
    file: &str,
    text: &str,
    x_column: &str,
    y_column: &str,
) -> Result<HashSet<Coord>> {
    let table = Table::parse(file, text);
    table.require_columns(&[x_column, y_column])?;
    (0..table.len())
        .map(|row| {
            let x = bounded(&table, row, x_column, GRID_WIDTH)?;
            let y = bounded(&table, row, y_column, GRID_HEIGHT)?;
            Ok(Coord::new(x, y))
        })
        .collect()
}

fn bounded(table: &Table, row: usize, column: &str, limit: i32) -> Result<i32> {
    let value = table.integer(row, column)?;
    i32::try_from(value)
        .ok()
        .filter(|v| (0..limit).contains(v))
        .ok_or_else(|| ReadError::OutOfBounds {
            file: table.file().to_string(),
            row,
            column: column.to_string(),
            value,
            limit,
        })
}

/// Parses the blocked cells (`empties_x`, `empties_y`).
pub fn parse_blocked(file: &str, text: &str) -> Result<HashSet<Coord>> {
    parse_coords(file, text, EMPTIES_X, EMPTIES_Y)
}

pub fn read_blocked(path: impl AsRef<Path>) -> Result<HashSet<Coord>> {
    let path = path.as_ref();
    parse_blocked(&file_label(path), &read_text(path)?)
}

/// Parses the flagged cells (`flaggies_x`, `flaggies_y`).
pub fn parse_flaggies(file: &str, text: &str) -> Result<HashSet<Coord>> {
    parse_coords(file, text, FLAGGIES_X, FLAGGIES_Y)
}

pub fn read_flaggies(path: impl AsRef<Path>) -> Result<HashSet<Coord>> {
    let path = path.as_ref();
    parse_flaggies(&file_label(path), &read_text(path)?)
}
