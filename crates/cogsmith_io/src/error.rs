//! Error types for cogsmith_io crate.
//!
//! Read errors carry the file, the zero-based data row (header excluded) and
//! the column name, so a malformed input can be fixed without guessing.

use std::fmt;
use thiserror::Error;

/// What a field was expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    NonNegativeInteger,
    NonNegativeReal,
    Integer,
    CogType,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::NonNegativeInteger => f.write_str("a non-negative integer"),
            FieldKind::NonNegativeReal => f.write_str("a non-negative real number"),
            FieldKind::Integer => f.write_str("an integer"),
            FieldKind::CogType => f.write_str(
                "a cog type (Cog, Character, Yang_Cog, X_Cog, Plus_Cog, Left_Cog, Right_Cog, \
                 Up_Cog, Down_Cog, Row_Cog, Col_Cog or Omni_Cog)",
            ),
        }
    }
}

/// Main error type for cogsmith_io operations.
#[derive(Error, Debug)]
pub enum ReadError {
    /// Field that does not parse as the expected kind
    #[error("Error in `{file}` on row {row}, column `{column}`: expected {expected}, found `{found}`")]
    InvalidField {
        file: String,
        row: usize,
        column: String,
        expected: FieldKind,
        found: String,
    },

    /// Coordinate outside the shelf
    #[error("Error in `{file}` on row {row}, column `{column}`: {value} is outside the shelf, must be in [0, {limit})")]
    OutOfBounds {
        file: String,
        row: usize,
        column: String,
        value: i64,
        limit: i32,
    },

    /// Header without a required column
    #[error("Error in `{file}`: missing column `{column}`")]
    MissingColumn { file: String, column: String },

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cogsmith_io operations.
pub type Result<T> = std::result::Result<T, ReadError>;

impl ReadError {
    /// Creates a new invalid-field error.
    #[must_use]
    pub fn invalid_field(
        file: &str,
        row: usize,
        column: &str,
        expected: FieldKind,
        found: &str,
    ) -> Self {
        Self::InvalidField {
            file: file.to_string(),
            row,
            column: column.to_string(),
            expected,
            found: found.to_string(),
        }
    }

    /// Creates a new missing-column error.
    #[must_use]
    pub fn missing_column(file: &str, column: &str) -> Self {
        Self::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        }
    }

    /// Data row the error points at, if any.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::InvalidField { row, .. } | Self::OutOfBounds { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Column the error points at, if any.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::InvalidField { column, .. }
            | Self::OutOfBounds { column, .. }
            | Self::MissingColumn { column, .. } => Some(column),
            Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_row_and_column() {
        let err = ReadError::invalid_field(
            "cogs.csv",
            3,
            "build_rate",
            FieldKind::NonNegativeInteger,
            "-2",
        );
        assert_eq!(
            err.to_string(),
            "Error in `cogs.csv` on row 3, column `build_rate`: expected a non-negative integer, found `-2`"
        );
        assert_eq!(err.row(), Some(3));
        assert_eq!(err.column(), Some("build_rate"));

        let oob = ReadError::OutOfBounds {
            file: "empties.csv".to_string(),
            row: 0,
            column: "empties_x".to_string(),
            value: 12,
            limit: 12,
        };
        assert_eq!(
            oob.to_string(),
            "Error in `empties.csv` on row 0, column `empties_x`: 12 is outside the shelf, must be in [0, 12)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ReadError = io_err.into();
        assert!(err.to_string().contains("File system error"));
        assert_eq!(err.row(), None);
    }
}
