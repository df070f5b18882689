//! Minimal header-keyed CSV table with typed field access.

use crate::error::{FieldKind, ReadError, Result};

/// Values within this distance of a whole number are read as that number.
const INTEGRAL_EPS: f64 = 1e-5;

/// A parsed CSV file: one header line, then data records.
///
/// Fields are split on commas; double-quoted fields may contain commas and
/// `""` escapes. Surrounding whitespace is trimmed. Blank lines are skipped
/// and do not count as rows.
#[derive(Debug, Clone)]
pub struct Table {
    file: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn parse(file: &str, text: &str) -> Self {
        let mut lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(split_record);
        let headers = lines.next().unwrap_or_default();
        Self {
            file: file.to_string(),
            headers,
            rows: lines.collect(),
        }
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ReadError::missing_column(&self.file, column))
    }

    /// Fails unless every named column is present in the header.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        columns.iter().try_for_each(|c| self.column_index(c).map(|_| ()))
    }

    /// Raw trimmed text of a field; short records read as empty.
    pub fn text(&self, row: usize, column: &str) -> Result<&str> {
        let idx = self.column_index(column)?;
        Ok(self
            .rows
            .get(row)
            .and_then(|r| r.get(idx))
            .map_or("", String::as_str))
    }

    fn invalid(&self, row: usize, column: &str, expected: FieldKind, found: &str) -> ReadError {
        ReadError::invalid_field(&self.file, row, column, expected, found)
    }

    /// A non-negative whole number; empty reads as zero.
    pub fn non_negative_integer(&self, row: usize, column: &str) -> Result<u32> {
        let raw = self.text(row, column)?;
        if raw.is_empty() {
            return Ok(0);
        }
        parse_integral(raw)
            .filter(|&v| v >= 0)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.invalid(row, column, FieldKind::NonNegativeInteger, raw))
    }

    /// A non-negative finite real; empty reads as zero.
    pub fn non_negative_real(&self, row: usize, column: &str) -> Result<f64> {
        let raw = self.text(row, column)?;
        if raw.is_empty() {
            return Ok(0.0);
        }
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| self.invalid(row, column, FieldKind::NonNegativeReal, raw))
    }

    /// A whole number of either sign. Empty is an error.
    pub fn integer(&self, row: usize, column: &str) -> Result<i64> {
        let raw = self.text(row, column)?;
        parse_integral(raw).ok_or_else(|| self.invalid(row, column, FieldKind::Integer, raw))
    }
}

/// Parses `3`, `-3` or `3.0` as a whole number.
fn parse_integral(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let rounded = v.round();
    if (v - rounded).abs() < INTEGRAL_EPS && rounded.abs() < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(ch),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
