//! Cell selections.
//!
//! Rows are written 1-based, as lists and ranges: `"1-3,7"`. `*` (or no row
//! spec) selects every row. Columns are field names, comma-separated.

use std::collections::HashSet;
use std::fmt;

use crate::error::{BulkEditError, Result};
use crate::sheet::Sheet;

/// A cell position (0-indexed row and column).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

impl CellPos {
    pub fn new(row: usize, column: usize) -> CellPos {
        CellPos { row, column }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row + 1, self.column + 1)
    }
}

/// Ordered set of selected cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    positions: Vec<CellPos>,
    seen: HashSet<CellPos>,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = CellPos>) -> Selection {
        let mut selection = Selection::new();
        for pos in positions {
            selection.push(pos);
        }
        selection
    }

    /// Add a position; duplicates are ignored.
    pub fn push(&mut self, pos: CellPos) {
        if self.seen.insert(pos) {
            self.positions.push(pos);
        }
    }

    pub fn positions(&self) -> &[CellPos] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Select `rows` of each named column, column by column.
    pub fn parse(sheet: &Sheet, columns: &str, rows: Option<&str>) -> Result<Selection> {
        let column_indices = columns
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                sheet
                    .column_index(name)
                    .ok_or_else(|| BulkEditError::UnknownColumn(name.to_string()))
            })
            .collect::<Result<Vec<usize>>>()?;
        if column_indices.is_empty() {
            return Err(BulkEditError::InvalidSelection(
                "no column given".to_string(),
            ));
        }

        let row_indices = parse_rows(rows.unwrap_or("*"), sheet.row_count())?;

        let mut selection = Selection::new();
        for &column in &column_indices {
            for &row in &row_indices {
                selection.push(CellPos::new(row, column));
            }
        }
        Ok(selection)
    }
}

/// Parse a 1-based row spec into 0-based row indices, in the order given.
pub fn parse_rows(spec: &str, row_count: usize) -> Result<Vec<usize>> {
    let spec = spec.trim();
    if spec == "*" {
        return Ok((0..row_count).collect());
    }

    let mut rows: Vec<usize> = Vec::new();
    let mut seen = HashSet::new();
    for part in spec.split(',').map(str::trim) {
        if part.is_empty() {
            return Err(BulkEditError::InvalidSelection(format!(
                "empty entry in row list '{}'",
                spec
            )));
        }
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_row_number(a)?, parse_row_number(b)?),
            None => {
                let n = parse_row_number(part)?;
                (n, n)
            }
        };
        if start > end {
            return Err(BulkEditError::InvalidSelection(format!(
                "row range '{}' is reversed",
                part
            )));
        }
        if end > row_count {
            return Err(BulkEditError::RowOutOfRange {
                row: end,
                rows: row_count,
            });
        }
        for row in start..=end {
            if seen.insert(row) {
                rows.push(row - 1);
            }
        }
    }
    Ok(rows)
}

fn parse_row_number(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(BulkEditError::InvalidSelection(format!(
            "'{}' is not a row number (rows start at 1)",
            s.trim()
        ))),
        Ok(n) => Ok(n),
    }
}
