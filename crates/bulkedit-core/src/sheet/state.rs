use bulkedit_engine::engine::CellValue;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::selection::CellPos;

/// Maximum number of undo entries to keep
pub(crate) const MAX_UNDO_STACK: usize = 100;

/// A value to write into one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellUpdate {
    pub pos: CellPos,
    pub value: CellValue,
}

/// Represents an undoable change to a single cell
#[derive(Clone, Debug, PartialEq)]
pub struct UndoAction {
    pub pos: CellPos,
    pub old_value: CellValue,
    pub new_value: CellValue,
}

/// UI-agnostic sheet: a header row naming the fields, and rows of values.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    /// Field names, one per column
    pub headers: Vec<String>,
    /// Data rows; every row has exactly `headers.len()` values
    pub rows: Vec<Vec<CellValue>>,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified since load/save
    pub modified: bool,
    /// Undo stack; each entry is one bulk edit
    pub undo_stack: Vec<Vec<UndoAction>>,
    /// Redo stack
    pub redo_stack: Vec<Vec<UndoAction>>,
    /// Edits currently applied per cell; cells absent here hold loaded values
    pub(crate) edits: HashMap<CellPos, usize>,
}

impl Sheet {
    pub fn new(headers: Vec<String>) -> Self {
        Sheet {
            headers,
            ..Default::default()
        }
    }

    /// Build a sheet from rows, padding short rows and truncating long ones
    /// to the header width.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Sheet {
            headers,
            rows,
            ..Default::default()
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, pos: CellPos) -> Option<&CellValue> {
        self.rows.get(pos.row)?.get(pos.column)
    }

    /// Whether the cell holds a value written by an edit rather than the loaded one.
    pub fn is_edited(&self, pos: CellPos) -> bool {
        self.edits.contains_key(&pos)
    }
}
