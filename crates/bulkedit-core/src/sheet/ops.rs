use bulkedit_engine::engine::{Cell, CellValue};
use tracing::debug;

use super::state::{CellUpdate, MAX_UNDO_STACK, Sheet, UndoAction};
use crate::error::{BulkEditError, Result};
use crate::selection::{CellPos, Selection};
use crate::settings::Settings;

impl Sheet {
    fn check_pos(&self, pos: CellPos) -> Result<()> {
        if pos.row >= self.rows.len() {
            return Err(BulkEditError::RowOutOfRange {
                row: pos.row + 1,
                rows: self.rows.len(),
            });
        }
        if pos.column >= self.headers.len() {
            return Err(BulkEditError::InvalidSelection(format!(
                "column index {} is out of range",
                pos.column
            )));
        }
        Ok(())
    }

    fn push_undo(&mut self, batch: Vec<UndoAction>) {
        self.undo_stack.push(batch);
        if self.undo_stack.len() > MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    fn write_values(&mut self, actions: &[UndoAction], forward: bool) {
        for action in actions {
            let value = if forward {
                action.new_value.clone()
            } else {
                action.old_value.clone()
            };
            self.rows[action.pos.row][action.pos.column] = value;
            self.track_edit(action.pos, forward);
        }
        self.modified = true;
    }

    fn track_edit(&mut self, pos: CellPos, forward: bool) {
        if forward {
            *self.edits.entry(pos).or_insert(0) += 1;
        } else if let Some(count) = self.edits.get_mut(&pos) {
            *count -= 1;
            if *count == 0 {
                self.edits.remove(&pos);
            }
        }
    }

    /// Set one cell, recorded as its own undo entry.
    pub fn set_cell(&mut self, pos: CellPos, value: CellValue) -> Result<()> {
        self.apply_updates(vec![CellUpdate { pos, value }]).map(|_| ())
    }

    /// Apply a batch of updates as a single undoable edit.
    ///
    /// All positions are checked before anything is written, so a bad
    /// position leaves the sheet untouched. Returns the number of cells written.
    pub fn apply_updates(&mut self, updates: Vec<CellUpdate>) -> Result<usize> {
        for update in &updates {
            self.check_pos(update.pos)?;
        }
        if updates.is_empty() {
            return Ok(0);
        }

        let batch: Vec<UndoAction> = updates
            .into_iter()
            .map(|update| UndoAction {
                old_value: self.rows[update.pos.row][update.pos.column].clone(),
                pos: update.pos,
                new_value: update.value,
            })
            .collect();

        self.write_values(&batch, true);
        let count = batch.len();
        debug!(cells = count, "applied bulk update");
        self.push_undo(batch);
        Ok(count)
    }

    pub fn undo(&mut self) -> Result<()> {
        let batch = self.undo_stack.pop().ok_or(BulkEditError::NothingToUndo)?;
        // Restore in reverse so repeated positions end at their oldest value.
        let reversed: Vec<UndoAction> = batch.iter().rev().cloned().collect();
        self.write_values(&reversed, false);
        self.redo_stack.push(batch);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        let batch = self.redo_stack.pop().ok_or(BulkEditError::NothingToRedo)?;
        self.write_values(&batch, true);
        self.undo_stack.push(batch);
        Ok(())
    }

    /// Cells for the selected positions, as the detector sees them.
    ///
    /// Columns configured with a currency get the currency marker and a
    /// pre-parsed numeric value.
    pub fn cells_for(&self, selection: &Selection, settings: &Settings) -> Result<Vec<Cell>> {
        let mut cells = Vec::with_capacity(selection.len());
        for &pos in selection.positions() {
            self.check_pos(pos)?;
            let field = &self.headers[pos.column];
            let value = self.rows[pos.row][pos.column].clone();
            let mut cell = Cell::new(field.as_str(), value);

            if let Some(currency) = settings.column(field).and_then(|c| c.currency.as_ref()) {
                let raw = cell.value.to_number();
                if !raw.is_nan() {
                    cell = cell.with_raw_value(raw);
                }
                cell = cell.with_currency(currency.as_str());
            }
            cells.push(cell);
        }
        Ok(cells)
    }
}
