//! Tabular sheet with per-batch undo history.

mod io;
mod ops;
mod state;

pub use state::{CellUpdate, Sheet, UndoAction};
