//! bulkedit-core - UI-agnostic sheet model, selections and bulk-edit sessions.

pub mod error;
pub mod selection;
pub mod session;
pub mod settings;
pub mod sheet;
pub mod storage;

pub use error::{BulkEditError, Result};
pub use selection::{CellPos, Selection};
pub use session::BulkEditSession;
pub use settings::{ColumnSettings, Settings, load_settings};
pub use sheet::{CellUpdate, Sheet, UndoAction};

pub use bulkedit_engine::engine::{BulkEditConfig, Cell, CellValue, DataType, ValidationResult};
