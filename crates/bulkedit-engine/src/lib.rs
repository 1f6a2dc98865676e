//! bulkedit_engine - Column type detection, validation and formatting for bulk edits.

pub mod engine;
