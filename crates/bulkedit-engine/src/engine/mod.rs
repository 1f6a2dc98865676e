//! Bulk-edit engine API.
//!
//! This module provides the value pipeline behind the bulk-edit dialog:
//!
//! - [`Cell`], [`CellValue`] - Selected cells and scalar values
//! - [`BulkEditConfig`], [`DataType`] - The inferred shape of a column
//! - [`ColumnRules`] - Column-name overrides consulted before inference
//! - [`detect_data_type`] - Infer a column configuration from selected cells
//! - [`validate_value`] - Check a replacement value against a configuration
//! - [`format_value`] - Convert a validated value into its stored form
//! - [`parse_number`], [`parse_date`] - The underlying parsers

mod config;
mod date;
mod detect;
mod format;
mod number;
mod rules;
mod validate;
mod value;

pub use config::{BulkEditConfig, DEFAULT_DATE_FORMAT, DataType};
pub use date::{date_from_value, format_grid_date, parse_date};
pub use detect::{detect_data_type, detect_data_type_with_rules};
pub use format::{format_date, format_number, format_value};
pub use number::parse_number;
pub use rules::{ColumnMatch, ColumnRule, ColumnRules};
pub use validate::{ValidationError, ValidationResult, check_value, validate_value};
pub use value::{Cell, CellValue, number_text};
