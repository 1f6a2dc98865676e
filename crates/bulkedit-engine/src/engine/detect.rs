//! Column type detection for a bulk-edit selection.
//!
//! Explicit signals win over inference. Decisions, in order:
//!
//! 1. no cells: plain text
//! 2. the first cell's field matches a column rule: that rule's type
//! 3. cells span more than one field: text with an explicit empty option list
//! 4. any cell carries a currency marker: currency
//! 5. every cell has a numeric interpretation: number
//! 6. otherwise: text

use std::sync::OnceLock;
use tracing::debug;

use super::config::{BulkEditConfig, DataType};
use super::rules::ColumnRules;
use super::value::Cell;

fn builtin_rules() -> &'static ColumnRules {
    static RULES: OnceLock<ColumnRules> = OnceLock::new();
    RULES.get_or_init(ColumnRules::builtin)
}

/// Detect the column configuration using the built-in column rules.
pub fn detect_data_type(cells: &[Cell]) -> BulkEditConfig {
    detect_data_type_with_rules(cells, builtin_rules())
}

/// Detect the column configuration, consulting `rules` before inspecting values.
pub fn detect_data_type_with_rules(cells: &[Cell], rules: &ColumnRules) -> BulkEditConfig {
    let Some(first) = cells.first() else {
        return BulkEditConfig::text();
    };

    if let Some(data_type) = rules.lookup(&first.field) {
        debug!(field = %first.field, data_type = data_type.name(), "column rule matched");
        return BulkEditConfig::new(data_type.clone());
    }

    if cells.iter().any(|cell| cell.field != first.field) {
        debug!(cells = cells.len(), "selection spans several columns");
        return BulkEditConfig::new(DataType::Text {
            options: Some(Vec::new()),
        });
    }

    if cells.iter().any(Cell::has_currency) {
        return BulkEditConfig::currency(first.currency.clone().unwrap_or_default());
    }

    if cells.iter().all(|cell| !cell.numeric_value().is_nan()) {
        return BulkEditConfig::number();
    }

    BulkEditConfig::text()
}
