use tracing::warn;

use super::config::{BulkEditConfig, DataType};
use super::date::{date_from_value, format_grid_date};
use super::value::{CellValue, number_text};

/// Convert a validated input into the value the grid stores.
///
/// Numbers and currencies become bare numbers (no currency symbol). Dates
/// become `M/D/YYYY 12:00:00 AM`; an unparseable date is returned unchanged.
/// Text and select values pass through.
pub fn format_value(value: &CellValue, config: &BulkEditConfig) -> CellValue {
    match &config.data_type {
        DataType::Number { .. } | DataType::Currency { .. } => CellValue::Number(value.to_number()),
        DataType::Date { .. } => match format_date(value) {
            Ok(formatted) => CellValue::Text(formatted),
            Err(original) => {
                if cfg!(debug_assertions) {
                    warn!(value = %original, "could not format date, keeping input");
                }
                original
            }
        },
        DataType::Text { .. } | DataType::Select { .. } => value.clone(),
    }
}

/// Format a date value for storage, or hand the original value back.
pub fn format_date(value: &CellValue) -> Result<String, CellValue> {
    date_from_value(value)
        .map(format_grid_date)
        .ok_or_else(|| value.clone())
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else {
        number_text(n)
    }
}
