//! Value types for bulk-edit input.
//!
//! - [`CellValue`] - A scalar grid value (empty, number, or text)
//! - [`Cell`] - One selected grid cell, as handed over by the grid selection

use serde::{Deserialize, Serialize};
use std::fmt;

use super::number::parse_number;

/// A scalar value shown in (or typed into) a grid cell.
///
/// `Empty` stands for both "null" and "missing".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> CellValue {
        CellValue::Text(s.into())
    }

    /// True for the inputs a required field rejects: empty, or the empty string.
    /// Whitespace-only text is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Numeric interpretation of the value. Returns NaN when there is none.
    pub fn to_number(&self) -> f64 {
        match self {
            CellValue::Empty => f64::NAN,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => parse_number(s),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Shortest text for a number, as the grid prints it.
///
/// Magnitudes from `1e21` up and below `1e-6` use exponent notation with an
/// explicit sign (`1e+21`, `1.5e-7`); negative zero prints as `0`.
pub fn number_text(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => f.write_str(&number_text(*n)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// One selected grid cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Column identifier.
    pub field: String,
    /// Displayed value.
    #[serde(default)]
    pub value: CellValue,
    /// Pre-parsed numeric value, when the grid already knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<f64>,
    /// Currency symbol or code; its presence marks the column as currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Cell {
    pub fn new(field: impl Into<String>, value: impl Into<CellValue>) -> Cell {
        Cell {
            field: field.into(),
            value: value.into(),
            raw_value: None,
            currency: None,
        }
    }

    pub fn with_raw_value(mut self, raw: f64) -> Cell {
        self.raw_value = Some(raw);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Cell {
        self.currency = Some(currency.into());
        self
    }

    /// `raw_value` when present, otherwise the parsed display value.
    pub fn numeric_value(&self) -> f64 {
        self.raw_value.unwrap_or_else(|| self.value.to_number())
    }

    pub fn has_currency(&self) -> bool {
        self.currency.as_deref().is_some_and(|c| !c.is_empty())
    }
}
