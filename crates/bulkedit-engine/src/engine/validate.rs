//! Validation of a bulk-edit replacement value.

use serde::Serialize;
use thiserror::Error;

use super::config::{BulkEditConfig, DataType};
use super::date::date_from_value;
use super::value::{CellValue, number_text};

/// Why a value was rejected. The `Display` text is the user-facing message.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid number")]
    InvalidNumber,

    #[error("Value must be at least {}", bound_text(.0))]
    BelowMin(f64),

    #[error("Value must be at most {}", bound_text(.0))]
    AboveMax(f64),

    #[error("Please enter a valid date")]
    InvalidDate,

    #[error("Please select a valid option")]
    InvalidOption,
}

fn bound_text(bound: &f64) -> String {
    number_text(*bound)
}

/// Verdict for one value. `error_message` is set exactly when the value is invalid.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> ValidationResult {
        ValidationResult {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(err: &ValidationError) -> ValidationResult {
        ValidationResult {
            is_valid: false,
            error_message: Some(err.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationResult::valid(),
            Err(err) => ValidationResult::invalid(&err),
        }
    }
}

/// Validate `value` against `config`.
pub fn validate_value(value: &CellValue, config: &BulkEditConfig) -> ValidationResult {
    check_value(value, config).into()
}

/// Same as [`validate_value`], keeping the typed error.
pub fn check_value(value: &CellValue, config: &BulkEditConfig) -> Result<(), ValidationError> {
    if config.required && value.is_blank() {
        return Err(ValidationError::Required);
    }

    match &config.data_type {
        DataType::Number { min, max } | DataType::Currency { min, max, .. } => {
            check_number(value, *min, *max)
        }
        DataType::Date { .. } => match date_from_value(value) {
            Some(_) => Ok(()),
            None => Err(ValidationError::InvalidDate),
        },
        DataType::Select { options } => check_option(value, options.as_deref()),
        DataType::Text { .. } => Ok(()),
    }
}

fn check_number(value: &CellValue, min: Option<f64>, max: Option<f64>) -> Result<(), ValidationError> {
    let n = value.to_number();
    if n.is_nan() {
        return Err(ValidationError::InvalidNumber);
    }
    if let Some(min) = min
        && n < min
    {
        return Err(ValidationError::BelowMin(min));
    }
    if let Some(max) = max
        && n > max
    {
        return Err(ValidationError::AboveMax(max));
    }
    Ok(())
}

fn check_option(value: &CellValue, options: Option<&[String]>) -> Result<(), ValidationError> {
    let Some(options) = options else {
        return Ok(());
    };
    let wanted = value.to_string();
    if options.iter().any(|option| *option == wanted) {
        Ok(())
    } else {
        Err(ValidationError::InvalidOption)
    }
}
