//! Bulk-edit column configuration.
//!
//! [`DataType`] is a closed sum type: every variant carries only the settings
//! that apply to it. [`BulkEditConfig`] adds the settings shared by all types.
//!
//! The serialized form matches the grid's JSON shape, e.g.
//! `{"dataType":"select","options":["Open","Closed"],"required":true}`.

use serde::{Deserialize, Serialize};

/// Advisory date format label reported for date columns.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The inferred value domain of a column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all = "camelCase")]
pub enum DataType {
    /// Free text. `options` is `Some(vec![])` when the selection spans
    /// several columns, and `None` otherwise.
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Vec<String>>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Currency {
        #[serde(rename = "currencyFormat", default)]
        currency_format: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Date {
        #[serde(rename = "dateFormat", default = "default_date_format")]
        date_format: String,
    },
    /// Closed set of legal values. `None` accepts anything.
    Select {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Vec<String>>,
    },
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Text { .. } => "text",
            DataType::Number { .. } => "number",
            DataType::Currency { .. } => "currency",
            DataType::Date { .. } => "date",
            DataType::Select { .. } => "select",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Number { .. } | DataType::Currency { .. })
    }

    /// Inclusive bounds for numeric types; `(None, None)` for everything else.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            DataType::Number { min, max } | DataType::Currency { min, max, .. } => (*min, *max),
            _ => (None, None),
        }
    }

    /// Replace the bounds of a numeric type. Other types are left untouched.
    pub fn set_bounds(&mut self, new_min: Option<f64>, new_max: Option<f64>) {
        if let DataType::Number { min, max } | DataType::Currency { min, max, .. } = self {
            *min = new_min;
            *max = new_max;
        }
    }
}

/// The configuration a bulk edit runs against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulkEditConfig {
    #[serde(flatten)]
    pub data_type: DataType,
    /// Reject empty input regardless of type.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl BulkEditConfig {
    pub fn new(data_type: DataType) -> BulkEditConfig {
        BulkEditConfig {
            data_type,
            required: false,
        }
    }

    pub fn text() -> BulkEditConfig {
        Self::new(DataType::Text { options: None })
    }

    pub fn number() -> BulkEditConfig {
        Self::new(DataType::Number {
            min: None,
            max: None,
        })
    }

    pub fn currency(currency_format: impl Into<String>) -> BulkEditConfig {
        Self::new(DataType::Currency {
            currency_format: currency_format.into(),
            min: None,
            max: None,
        })
    }

    pub fn date() -> BulkEditConfig {
        Self::new(DataType::Date {
            date_format: default_date_format(),
        })
    }

    pub fn select<I, S>(options: I) -> BulkEditConfig
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DataType::Select {
            options: Some(options.into_iter().map(Into::into).collect()),
        })
    }

    pub fn with_min(mut self, min: f64) -> BulkEditConfig {
        let (_, max) = self.data_type.bounds();
        self.data_type.set_bounds(Some(min), max);
        self
    }

    pub fn with_max(mut self, max: f64) -> BulkEditConfig {
        let (min, _) = self.data_type.bounds();
        self.data_type.set_bounds(min, Some(max));
        self
    }

    pub fn required(mut self) -> BulkEditConfig {
        self.required = true;
        self
    }
}

impl Default for BulkEditConfig {
    fn default() -> Self {
        Self::text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bounds_only_apply_to_numeric_types() {
        let cfg = BulkEditConfig::number().with_min(10.0).with_max(100.0);
        assert_eq!(cfg.data_type.bounds(), (Some(10.0), Some(100.0)));

        let cfg = BulkEditConfig::date().with_min(10.0);
        assert_eq!(cfg.data_type.bounds(), (None, None));
        assert_eq!(cfg, BulkEditConfig::date());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(BulkEditConfig::text()).unwrap();
        assert_eq!(json, serde_json::json!({"dataType": "text"}));

        let json = serde_json::to_value(BulkEditConfig::date()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"dataType": "date", "dateFormat": "YYYY-MM-DD"})
        );

        let json = serde_json::to_value(BulkEditConfig::currency("$").with_max(5.0).required())
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"dataType": "currency", "currencyFormat": "$", "max": 5.0, "required": true})
        );
    }

    #[test]
    fn test_deserialize_from_grid_json() {
        let cfg: BulkEditConfig =
            serde_json::from_str(r#"{"dataType":"select","options":["A","B"],"required":true}"#)
                .unwrap();
        assert_eq!(cfg, BulkEditConfig::select(["A", "B"]).required());

        let cfg: BulkEditConfig = serde_json::from_str(r#"{"dataType":"date"}"#).unwrap();
        assert_eq!(cfg, BulkEditConfig::date());
    }
}
