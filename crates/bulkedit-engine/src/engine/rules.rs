//! Column-name overrides consulted before any value inference.
//!
//! Some columns are known by name rather than by content. The built-in table
//! covers the grid's existing business columns:
//!
//! | match      | column     | type                                   |
//! |------------|------------|----------------------------------------|
//! | exact      | `Status`   | select: `Open`, `In Progress`, `Closed` |
//! | exact      | `BillDate` | date                                   |
//! | contains   | `Date`     | date (case-sensitive)                  |
//!
//! Callers can extend or replace the table; rules are tried in order and the
//! first match wins.

use super::config::{DEFAULT_DATE_FORMAT, DataType};

/// How a rule's column name is compared to a cell's field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnMatch {
    Exact,
    Contains,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnRule {
    pub matcher: ColumnMatch,
    pub column: String,
    pub data_type: DataType,
}

impl ColumnRule {
    pub fn exact(column: impl Into<String>, data_type: DataType) -> ColumnRule {
        ColumnRule {
            matcher: ColumnMatch::Exact,
            column: column.into(),
            data_type,
        }
    }

    pub fn contains(column: impl Into<String>, data_type: DataType) -> ColumnRule {
        ColumnRule {
            matcher: ColumnMatch::Contains,
            column: column.into(),
            data_type,
        }
    }

    pub fn matches(&self, field: &str) -> bool {
        match self.matcher {
            ColumnMatch::Exact => field == self.column,
            ColumnMatch::Contains => field.contains(self.column.as_str()),
        }
    }
}

/// Ordered column rule table.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnRules {
    rules: Vec<ColumnRule>,
}

impl ColumnRules {
    pub fn new(rules: Vec<ColumnRule>) -> ColumnRules {
        ColumnRules { rules }
    }

    pub fn empty() -> ColumnRules {
        Self::new(Vec::new())
    }

    pub fn builtin() -> ColumnRules {
        let date = || DataType::Date {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        };
        Self::new(vec![
            ColumnRule::exact(
                "Status",
                DataType::Select {
                    options: Some(vec![
                        "Open".to_string(),
                        "In Progress".to_string(),
                        "Closed".to_string(),
                    ]),
                },
            ),
            ColumnRule::exact("BillDate", date()),
            ColumnRule::contains("Date", date()),
        ])
    }

    /// User rules first, then the built-in table.
    pub fn with_builtin(user_rules: Vec<ColumnRule>) -> ColumnRules {
        let mut rules = user_rules;
        rules.extend(Self::builtin().rules);
        Self::new(rules)
    }

    pub fn lookup(&self, field: &str) -> Option<&DataType> {
        self.rules
            .iter()
            .find(|rule| rule.matches(field))
            .map(|rule| &rule.data_type)
    }
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self::builtin()
    }
}
