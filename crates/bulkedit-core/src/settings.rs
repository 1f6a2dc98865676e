//! User settings: column rules and per-column constraints.
//!
//! Read from `bulkedit.toml` in the user config directory, or from an
//! explicit path:
//!
//! ```toml
//! replace_default_rules = false
//!
//! [[rules]]
//! match = "exact"
//! column = "Priority"
//! type = "select"
//! options = ["Low", "Medium", "High"]
//!
//! [columns.Age]
//! min = 0
//! max = 120
//! required = true
//!
//! [columns.Amount]
//! currency = "USD"
//! ```

use bulkedit_engine::engine::{
    BulkEditConfig, Cell, ColumnRule, ColumnRules, DEFAULT_DATE_FORMAT, DataType,
    detect_data_type_with_rules,
};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{BulkEditError, Result};

const MAX_SETTINGS_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MAX_RULES: usize = 1_024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    replace_default_rules: bool,
    #[serde(default)]
    rules: Vec<RuleEntry>,
    #[serde(default)]
    columns: HashMap<String, ColumnSettings>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum MatchKind {
    #[default]
    Exact,
    Contains,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RuleType {
    Text,
    Number,
    Currency,
    Date,
    Select,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    #[serde(rename = "match", default)]
    matcher: MatchKind,
    column: String,
    #[serde(rename = "type")]
    kind: RuleType,
    options: Option<Vec<String>>,
    date_format: Option<String>,
    currency_format: Option<String>,
}

/// Constraints applied to a column after detection.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnSettings {
    /// Inclusive lower bound for number/currency columns.
    pub min: Option<f64>,
    /// Inclusive upper bound for number/currency columns.
    pub max: Option<f64>,
    #[serde(default)]
    pub required: bool,
    /// Marks the column's cells as currency-typed.
    pub currency: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub rules: ColumnRules,
    pub columns: HashMap<String, ColumnSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rules: ColumnRules::builtin(),
            columns: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Settings> {
        let file: SettingsFile = toml::from_str(content)?;
        if file.rules.len() > MAX_RULES {
            return Err(BulkEditError::Config(format!(
                "too many rules ({}, max {})",
                file.rules.len(),
                MAX_RULES
            )));
        }

        let user_rules = file
            .rules
            .iter()
            .map(build_rule)
            .collect::<Result<Vec<ColumnRule>>>()?;
        let rules = if file.replace_default_rules {
            ColumnRules::new(user_rules)
        } else {
            ColumnRules::with_builtin(user_rules)
        };

        for (name, column) in &file.columns {
            if let (Some(min), Some(max)) = (column.min, column.max)
                && min > max
            {
                return Err(BulkEditError::Config(format!(
                    "column '{}': min {} is greater than max {}",
                    name, min, max
                )));
            }
        }

        Ok(Settings {
            rules,
            columns: file.columns,
        })
    }

    pub fn column(&self, field: &str) -> Option<&ColumnSettings> {
        self.columns.get(field)
    }

    /// Detect the configuration for `cells` with these rules, then apply the
    /// column's constraints when the cells share one field.
    pub fn detect(&self, cells: &[Cell]) -> BulkEditConfig {
        let detected = detect_data_type_with_rules(cells, &self.rules);
        match cells.first() {
            Some(first) if cells.iter().all(|c| c.field == first.field) => {
                self.apply_constraints(&first.field, detected)
            }
            _ => detected,
        }
    }

    /// Layer the column's configured constraints onto a detected config.
    pub fn apply_constraints(&self, field: &str, mut config: BulkEditConfig) -> BulkEditConfig {
        let Some(column) = self.column(field) else {
            return config;
        };
        if config.data_type.is_numeric() {
            let (min, max) = config.data_type.bounds();
            config
                .data_type
                .set_bounds(column.min.or(min), column.max.or(max));
        }
        if column.required {
            config.required = true;
        }
        config
    }
}

fn build_rule(entry: &RuleEntry) -> Result<ColumnRule> {
    if entry.column.is_empty() {
        return Err(BulkEditError::Config("rule with empty column name".to_string()));
    }
    if entry.options.is_some() && entry.kind != RuleType::Select {
        return Err(BulkEditError::Config(format!(
            "rule for '{}': options only apply to select columns",
            entry.column
        )));
    }
    if entry.date_format.is_some() && entry.kind != RuleType::Date {
        return Err(BulkEditError::Config(format!(
            "rule for '{}': date_format only applies to date columns",
            entry.column
        )));
    }
    if entry.currency_format.is_some() && entry.kind != RuleType::Currency {
        return Err(BulkEditError::Config(format!(
            "rule for '{}': currency_format only applies to currency columns",
            entry.column
        )));
    }

    let data_type = match entry.kind {
        RuleType::Text => DataType::Text { options: None },
        RuleType::Number => DataType::Number {
            min: None,
            max: None,
        },
        RuleType::Currency => DataType::Currency {
            currency_format: entry.currency_format.clone().unwrap_or_default(),
            min: None,
            max: None,
        },
        RuleType::Date => DataType::Date {
            date_format: entry
                .date_format
                .clone()
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        },
        RuleType::Select => DataType::Select {
            options: entry.options.clone(),
        },
    };

    Ok(match entry.matcher {
        MatchKind::Exact => ColumnRule::exact(entry.column.as_str(), data_type),
        MatchKind::Contains => ColumnRule::contains(entry.column.as_str(), data_type),
    })
}

/// Load settings, falling back to defaults on any problem.
///
/// Returns the settings plus human-readable warnings. A missing default file
/// is silent; a missing explicit file is reported.
pub fn load_settings(config_file: Option<&Path>) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_settings_path);

    let Some(path) = config_path else {
        return (Settings::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    match read_settings(&path) {
        Ok(settings) => (settings, warnings),
        Err(err) => {
            warnings.push(format!("Failed to load {}: {}", path.display(), err));
            (Settings::default(), warnings)
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_SETTINGS_FILE_BYTES {
        return Err(BulkEditError::Config(format!(
            "file too large ({} bytes, max {})",
            meta.len(),
            MAX_SETTINGS_FILE_BYTES
        )));
    }
    let content = std::fs::read_to_string(path)?;
    Settings::from_toml_str(&content)
}

pub fn user_settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "bulkedit")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("bulkedit.toml");
    Some(path)
}
