//! One bulk edit: a selection, its detected configuration, and the updates
//! produced by a submitted value.

use bulkedit_engine::engine::{
    BulkEditConfig, Cell, CellValue, ValidationResult, check_value, format_value, validate_value,
};
use tracing::debug;

use crate::error::{BulkEditError, Result};
use crate::selection::Selection;
use crate::settings::Settings;
use crate::sheet::{CellUpdate, Sheet};

#[derive(Clone, Debug)]
pub struct BulkEditSession {
    selection: Selection,
    cells: Vec<Cell>,
    config: BulkEditConfig,
}

impl BulkEditSession {
    /// Collect the selected cells and detect their configuration, applying
    /// column rules and constraints from `settings`.
    pub fn new(sheet: &Sheet, selection: Selection, settings: &Settings) -> Result<Self> {
        if selection.is_empty() {
            return Err(BulkEditError::EmptySelection);
        }
        let cells = sheet.cells_for(&selection, settings)?;
        let config = settings.detect(&cells);
        debug!(
            cells = cells.len(),
            data_type = config.data_type.name(),
            "bulk edit session ready"
        );

        Ok(BulkEditSession {
            selection,
            cells,
            config,
        })
    }

    /// Use an explicitly supplied configuration instead of detecting one.
    pub fn with_config(sheet: &Sheet, selection: Selection, config: BulkEditConfig) -> Result<Self> {
        if selection.is_empty() {
            return Err(BulkEditError::EmptySelection);
        }
        let cells = sheet.cells_for(&selection, &Settings::default())?;
        Ok(BulkEditSession {
            selection,
            cells,
            config,
        })
    }

    pub fn config(&self) -> &BulkEditConfig {
        &self.config
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn validate(&self, input: &CellValue) -> ValidationResult {
        validate_value(input, &self.config)
    }

    /// Validate and format `input`, producing one update per selected cell.
    pub fn submit(&self, input: &CellValue) -> Result<Vec<CellUpdate>> {
        check_value(input, &self.config)?;
        let value = format_value(input, &self.config);
        Ok(self
            .selection
            .positions()
            .iter()
            .map(|&pos| CellUpdate {
                pos,
                value: value.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::CellPos;
    use crate::storage::{parse_csv_str, to_csv_string};
    use bulkedit_engine::engine::{DataType, ValidationError};
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
Name,Age,Status,BillDate,Amount
ann,25,Open,2023-01-01,$10.00
bob,30,Closed,2023-02-01,$1.50
cy,n/a,Open,,$3.00
";

    fn sheet() -> Sheet {
        parse_csv_str(CSV).unwrap()
    }

    #[test]
    fn test_number_session_submit() {
        let sheet = sheet();
        let selection = Selection::parse(&sheet, "Age", Some("1-2")).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &Settings::default()).unwrap();
        assert_eq!(session.config(), &BulkEditConfig::number());

        let updates = session.submit(&"1,000".into()).unwrap();
        assert_eq!(
            updates,
            vec![
                CellUpdate { pos: CellPos::new(0, 1), value: CellValue::Number(1000.0) },
                CellUpdate { pos: CellPos::new(1, 1), value: CellValue::Number(1000.0) },
            ]
        );
    }

    #[test]
    fn test_one_non_numeric_row_makes_text() {
        let sheet = sheet();
        let selection = Selection::parse(&sheet, "Age", None).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &Settings::default()).unwrap();
        assert_eq!(session.config(), &BulkEditConfig::text());
    }

    #[test]
    fn test_constraints_and_rejection() {
        let sheet = sheet();
        let settings = Settings::from_toml_str("[columns.Age]\nmax = 100\n").unwrap();
        let selection = Selection::parse(&sheet, "Age", Some("1,2")).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &settings).unwrap();

        let result = session.validate(&CellValue::Number(150.0));
        assert_eq!(result.error_message(), Some("Value must be at most 100"));

        let err = session.submit(&CellValue::Number(150.0)).unwrap_err();
        assert!(matches!(err, BulkEditError::Invalid(ValidationError::AboveMax(_))));
        assert_eq!(err.to_string(), "Value must be at most 100");
    }

    #[test]
    fn test_status_and_date_columns() {
        let sheet = sheet();
        let selection = Selection::parse(&sheet, "Status", None).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &Settings::default()).unwrap();
        assert!(session.submit(&"In Progress".into()).is_ok());
        assert!(session.submit(&"Pending".into()).is_err());

        let selection = Selection::parse(&sheet, "BillDate", None).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &Settings::default()).unwrap();
        let updates = session.submit(&"2023-01-15".into()).unwrap();
        assert_eq!(updates.len(), 3);
        assert!(
            updates
                .iter()
                .all(|u| u.value == CellValue::text("1/15/2023 12:00:00 AM"))
        );
    }

    #[test]
    fn test_currency_column_from_settings() {
        let sheet = sheet();
        let settings = Settings::from_toml_str("[columns.Amount]\ncurrency = \"$\"\nmin = 0\n").unwrap();
        let selection = Selection::parse(&sheet, "Amount", None).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &settings).unwrap();
        assert_eq!(session.config(), &BulkEditConfig::currency("$").with_min(0.0));
        assert_eq!(session.cells()[0].raw_value, Some(10.0));

        let updates = session.submit(&"$100.50".into()).unwrap();
        assert_eq!(updates[0].value, CellValue::Number(100.5));
        assert!(session.submit(&"-$1".into()).is_err());
    }

    #[test]
    fn test_mixed_columns_skip_constraints() {
        let sheet = sheet();
        let settings = Settings::from_toml_str("[columns.Age]\nrequired = true\n").unwrap();
        let selection = Selection::parse(&sheet, "Age,Name", Some("1")).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &settings).unwrap();
        assert_eq!(
            session.config().data_type,
            DataType::Text { options: Some(vec![]) }
        );
        assert!(!session.config().required);
    }

    #[test]
    fn test_apply_session_updates_to_sheet() {
        let mut sheet = sheet();
        let selection = Selection::parse(&sheet, "Status", Some("1,3")).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &Settings::default()).unwrap();
        let updates = session.submit(&"Closed".into()).unwrap();

        assert_eq!(sheet.apply_updates(updates).unwrap(), 2);
        assert_eq!(sheet.cell(CellPos::new(2, 2)), Some(&CellValue::text("Closed")));
        sheet.undo().unwrap();
        assert_eq!(sheet.cell(CellPos::new(2, 2)), Some(&CellValue::text("Open")));
    }

    #[test]
    fn test_edit_leaves_other_columns_byte_identical() {
        let text = "\
Name,Phone,Amount,Status
ann,+44 20 7946,1.50,Open
-dash,=x,1e3,Closed
";
        let mut sheet = parse_csv_str(text).unwrap();
        let selection = Selection::parse(&sheet, "Status", Some("1")).unwrap();
        let session = BulkEditSession::new(&sheet, selection, &Settings::default()).unwrap();
        sheet.apply_updates(session.submit(&"Closed".into()).unwrap()).unwrap();

        assert_eq!(
            to_csv_string(&sheet),
            "\
Name,Phone,Amount,Status
ann,+44 20 7946,1.50,Closed
-dash,=x,1e3,Closed
"
        );
    }

    #[test]
    fn test_explicit_config() {
        let sheet = sheet();
        let selection = Selection::parse(&sheet, "Name", None).unwrap();
        let session =
            BulkEditSession::with_config(&sheet, selection, BulkEditConfig::text().required())
                .unwrap();
        assert!(!session.validate(&"".into()).is_valid());
        assert!(session.validate(&"dee".into()).is_valid());
    }

    #[test]
    fn test_empty_selection() {
        let sheet = sheet();
        let err = BulkEditSession::new(&sheet, Selection::new(), &Settings::default()).unwrap_err();
        assert!(matches!(err, BulkEditError::EmptySelection));
    }
}
