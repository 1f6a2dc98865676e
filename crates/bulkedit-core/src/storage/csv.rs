//! CSV import/export functionality
//!
//! Fields are kept exactly as written: the sheet only rewrites cells that an
//! edit touched, so everything else saves back byte for byte.

use crate::error::{BulkEditError, Result};
use crate::selection::CellPos;
use crate::sheet::Sheet;
use bulkedit_engine::engine::{CellValue, format_number};
use std::io::Write;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

/// Parse a CSV file whose first record holds the field names
pub fn parse_csv(path: &Path) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)?;
    parse_csv_str(&content)
}

/// Parse CSV text whose first record holds the field names
pub fn parse_csv_str(content: &str) -> Result<Sheet> {
    let mut records = RecordReader::new(content.trim_start_matches('\u{feff}'));

    let header = loop {
        match records.next_record()? {
            Some(record) if record.is_blank() => continue,
            Some(record) => break record,
            None => return Err(BulkEditError::EmptyCsv),
        }
    };

    let headers: Vec<String> = header.fields.into_iter().map(|f| f.text).collect();
    for (idx, name) in headers.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(BulkEditError::Parse {
                line: header.line,
                message: format!("column {} has an empty name", idx + 1),
            });
        }
        if headers[..idx].contains(name) {
            return Err(BulkEditError::Parse {
                line: header.line,
                message: format!("duplicate column name '{}'", name),
            });
        }
    }

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    while let Some(record) = records.next_record()? {
        if record.is_blank() {
            continue;
        }
        if record.fields.len() > headers.len() {
            return Err(BulkEditError::Parse {
                line: record.line,
                message: format!(
                    "expected at most {} fields, found {}",
                    headers.len(),
                    record.fields.len()
                ),
            });
        }
        rows.push(record.fields.into_iter().map(Field::into_value).collect());
    }

    Ok(Sheet::from_rows(headers, rows))
}

#[derive(Debug, Default, PartialEq)]
struct Field {
    text: String,
    quoted: bool,
}

impl Field {
    /// An unquoted empty field is a missing value; anything else is text as written.
    fn into_value(self) -> CellValue {
        if self.text.is_empty() && !self.quoted {
            CellValue::Empty
        } else {
            CellValue::Text(self.text)
        }
    }
}

#[derive(Debug)]
struct Record {
    /// 1-based line the record starts on
    line: usize,
    fields: Vec<Field>,
}

impl Record {
    fn is_blank(&self) -> bool {
        matches!(self.fields.as_slice(), [only] if !only.quoted && only.text.trim().is_empty())
    }
}

/// Splits CSV text into records. Quoted fields may span line breaks.
struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(content: &'a str) -> Self {
        RecordReader {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        if self.chars.peek().is_none() {
            return Ok(None);
        }
        let start = self.line;
        let mut fields = Vec::new();
        let mut field = Field::default();
        let mut in_quotes = false;

        while let Some(c) = self.chars.next() {
            if in_quotes {
                match c {
                    '"' if self.chars.peek() == Some(&'"') => {
                        self.chars.next();
                        field.text.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        self.line += 1;
                        field.text.push(c);
                    }
                    _ => field.text.push(c),
                }
                continue;
            }

            match c {
                // Quotes only open a field at its start; elsewhere they are literal.
                '"' if field.text.is_empty() && !field.quoted => {
                    in_quotes = true;
                    field.quoted = true;
                }
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' if self.chars.peek() == Some(&'\n') => {}
                '\n' => {
                    self.line += 1;
                    fields.push(field);
                    return Ok(Some(Record { line: start, fields }));
                }
                _ => field.text.push(c),
            }
        }

        if in_quotes {
            return Err(BulkEditError::Parse {
                line: start,
                message: "unterminated quoted field".to_string(),
            });
        }
        fields.push(field);
        Ok(Some(Record { line: start, fields }))
    }
}

/// Export the sheet, header row first.
pub fn write_csv(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(to_csv_string(sheet).as_bytes())?;
    Ok(())
}

pub fn to_csv_string(sheet: &Sheet) -> String {
    let mut out = String::new();
    let header: Vec<String> = sheet.headers.iter().map(|h| quote_field(h)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let fields: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col_idx, value)| {
                let edited = sheet.is_edited(CellPos::new(row_idx, col_idx));
                value_to_field(value, edited)
            })
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn value_to_field(value: &CellValue, edited: bool) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(s) if s.is_empty() => "\"\"".to_string(),
        CellValue::Text(s) if edited => quote_field(&guard_formula(s)),
        CellValue::Text(s) => quote_field(s),
    }
}

/// Prefix edited text that a spreadsheet app would run as a formula.
fn guard_formula(field: &str) -> String {
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let is_number = field.parse::<f64>().is_ok();
    if !is_number && matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    }
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellUpdate;
    use pretty_assertions::assert_eq;

    fn row(sheet: &Sheet, row: usize) -> Vec<CellValue> {
        sheet.rows[row].clone()
    }

    #[test]
    fn test_fields_are_kept_as_written() {
        let sheet =
            parse_csv_str("A,B,C,D,E\n42,007,1.50,  hi ,\n\"a, b\",\"say \"\"hi\"\"\",\"\",5\",x\n")
                .unwrap();
        assert_eq!(
            row(&sheet, 0),
            vec![
                CellValue::text("42"),
                CellValue::text("007"),
                CellValue::text("1.50"),
                CellValue::text("  hi "),
                CellValue::Empty,
            ]
        );
        assert_eq!(
            row(&sheet, 1),
            vec![
                CellValue::text("a, b"),
                CellValue::text("say \"hi\""),
                CellValue::text(""),
                CellValue::text("5\""),
                CellValue::text("x"),
            ]
        );
    }

    #[test]
    fn test_parse_csv_str_with_header() {
        let sheet = parse_csv_str("\u{feff}Name,Age,Status\r\nann,30,Open\r\n\r\nbob,,Closed\ncy\n")
            .unwrap();
        assert_eq!(sheet.headers, vec!["Name", "Age", "Status"]);
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.cell(CellPos::new(0, 1)), Some(&CellValue::text("30")));
        assert_eq!(sheet.cell(CellPos::new(0, 2)), Some(&CellValue::text("Open")));
        assert_eq!(sheet.cell(CellPos::new(1, 1)), Some(&CellValue::Empty));
        assert_eq!(sheet.cell(CellPos::new(2, 2)), Some(&CellValue::Empty));
    }

    #[test]
    fn test_quoted_field_spans_lines() {
        let sheet = parse_csv_str("Name,Note\nann,\"line1\nline2\"\nbob,x\n").unwrap();
        assert_eq!(
            sheet.rows,
            vec![
                vec![CellValue::text("ann"), CellValue::text("line1\nline2")],
                vec![CellValue::text("bob"), CellValue::text("x")],
            ]
        );
    }

    #[test]
    fn test_parse_csv_errors() {
        assert!(matches!(parse_csv_str(""), Err(BulkEditError::EmptyCsv)));
        assert!(matches!(parse_csv_str("\n  \n"), Err(BulkEditError::EmptyCsv)));
        assert!(matches!(
            parse_csv_str("A,A\n1,2"),
            Err(BulkEditError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_csv_str("A,B\n1,2\n1,2,3"),
            Err(BulkEditError::Parse { line: 3, .. })
        ));
        // Line numbers count the physical lines inside quoted fields.
        assert!(matches!(
            parse_csv_str("A,B\n\"x\ny\",2\n1,2,3"),
            Err(BulkEditError::Parse { line: 4, .. })
        ));
        assert!(matches!(
            parse_csv_str("A,B\n1,\"open"),
            Err(BulkEditError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_quote_field() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(quote_field(" x"), " x");
    }

    #[test]
    fn test_guard_formula() {
        assert_eq!(guard_formula("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(guard_formula("  @cmd"), "'  @cmd");
        assert_eq!(guard_formula("-5"), "-5");
        assert_eq!(guard_formula("plain"), "plain");
    }

    #[test]
    fn test_untouched_cells_save_byte_for_byte() {
        let text = "\
Name,Phone,Amount,Note
\"Smith, J\",+44 20 7946,1.50,=x
-dash,@home,1e3,\"two
lines\"
ann,,007,\"\"
";
        let sheet = parse_csv_str(text).unwrap();
        assert_eq!(to_csv_string(&sheet), text);
    }

    #[test]
    fn test_only_edited_text_is_guarded() {
        let mut sheet = parse_csv_str("Name,Note\n-dash,=x\nbob,y\n").unwrap();
        sheet
            .apply_updates(vec![CellUpdate {
                pos: CellPos::new(1, 1),
                value: CellValue::text("=HYPERLINK(\"x\")"),
            }])
            .unwrap();
        assert_eq!(
            to_csv_string(&sheet),
            "Name,Note\n-dash,=x\nbob,\"'=HYPERLINK(\"\"x\"\")\"\n"
        );

        sheet.undo().unwrap();
        assert_eq!(to_csv_string(&sheet), "Name,Note\n-dash,=x\nbob,y\n");
    }

    #[test]
    fn test_edited_multiline_value_reloads() {
        let mut sheet = parse_csv_str("Name,Note\nann,x\n").unwrap();
        sheet
            .set_cell(CellPos::new(0, 1), CellValue::text("line1\nline2"))
            .unwrap();
        let reloaded = parse_csv_str(&to_csv_string(&sheet)).unwrap();
        assert_eq!(reloaded.rows, sheet.rows);
    }

    #[test]
    fn test_edited_numbers_are_written_plainly() {
        let mut sheet = parse_csv_str("Amount\n$1.50\n").unwrap();
        sheet.set_cell(CellPos::new(0, 0), CellValue::Number(1250.75)).unwrap();
        assert_eq!(to_csv_string(&sheet), "Amount\n1250.75\n");
    }
}
