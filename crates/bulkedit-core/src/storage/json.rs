//! JSON import of selected cells, in the grid's selection shape:
//! `[{"field": "Amount", "value": "$5.00", "rawValue": 5, "currency": "$"}]`

use crate::error::Result;
use bulkedit_engine::engine::Cell;
use std::path::Path;

const MAX_CELLS_FILE_BYTES: u64 = 16 * 1_048_576; // 16 MiB

pub fn read_cells_json(path: &Path) -> Result<Vec<Cell>> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_CELLS_FILE_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: cells file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CELLS_FILE_BYTES
            ),
        )
        .into());
    }
    let content = std::fs::read_to_string(path)?;
    parse_cells_json(&content)
}

pub fn parse_cells_json(content: &str) -> Result<Vec<Cell>> {
    Ok(serde_json::from_str(content)?)
}
