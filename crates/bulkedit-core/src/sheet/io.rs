use super::Sheet;
use crate::error::{BulkEditError, Result};
use crate::storage::{parse_csv, write_csv};
use std::path::{Path, PathBuf};

impl Sheet {
    /// Load a CSV file (header row first) and remember its path.
    pub fn load_file(path: &Path) -> Result<Self> {
        let mut sheet = parse_csv(path)?;
        sheet.file_path = Some(path.to_path_buf());
        sheet.modified = false;
        Ok(sheet)
    }

    /// Write the sheet back to the file it was loaded from.
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self.file_path.clone().ok_or(BulkEditError::NoFilePath)?;
        self.save_as(&path)?;
        Ok(path)
    }

    /// Write the sheet to `path` and make it the current file.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        write_csv(path, self)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}
