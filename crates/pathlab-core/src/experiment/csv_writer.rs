//! Append-only CSV output for run rows

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{PathlabError, Result};
use crate::experiment::runner::RunRow;

/// Appends [`RunRow`]s to a CSV file, flushing after every row.
///
/// The header comes from the `RunRow` field names and is written once, only
/// when the file starts out empty, so repeated experiments can share one
/// output file.
pub struct CsvRunWriter {
    path: PathBuf,
    out: csv::Writer<File>,
    rows: usize,
}

impl CsvRunWriter {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| PathlabError::io_operation("create directory", parent.display(), e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| PathlabError::io_operation("open", path.display(), e))?;
        let existing = file
            .metadata()
            .map_err(|e| PathlabError::io_operation("stat", path.display(), e))?
            .len();

        let out = csv::WriterBuilder::new()
            .has_headers(existing == 0)
            .from_writer(file);

        Ok(CsvRunWriter {
            path: path.to_path_buf(),
            out,
            rows: 0,
        })
    }

    pub fn write(&mut self, row: &RunRow) -> Result<()> {
        self.out
            .serialize(row)
            .map_err(|e| PathlabError::io_operation("write", self.path.display(), e))?;
        self.out
            .flush()
            .map_err(|e| PathlabError::io_operation("flush", self.path.display(), e))?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written through this writer
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
