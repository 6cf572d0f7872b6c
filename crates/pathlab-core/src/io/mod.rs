//! Dataset loaders
//!
//! Text formats shared by all loaders: one record per line, fields separated
//! by spaces, tabs or commas, blank lines and `#` comments skipped.

mod edge_list;
mod embeddings;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{PathlabError, Result};

pub use edge_list::{load_edge_list, load_snap};
pub use embeddings::load_embeddings;

/// Open a dataset file, reporting a missing file as a data error
fn open_dataset(path: &Path, context: &str) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(PathlabError::not_found(context, path.display()))
        }
        Err(e) => Err(PathlabError::io_operation("open", path.display(), e)),
    }
}

/// Iterate `(line_number, fields)` over the data lines of a reader.
///
/// Line numbers are 1-based and count skipped lines. Every yielded record
/// has at least one field.
fn records<'a, R: BufRead + 'a>(
    reader: R,
    path: &'a Path,
) -> impl Iterator<Item = Result<(usize, Vec<String>)>> + 'a {
    reader
        .lines()
        .enumerate()
        .filter_map(move |(index, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(PathlabError::io_operation("read", path.display(), e))),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let fields: Vec<String> = split_fields(trimmed).map(str::to_string).collect();
            if fields.is_empty() {
                return None;
            }
            Some(Ok((index + 1, fields)))
        })
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split([' ', '\t', ','])
        .filter(|field| !field.is_empty())
}
