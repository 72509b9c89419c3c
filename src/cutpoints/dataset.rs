//! Columns of CSV data files

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::metadata::errors::{MetaError, MetaResult};
use crate::utils::csv_utils::CsvTable;

/// The raw values of one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

/// Read every column of a CSV file with a header row
///
/// Rows with an empty (or missing) field are dropped entirely.
pub fn read_columns<P: AsRef<Path>>(path: P) -> MetaResult<Vec<Column>> {
    let path = path.as_ref();
    let csv = CsvTable::read(path)?;
    let width = csv.header.len();

    let complete: Vec<&Vec<String>> = csv
        .rows
        .iter()
        .filter(|row| (0..width).all(|i| !csv.field(row, i).is_empty()))
        .collect();
    debug!("{}: {} of {} rows complete", path.display(), complete.len(), csv.rows.len());

    Ok(csv
        .header
        .iter()
        .enumerate()
        .map(|(i, name)| Column {
            name: name.clone(),
            values: complete.iter().map(|row| csv.field(row, i).to_string()).collect(),
        })
        .collect())
}

/// CSV files of a directory, sorted by name
pub fn csv_files(directory: &Path) -> MetaResult<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(MetaError::InvalidArgument(format!("{} is not a directory", directory.display())));
    }
    let mut files: Vec<PathBuf> = fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
