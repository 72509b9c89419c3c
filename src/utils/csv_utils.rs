//! Minimal CSV reading
//!
//! The inputs handled here (catalog exports, variable descriptions, cut point
//! data, override settings) are small comma-separated files, optionally with
//! double-quoted fields spanning several lines.

use std::fs;
use std::path::Path;

use log::debug;

use crate::metadata::errors::{MetaError, MetaResult};

/// Split one line into fields, honouring double quotes (`""` is a literal quote)
pub fn split_csv_line(line: &str) -> Vec<String> {
    split_csv_records(line).into_iter().next().unwrap_or_else(|| vec![String::new()])
}

/// Split CSV content into records
///
/// Quoted fields may contain commas and line breaks. Records end at `\n` or
/// `\r\n` outside quotes.
pub fn split_csv_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => record.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Decode file content as UTF-8, falling back to Latin-1
///
/// Settings sheets exported from spreadsheets are often Latin-1 encoded.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Read a CSV file into rows of fields
///
/// A UTF-8 byte order mark is dropped and blank lines are skipped. Content
/// that is not valid UTF-8 is read as Latin-1.
pub fn read_csv_rows<P: AsRef<Path>>(path: P) -> MetaResult<Vec<Vec<String>>> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .map_err(|e| MetaError::GenericError(format!("Cannot read {}: {}", path.display(), e)))?;
    let content = decode_text(bytes);
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let rows: Vec<Vec<String>> = split_csv_records(content)
        .into_iter()
        .filter(|row| !(row.len() == 1 && row[0].trim().is_empty()))
        .collect();

    debug!("Read {} CSV rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// A CSV file with a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Read a file whose first row names the columns
    pub fn read<P: AsRef<Path>>(path: P) -> MetaResult<Self> {
        let path = path.as_ref();
        let mut rows = read_csv_rows(path)?.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| MetaError::GenericError(format!("{} is empty", path.display())))?
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        Ok(CsvTable { header, rows: rows.collect() })
    }

    /// Index of a named column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Index of a named column, failing when it is absent
    pub fn require_column(&self, name: &str) -> MetaResult<usize> {
        self.column(name)
            .ok_or_else(|| MetaError::GenericError(format!("CSV column '{}' not found", name)))
    }

    /// Field of a row by column index, empty when the row is short
    pub fn field<'a>(&self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(|f| f.trim()).unwrap_or("")
    }
}
