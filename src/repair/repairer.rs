//! Applies a [`CharRepair`] table to metadata documents

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::metadata::constants::{attrs, tags};
use crate::metadata::document::{Document, Element};
use crate::metadata::errors::{MetaError, MetaResult};
use crate::repair::char_map::CharRepair;

/// Attributes repaired on each element kind
const VARIABLE_ATTRIBUTES: [&str; 2] = [attrs::LABEL, attrs::Q_LABEL];
const TABLE_ATTRIBUTES: [&str; 2] = [attrs::TITLE, attrs::TITLE_WRAPPED];

/// Counts collected by a repair run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub files: usize,
    pub files_changed: usize,
    pub tables_repaired: usize,
    pub variables_repaired: usize,
    pub attributes_repaired: usize,
}

impl RepairReport {
    fn absorb(&mut self, other: &RepairReport) {
        self.files += other.files;
        self.files_changed += other.files_changed;
        self.tables_repaired += other.tables_repaired;
        self.variables_repaired += other.variables_repaired;
        self.attributes_repaired += other.attributes_repaired;
    }

    pub fn changed(&self) -> bool {
        self.attributes_repaired > 0
    }
}

impl fmt::Display for RepairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files ({} changed), {} tables, {} variables, {} attributes repaired",
            self.files, self.files_changed, self.tables_repaired, self.variables_repaired,
            self.attributes_repaired
        )
    }
}

fn repair_element(element: &mut Element, names: &[&str], repair: &CharRepair) -> usize {
    let mut repaired = 0;
    for name in names {
        // missing attributes are left alone
        let fixed = match element.attr(name) {
            Some(value) => repair.repair(value),
            None => None,
        };
        if let Some(fixed) = fixed {
            element.set_attr(name, &fixed);
            repaired += 1;
        }
    }
    repaired
}

/// Repair every table and variable of a document in place
pub fn repair_document(document: &mut Document, repair: &CharRepair) -> RepairReport {
    let mut report = RepairReport::default();

    document.root.walk_mut(&mut |element: &mut Element| {
        let names: &[&str] = match element.name.as_str() {
            tags::VARIABLE => &VARIABLE_ATTRIBUTES,
            tags::TABLE => &TABLE_ATTRIBUTES,
            _ => return,
        };
        let repaired = repair_element(element, names, repair);
        if repaired == 0 {
            return;
        }
        if element.name == tags::TABLE {
            report.tables_repaired += 1;
        } else {
            report.variables_repaired += 1;
        }
        report.attributes_repaired += repaired;
    });

    report
}

/// Repair one file, rewriting it only when something changed
pub fn repair_file<P: AsRef<Path>>(path: P, repair: &CharRepair) -> MetaResult<RepairReport> {
    let path = path.as_ref();
    let mut document = Document::load(path)?;
    let mut report = repair_document(&mut document, repair);
    report.files = 1;

    if report.changed() {
        document.save(path)?;
        report.files_changed = 1;
        info!("Repaired {}: {}", path.display(), report);
    } else {
        debug!("Nothing to repair in {}", path.display());
    }
    Ok(report)
}

/// XML files of a directory, sorted by name
///
/// With `names`, only those files are returned, and each must exist.
pub fn collect_xml_files(directory: &Path, names: Option<&[String]>) -> MetaResult<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(MetaError::InvalidArgument(format!("{} is not a directory", directory.display())));
    }

    if let Some(names) = names {
        return names
            .iter()
            .map(|name| {
                let path = directory.join(name);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(MetaError::InvalidArgument(format!("{} does not exist", path.display())))
                }
            })
            .collect();
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("xml"))
            .unwrap_or(false);
        if path.is_file() && is_xml {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Repair a batch of files, calling `on_file` after each one
pub fn repair_files<F>(files: &[PathBuf], repair: &CharRepair, mut on_file: F) -> MetaResult<RepairReport>
where
    F: FnMut(&Path),
{
    let mut total = RepairReport::default();
    for path in files {
        let report = repair_file(path, repair)?;
        total.absorb(&report);
        on_file(path);
    }
    Ok(total)
}
