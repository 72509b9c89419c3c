//! Cut point files for every numeric column of CSV inputs

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, log};

use crate::cutpoints::dataset::{csv_files, read_columns};
use crate::cutpoints::filters::{category_filters, output_file_name};
use crate::cutpoints::jenks::{jenks_breaks, parse_values};
use crate::metadata::errors::MetaResult;

/// Parameters of a cut point run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutpointOptions {
    pub project_id: String,
    pub classes: usize,
    pub output_directory: PathBuf,
}

/// Counts collected by a cut point run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutpointReport {
    pub files: usize,
    pub columns_written: usize,
    pub columns_skipped: usize,
    pub written: Vec<PathBuf>,
}

impl CutpointReport {
    fn absorb(&mut self, other: CutpointReport) {
        self.files += other.files;
        self.columns_written += other.columns_written;
        self.columns_skipped += other.columns_skipped;
        self.written.extend(other.written);
    }
}

impl fmt::Display for CutpointReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} cut point files written, {} columns skipped",
            self.files, self.columns_written, self.columns_skipped
        )
    }
}

/// Classify every column of one CSV file and write its filters
///
/// Columns that cannot be classified are reported and skipped.
pub fn cutpoints_for_file(path: &Path, options: &CutpointOptions) -> MetaResult<CutpointReport> {
    let mut report = CutpointReport { files: 1, ..Default::default() };

    for column in read_columns(path)? {
        let breaks = parse_values(&column.values).and_then(|values| jenks_breaks(&values, options.classes));
        let breaks = match breaks {
            Ok(breaks) => breaks,
            Err(e) => {
                log!(e.level(), "Cannot create cut points for {} in {}: {}", column.name, path.display(), e);
                report.columns_skipped += 1;
                continue;
            }
        };

        let output = options.output_directory.join(output_file_name(&options.project_id, &column.name));
        info!("Writing cutpoints for {}", column.name);
        category_filters(&options.project_id, &column.name, &breaks).save(&output)?;
        report.columns_written += 1;
        report.written.push(output);
    }

    Ok(report)
}

/// Run [`cutpoints_for_file`] over every CSV file of a directory
pub fn cutpoints_for_directory<F>(directory: &Path, options: &CutpointOptions, mut on_file: F) -> MetaResult<CutpointReport>
where
    F: FnMut(&Path),
{
    let mut total = CutpointReport::default();
    for file in csv_files(directory)? {
        total.absorb(cutpoints_for_file(&file, options)?);
        on_file(&file);
    }
    Ok(total)
}
