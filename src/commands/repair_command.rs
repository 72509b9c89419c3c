//! Character repair command

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::metadata::errors::{MetaError, MetaResult};
use crate::repair::{collect_xml_files, repair_files, CharRepair};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command fixing mis-decoded characters in a directory of documents
pub struct RepairCommand<'a> {
    directory: PathBuf,
    /// Only these file names, when given
    files: Option<Vec<String>>,
    repair: CharRepair,
    logger: &'a Logger,
}

impl<'a> RepairCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let directory = args.get_one::<String>("directory")
            .ok_or_else(|| MetaError::InvalidArgument("Missing metadata directory".to_string()))?;
        let files = args.get_many::<String>("files").map(|names| names.cloned().collect());

        let extra = match args.get_many::<String>("map") {
            Some(entries) => entries
                .map(|entry| CharRepair::parse_entry(entry))
                .collect::<MetaResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        let repair = CharRepair::with_extra(extra)?;

        Ok(RepairCommand {
            directory: PathBuf::from(directory),
            files,
            repair,
            logger,
        })
    }
}

impl<'a> Command for RepairCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        let files = collect_xml_files(&self.directory, self.files.as_deref())?;
        info!("Repairing {} files in {} ({} replacements)",
              files.len(), self.directory.display(), self.repair.entries().len());

        let progress = ProgressTracker::new(files.len() as u64, "Repairing");
        let report = repair_files(&files, &self.repair, |path: &Path| {
            progress.file_done(&path.display().to_string());
        })?;
        progress.finish("Repaired");

        info!("Repair finished: {}", report);
        self.logger.log_report("repair", &self.directory, &report)?;
        Ok(())
    }
}
