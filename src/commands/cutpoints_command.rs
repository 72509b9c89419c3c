//! Choropleth cut point command

use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::cutpoints::{cutpoints_for_directory, CutpointOptions};
use crate::cutpoints::dataset::csv_files;
use crate::metadata::errors::{MetaError, MetaResult};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Default number of classes
pub const DEFAULT_CLASSES: usize = 11;

/// Command writing natural-breaks filter files for CSV data
pub struct CutpointsCommand<'a> {
    input: PathBuf,
    options: CutpointOptions,
    logger: &'a Logger,
}

impl<'a> CutpointsCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let input = args.get_one::<String>("input")
            .map(PathBuf::from)
            .ok_or_else(|| MetaError::InvalidArgument("Missing input directory".to_string()))?;
        let project_id = args.get_one::<String>("project")
            .ok_or_else(|| MetaError::InvalidArgument("Missing project id".to_string()))?
            .clone();

        let classes = match args.get_one::<String>("classes") {
            Some(value) => value.parse::<usize>().map_err(|_| {
                MetaError::InvalidArgument(format!("Invalid number of classes: {}", value))
            })?,
            None => DEFAULT_CLASSES,
        };
        let output_directory = args.get_one::<String>("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| input.clone());

        Ok(CutpointsCommand {
            input,
            options: CutpointOptions { project_id, classes, output_directory },
            logger,
        })
    }
}

impl<'a> Command for CutpointsCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        fs::create_dir_all(&self.options.output_directory)?;
        let total = csv_files(&self.input)?.len();
        info!("Computing {} classes for {} files in {}", self.options.classes, total, self.input.display());

        let progress = ProgressTracker::new(total as u64, "Classifying");
        let report = cutpoints_for_directory(&self.input, &self.options, |path: &Path| {
            progress.file_done(&path.display().to_string());
        })?;
        progress.finish("Classified");

        info!("Cut points finished: {}", report);
        self.logger.log_report("cutpoints", &self.input, &report)?;
        Ok(())
    }
}
