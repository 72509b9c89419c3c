//! Survey dataset merge command

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::merge::{merge_files, MergeOptions};
use crate::metadata::errors::{MetaError, MetaResult};
use crate::utils::logger::Logger;

/// Command copying a survey dataset from one document into another
pub struct MergeCommand<'a> {
    source: PathBuf,
    target: PathBuf,
    output: Option<PathBuf>,
    options: MergeOptions,
    logger: &'a Logger,
}

impl<'a> MergeCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let source = args.get_one::<String>("source")
            .ok_or_else(|| MetaError::InvalidArgument("Missing source file".to_string()))?;
        let target = args.get_one::<String>("target")
            .ok_or_else(|| MetaError::InvalidArgument("Missing target file".to_string()))?;

        let mut options = MergeOptions::default();
        if let Some(dataset) = args.get_one::<String>("dataset") {
            options.dataset = dataset.clone();
        }
        options.old_project_id = args.get_one::<String>("old-id").cloned();
        options.new_project_id = args.get_one::<String>("new-id").cloned();

        Ok(MergeCommand {
            source: PathBuf::from(source),
            target: PathBuf::from(target),
            output: args.get_one::<String>("output").map(PathBuf::from),
            options,
            logger,
        })
    }
}

impl<'a> Command for MergeCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        info!("Merging dataset {} of {} into {}",
              self.options.dataset, self.source.display(), self.target.display());

        let report = merge_files(&self.source, &self.target, self.output.as_deref(), &self.options)?;

        info!("Merge finished: {}", report);
        self.logger.log_report("merge", &self.target, &report)?;
        Ok(())
    }
}
