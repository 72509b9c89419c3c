//! Settings-driven override command

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::metadata::errors::{MetaError, MetaResult};
use crate::overrides::{override_files, OverrideSettings, PaletteCatalog};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command applying a settings sheet to metadata documents
pub struct OverridesCommand<'a> {
    settings: PathBuf,
    palettes: Option<PathBuf>,
    files: Vec<PathBuf>,
    logger: &'a Logger,
}

impl<'a> OverridesCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let settings = args.get_one::<String>("settings")
            .ok_or_else(|| MetaError::InvalidArgument("Missing settings file".to_string()))?;
        let files = args.get_many::<String>("files")
            .ok_or_else(|| MetaError::InvalidArgument("Missing metadata files".to_string()))?
            .map(PathBuf::from)
            .collect();

        Ok(OverridesCommand {
            settings: PathBuf::from(settings),
            palettes: args.get_one::<String>("palettes").map(PathBuf::from),
            files,
            logger,
        })
    }
}

impl<'a> Command for OverridesCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        let settings = OverrideSettings::load(&self.settings)?;
        let palettes = match &self.palettes {
            Some(path) => PaletteCatalog::load(path)?,
            None => PaletteCatalog::default(),
        };
        info!("Applying {} settings rows ({} palettes) to {} files",
              settings.rows.len(), palettes.len(), self.files.len());

        let progress = ProgressTracker::new(self.files.len() as u64, "Applying overrides");
        let report = override_files(&self.files, &settings, &palettes, |path: &Path| {
            progress.file_done(&path.display().to_string());
        })?;
        progress.finish("Overrides applied");

        info!("Overrides finished: {}", report);
        self.logger.log_report("overrides", &self.settings, &report)?;
        Ok(())
    }
}
