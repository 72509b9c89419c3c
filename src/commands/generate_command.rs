//! Metadata document generation command

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::config::GeneratorConfig;
use crate::generator::{write_document, MetadataGenerator};
use crate::metadata::errors::MetaResult;
use crate::utils::logger::Logger;

/// Default configuration file name
pub const DEFAULT_CONFIG: &str = "metakit.toml";

/// Command generating a new metadata document from a configuration file
pub struct GenerateCommand<'a> {
    config_path: PathBuf,
    /// Only validate the configuration
    check_only: bool,
    logger: &'a Logger,
}

impl<'a> GenerateCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let config_path = args.get_one::<String>("config")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

        Ok(GenerateCommand {
            config_path,
            check_only: args.get_flag("check"),
            logger,
        })
    }
}

impl<'a> Command for GenerateCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        info!("Loading configuration from {}", self.config_path.display());
        let config = GeneratorConfig::load(&self.config_path)?;

        config.validate()?;
        if self.check_only {
            info!("Configuration {} is valid", self.config_path.display());
            return Ok(());
        }

        let mut generator = MetadataGenerator::new(&config);
        let (document, stats) = generator.generate()?;
        let path = write_document(&document, &config.output_path())?;

        info!("Generated {}: {}", path.display(), stats);
        self.logger.log_report("generate", &path, &stats)?;
        Ok(())
    }
}
