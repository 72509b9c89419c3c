//! CLI command implementations
//!
//! One command per `metakit` subcommand, built by [`MetakitCommandFactory`].

pub mod cli;
pub mod command_traits;
pub mod sync_command;
pub mod repair_command;
pub mod generate_command;
pub mod merge_command;
pub mod cutpoints_command;
pub mod overrides_command;

pub use cli::cli;
pub use command_traits::{Command, CommandFactory};
pub use sync_command::SyncCommand;
pub use repair_command::RepairCommand;
pub use generate_command::GenerateCommand;
pub use merge_command::MergeCommand;
pub use cutpoints_command::CutpointsCommand;
pub use overrides_command::OverridesCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::metadata::errors::{MetaError, MetaResult};

/// Factory for creating command instances based on CLI arguments
///
/// Picks the command from the subcommand of the matches.
pub struct MetakitCommandFactory;

impl MetakitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        MetakitCommandFactory
    }
}

impl Default for MetakitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for MetakitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> MetaResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("sync", sub)) => Ok(Box::new(SyncCommand::new(sub, logger)?)),
            Some(("repair", sub)) => Ok(Box::new(RepairCommand::new(sub, logger)?)),
            Some(("generate", sub)) => Ok(Box::new(GenerateCommand::new(sub, logger)?)),
            Some(("merge", sub)) => Ok(Box::new(MergeCommand::new(sub, logger)?)),
            Some(("cutpoints", sub)) => Ok(Box::new(CutpointsCommand::new(sub, logger)?)),
            Some(("overrides", sub)) => Ok(Box::new(OverridesCommand::new(sub, logger)?)),
            Some((name, _)) => Err(MetaError::InvalidArgument(format!("Unknown command: {}", name))),
            None => Err(MetaError::InvalidArgument("No command given".to_string())),
        }
    }
}
