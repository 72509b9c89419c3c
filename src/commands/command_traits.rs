//! Command pattern interfaces
//!
//! Every subcommand of the CLI is a [`Command`] built from its clap matches
//! by a [`CommandFactory`].

use crate::utils::logger::Logger;
use crate::metadata::errors::MetaResult;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// Result indicating success or an error
    fn execute(&self) -> MetaResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create the Command selected by the CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Run log the command writes its summary to
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches, logger: &'a Logger) -> MetaResult<Box<dyn Command + 'a>>;
}
