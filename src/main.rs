use std::process;
use log::{error, LevelFilter};

use metakit::utils::logger::Logger;
use metakit::commands::{cli, CommandFactory, MetakitCommandFactory};

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    let log_file = matches.get_one::<String>("log-file");

    // with a run log, records and command summaries share one file handle
    let disabled;
    let logger: &Logger = match log_file {
        Some(path) => match Logger::init_global_logger(path, level) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        },
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .format_timestamp(None)
                .init();
            disabled = Logger::disabled();
            &disabled
        }
    };

    let factory = MetakitCommandFactory::new();

    let command_result = factory.create_command(&matches, logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
