//! Command line definition

use clap::{Arg, ArgAction, Command as ClapCommand};

use crate::commands::cutpoints_command::DEFAULT_CLASSES;
use crate::commands::generate_command::DEFAULT_CONFIG;

fn sync_subcommand() -> ClapCommand {
    ClapCommand::new("sync")
        .about("Copy table and variable attributes from a template document into target documents")
        .arg(
            Arg::new("template")
                .help("Template (previous year) metadata file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("targets")
                .help("Metadata files to update in place")
                .required(true)
                .num_args(1..)
                .index(2),
        )
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .help("Key rule matching nodes by name: exact, trailing:N or suffix")
                .value_name("RULE")
                .default_value("exact"),
        )
        .arg(
            Arg::new("preset")
                .short('p')
                .long("preset")
                .help("Attribute preset: variable-formatting, variable-full, variable-aggregation, table-full")
                .value_name("PRESET")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("attributes")
                .short('a')
                .long("attributes")
                .help("Comma separated attributes to copy")
                .value_name("NAMES"),
        )
        .arg(
            Arg::new("kind")
                .long("kind")
                .help("Element kind of --attributes (table or variable)")
                .value_name("KIND")
                .default_value("variable"),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .help("Only nodes of this survey dataset (e.g. ORG)")
                .value_name("ABBREVIATION"),
        )
        .arg(
            Arg::new("display-name")
                .long("display-name")
                .help("Also copy the survey display name, re-dated to the target year")
                .action(ArgAction::SetTrue),
        )
}

fn repair_subcommand() -> ClapCommand {
    ClapCommand::new("repair")
        .about("Fix mis-decoded characters in labels and titles")
        .arg(
            Arg::new("directory")
                .help("Directory of metadata files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("files")
                .short('f')
                .long("files")
                .help("Only repair these file names")
                .value_name("FILE")
                .num_args(1..),
        )
        .arg(
            Arg::new("map")
                .short('m')
                .long("map")
                .help("Extra replacement as MALFORMED=CORRECT")
                .value_name("ENTRY")
                .action(ArgAction::Append),
        )
}

fn generate_subcommand() -> ClapCommand {
    ClapCommand::new("generate")
        .about("Generate a new metadata document from a configuration file")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file")
                .value_name("FILE")
                .default_value(DEFAULT_CONFIG),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Only validate the configuration")
                .action(ArgAction::SetTrue),
        )
}

fn merge_subcommand() -> ClapCommand {
    ClapCommand::new("merge")
        .about("Copy the tables of a survey dataset into another document")
        .arg(
            Arg::new("source")
                .help("Document the tables are copied from")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .help("Document the tables are copied into")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the merged document here instead of the target")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .help("Abbreviation of the survey dataset to copy")
                .value_name("ABBREVIATION")
                .default_value("SE"),
        )
        .arg(
            Arg::new("old-id")
                .long("old-id")
                .help("Project id used by the source (default: source survey name)")
                .value_name("ID"),
        )
        .arg(
            Arg::new("new-id")
                .long("new-id")
                .help("Project id of the target (default: target survey name)")
                .value_name("ID"),
        )
}

fn cutpoints_subcommand() -> ClapCommand {
    ClapCommand::new("cutpoints")
        .about("Write natural-breaks filters for every numeric column of CSV files")
        .arg(
            Arg::new("input")
                .help("Directory of CSV files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .help("Project id used in filter names")
                .value_name("ID")
                .required(true),
        )
        .arg(
            Arg::new("classes")
                .short('k')
                .long("classes")
                .help(format!("Number of classes (default: {})", DEFAULT_CLASSES))
                .value_name("N"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory (default: the input directory)")
                .value_name("DIR"),
        )
}

fn overrides_subcommand() -> ClapCommand {
    ClapCommand::new("overrides")
        .about("Apply table and variable overrides from a settings sheet")
        .arg(
            Arg::new("settings")
                .help("Settings CSV")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("files")
                .help("Metadata files to update in place")
                .required(true)
                .num_args(1..)
                .index(2),
        )
        .arg(
            Arg::new("palettes")
                .long("palettes")
                .help("Color palette catalog (JSON)")
                .value_name("FILE"),
        )
}

/// The `metakit` command line
pub fn cli() -> ClapCommand {
    ClapCommand::new("metakit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Maintain survey metadata documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write the run log to this file")
                .value_name("FILE")
                .global(true),
        )
        .subcommand(sync_subcommand())
        .subcommand(repair_subcommand())
        .subcommand(generate_subcommand())
        .subcommand(merge_subcommand())
        .subcommand(cutpoints_subcommand())
        .subcommand(overrides_subcommand())
}
