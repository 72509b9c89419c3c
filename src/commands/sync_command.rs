//! Template to target attribute synchronization command

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::metadata::document::Document;
use crate::metadata::errors::{MetaError, MetaResult};
use crate::sync::{ElementKind, KeyRule, SyncPlan, SyncScope};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command copying attributes from a template document into target documents
pub struct SyncCommand<'a> {
    /// Previous-year document the values come from
    template: PathBuf,
    /// Documents patched in place
    targets: Vec<PathBuf>,
    plan: SyncPlan,
    logger: &'a Logger,
}

impl<'a> SyncCommand<'a> {
    /// Create a new sync command
    ///
    /// # Arguments
    /// * `args` - Matches of the `sync` subcommand
    /// * `logger` - Run log
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let template = args.get_one::<String>("template")
            .ok_or_else(|| MetaError::InvalidArgument("Missing template file".to_string()))?;
        let targets: Vec<PathBuf> = args.get_many::<String>("targets")
            .ok_or_else(|| MetaError::InvalidArgument("Missing target files".to_string()))?
            .map(PathBuf::from)
            .collect();

        let key_rule = args.get_one::<String>("key")
            .map(|k| k.parse::<KeyRule>())
            .transpose()?
            .unwrap_or(KeyRule::Exact);
        let dataset = args.get_one::<String>("dataset").map(String::as_str);

        let mut plan = SyncPlan::new(key_rule).with_display_name(args.get_flag("display-name"));
        if let Some(presets) = args.get_many::<String>("preset") {
            for preset in presets {
                plan = plan.with_scope(SyncScope::preset(preset)?.within(dataset));
            }
        }
        if let Some(attributes) = args.get_one::<String>("attributes") {
            let kind = args.get_one::<String>("kind")
                .map(|k| k.parse::<ElementKind>())
                .transpose()?
                .unwrap_or(ElementKind::Variable);
            plan = plan.with_scope(SyncScope::custom(kind, attributes)?.within(dataset));
        }

        Ok(SyncCommand {
            template: PathBuf::from(template),
            targets,
            plan,
            logger,
        })
    }

    fn target_names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.display().to_string()).collect()
    }
}

impl<'a> Command for SyncCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        info!("Synchronizing {} from template {}", self.target_names().join(", "), self.template.display());

        let template = Document::load(&self.template)?;
        let prepared = self.plan.prepare(&template)?;

        let progress = ProgressTracker::new(self.targets.len() as u64, "Synchronizing");
        let report = prepared.apply_files(&self.targets, |path: &Path| {
            progress.file_done(&path.display().to_string());
        })?;
        progress.finish("Synchronized");

        info!("Sync finished: {}", report);
        self.logger.log_report("sync", &self.template, &report)?;
        Ok(())
    }
}
