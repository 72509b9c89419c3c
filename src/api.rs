use std::path::{Path, PathBuf};
use log::info;
use crate::config::GeneratorConfig;
use crate::cutpoints::{cutpoints_for_directory, CutpointOptions, CutpointReport};
use crate::generator::{write_document, GenerationStats, MetadataGenerator};
use crate::merge::{merge_files, MergeOptions, MergeReport};
use crate::metadata::document::Document;
use crate::metadata::errors::MetaResult;
use crate::overrides::{override_files, OverrideReport, OverrideSettings, PaletteCatalog};
use crate::repair::{collect_xml_files, repair_files, CharRepair, RepairReport};
use crate::sync::{SyncPlan, SyncReport};
use crate::utils::logger::Logger;

/// Main interface to the MetaKit library
///
/// Each operation works on files, writes its results and appends a summary
/// to the run log (when one was given).
pub struct MetaKit {
    logger: Logger,
}

impl MetaKit {
    /// Create a new MetaKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional run log path; without one nothing is logged to file
    pub fn new(log_file: Option<&Path>) -> MetaResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };
        Ok(MetaKit { logger })
    }

    /// Copy attributes from a template document into target documents
    ///
    /// Targets are rewritten in place, in order; the first failure stops the batch.
    ///
    /// # Arguments
    /// * `template` - Previous-year document
    /// * `targets` - Documents to update
    /// * `plan` - Scopes, key rule and display name step
    pub fn sync(&self, template: &Path, targets: &[PathBuf], plan: &SyncPlan) -> MetaResult<SyncReport> {
        let prepared = plan.prepare(&Document::load(template)?)?;
        let report = prepared.apply_files(targets, |_| {})?;
        self.logger.log_report("sync", template, &report)?;
        Ok(report)
    }

    /// Repair mis-decoded characters in the XML files of a directory
    ///
    /// # Arguments
    /// * `directory` - Directory of metadata files
    /// * `names` - Only these file names, when given
    /// * `repair` - Replacement table
    pub fn repair(&self, directory: &Path, names: Option<&[String]>, repair: &CharRepair) -> MetaResult<RepairReport> {
        let files = collect_xml_files(directory, names)?;
        let report = repair_files(&files, repair, |_| {})?;
        self.logger.log_report("repair", directory, &report)?;
        Ok(report)
    }

    /// Generate a metadata document from a configuration file
    ///
    /// # Returns
    /// The path written and the generation counts
    pub fn generate(&self, config_path: &Path) -> MetaResult<(PathBuf, GenerationStats)> {
        let config = GeneratorConfig::load(config_path)?;
        self.generate_with(&config)
    }

    /// Generate a metadata document from an already loaded configuration
    pub fn generate_with(&self, config: &GeneratorConfig) -> MetaResult<(PathBuf, GenerationStats)> {
        config.validate()?;
        let (document, stats) = MetadataGenerator::new(config).generate()?;
        let path = write_document(&document, &config.output_path())?;
        self.logger.log_report("generate", &path, &stats)?;
        Ok((path, stats))
    }

    /// Copy a survey dataset from `source` into `target`
    ///
    /// # Arguments
    /// * `output` - Where to write the merged document, defaults to `target`
    pub fn merge(&self, source: &Path, target: &Path, output: Option<&Path>, options: &MergeOptions) -> MetaResult<MergeReport> {
        let report = merge_files(source, target, output, options)?;
        self.logger.log_report("merge", target, &report)?;
        Ok(report)
    }

    /// Write cut point filters for every CSV file of a directory
    pub fn cutpoints(&self, input: &Path, options: &CutpointOptions) -> MetaResult<CutpointReport> {
        std::fs::create_dir_all(&options.output_directory)?;
        let report = cutpoints_for_directory(input, options, |_| {})?;
        self.logger.log_report("cutpoints", input, &report)?;
        Ok(report)
    }

    /// Apply a settings sheet to metadata files
    ///
    /// # Arguments
    /// * `settings` - Settings CSV
    /// * `palettes` - Optional palette catalog (JSON)
    /// * `files` - Documents to update in place
    pub fn apply_overrides(&self, settings: &Path, palettes: Option<&Path>, files: &[PathBuf]) -> MetaResult<OverrideReport> {
        let sheet = OverrideSettings::load(settings)?;
        let catalog = match palettes {
            Some(path) => PaletteCatalog::load(path)?,
            None => PaletteCatalog::default(),
        };
        let report = override_files(files, &sheet, &catalog, |_| {})?;
        info!("Applied {} to {} files", settings.display(), files.len());
        self.logger.log_report("overrides", settings, &report)?;
        Ok(report)
    }
}
