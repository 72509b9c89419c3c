//! Generator configuration file
//!
//! The configuration is a TOML file describing one project:
//!
//! ```toml
//! project_name = "Padron Continuo 2019"
//! project_id = "PC2019"
//! project_year = 2019
//! project_date = 2019-06-30
//! metadata_file_name = "PC2019.xml"
//! output_directory = "out"
//!
//! [database]
//! server = "prime"
//! name = "PC2019"
//! user = "loader"
//!
//! [[geo_levels]]
//! sumlev = "SL010"
//! label = "Nation"
//! fips_length = 2
//! partial_fips_length = 2
//! indent = 0
//!
//! [tables]
//! source = "catalog"
//! directory = "catalog"
//! variable_descriptions = "descriptions"
//! file_names_list = "files.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use log::{debug, warn};
use serde::Deserialize;
use toml::value::Datetime;

use crate::generator::model::{GeoLevel, TableSpec};
use crate::metadata::errors::{MetaError, MetaResult};

/// Default name of the hand-maintained survey dataset
pub const DEFAULT_SE_DATASET_NAME: &str = "Social Explorer Tables";

/// Database descriptors, only written into dataset attributes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub server: String,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Overrides the connection string built from the fields above
    pub connection_string: Option<String>,
}

impl DatabaseConfig {
    pub fn connection_string(&self) -> String {
        match &self.connection_string {
            Some(explicit) => explicit.clone(),
            None => format!(
                "Server={}; database=; uid={};pwd={};Connect Timeout=1;Pooling=True",
                self.server, self.user, self.password
            ),
        }
    }
}

/// Where the original tables of the project come from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum TableSource {
    /// Tables listed in the configuration itself
    Inline {
        #[serde(default)]
        tables: Vec<TableSpec>,
    },
    /// Tables read from an exported database catalog
    Catalog {
        directory: PathBuf,
        /// Variable description file, or a directory of them
        #[serde(default)]
        variable_descriptions: Option<PathBuf>,
        /// `file name → title` list of the imported data files
        #[serde(default)]
        file_names_list: Option<PathBuf>,
    },
}

impl Default for TableSource {
    fn default() -> Self {
        TableSource::Inline { tables: Vec::new() }
    }
}

/// Everything the generator needs to build a metadata document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub project_name: String,
    pub project_id: String,
    pub project_year: u32,
    pub project_date: Option<Datetime>,
    pub metadata_file_name: String,
    pub output_directory: PathBuf,
    pub se_dataset_name: Option<String>,
    pub database: DatabaseConfig,
    pub geo_levels: Vec<GeoLevel>,
    pub tables: TableSource,
}

/// Problems found by [`GeneratorConfig::verify`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl GeneratorConfig {
    /// Read and parse a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> MetaResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(MetaError::ConfigError(format!(
                "Config file doesn't exist on selected location: {}", path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!("Loaded configuration for project '{}' from {}", config.project_id, path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> MetaResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn se_dataset_name(&self) -> &str {
        self.se_dataset_name.as_deref().unwrap_or(DEFAULT_SE_DATASET_NAME)
    }

    /// Path the generated document is written to
    pub fn output_path(&self) -> PathBuf {
        let file_name = if self.metadata_file_name.is_empty() {
            format!("{}.xml", self.project_id)
        } else {
            self.metadata_file_name.clone()
        };
        self.output_directory.join(file_name)
    }

    /// Check the configuration against the given current year
    pub fn verify(&self, current_year: i32) -> ConfigReport {
        let mut report = ConfigReport::default();

        if self.project_name.trim().is_empty() {
            report.errors.push("Project name not set properly in config file".to_string());
        }
        if self.project_id.trim().is_empty() {
            report.errors.push("Project id not set properly in config file".to_string());
        }
        match &self.project_date {
            Some(date) if date.date.is_some() => {}
            _ => report.errors.push("Project date not set properly in config file".to_string()),
        }
        if self.database.name.trim().is_empty() {
            report.errors.push("Database name not set properly in config file".to_string());
        }
        if self.database.server.trim().is_empty() {
            report.errors.push("Server name not set properly in config file".to_string());
        }
        if self.database.user.trim().is_empty() {
            report.errors.push("User name not set properly in config file".to_string());
        }
        if !(1000..=9999).contains(&self.project_year) {
            report.errors.push("Project year not set properly in config file".to_string());
        } else if self.project_year as i32 > current_year {
            report.warnings.push("Project year is set in future".to_string());
        }
        if self.geo_levels.is_empty() {
            report.warnings.push("No geo levels configured".to_string());
        }

        match &self.tables {
            TableSource::Inline { tables } => {
                if tables.is_empty() {
                    report.warnings.push("No inline tables configured".to_string());
                }
            }
            TableSource::Catalog { directory, variable_descriptions, .. } => {
                if !directory.is_dir() {
                    report.errors.push(format!("Catalog directory {} does not exist", directory.display()));
                }
                match variable_descriptions {
                    Some(location) if location.is_file() || location.is_dir() => {}
                    _ => report.errors.push("Something is wrong with variable info location".to_string()),
                }
            }
        }

        report
    }

    /// Verify against the current year, logging warnings and failing on errors
    pub fn validate(&self) -> MetaResult<()> {
        let report = self.verify(chrono::Local::now().year());
        for warning in &report.warnings {
            warn!("{}", warning);
        }
        if report.is_ok() {
            Ok(())
        } else {
            Err(MetaError::ConfigError(report.errors.join("; ")))
        }
    }
}
