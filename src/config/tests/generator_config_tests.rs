//! Tests for the generator configuration

extern crate std;

use std::fs;

use crate::config::generator_config::{GeneratorConfig, TableSource};

const INLINE_CONFIG: &str = r#"
project_name = "Padron Continuo 2019"
project_id = "PC2019"
project_year = 2019
project_date = 2019-06-30
metadata_file_name = "PC2019.xml"
output_directory = "out"

[database]
server = "prime"
name = "PC2019"
user = "loader"
password = "secret"

[[geo_levels]]
sumlev = "SL010"
label = "Nation"
fips_length = 2
partial_fips_length = 2
indent = 0

[[geo_levels]]
sumlev = "SL040"
label = "Province"
fips_length = 4
partial_fips_length = 2
indent = 1
plural = "Provinces"

[tables]
source = "inline"

[[tables.tables]]
name = "T001"
title = "Total Population"

[[tables.tables.variables]]
name = "T001_001"
label = "Total Population"

[[tables.tables.variables]]
name = "T001_002"
label = "Male"
indent = 1
"#;

#[test]
fn test_parse_inline_config() {
    let config = GeneratorConfig::parse(INLINE_CONFIG).unwrap();

    std::assert_eq!(config.project_id, "PC2019");
    std::assert_eq!(config.geo_levels.len(), 2);
    std::assert_eq!(config.geo_levels[1].plural.as_deref(), Some("Provinces"));
    std::assert_eq!(config.se_dataset_name(), "Social Explorer Tables");
    std::assert_eq!(config.output_path(), std::path::PathBuf::from("out").join("PC2019.xml"));

    match &config.tables {
        TableSource::Inline { tables } => {
            std::assert_eq!(tables.len(), 1);
            std::assert_eq!(tables[0].variables[1].indent, 1);
            std::assert_eq!(tables[0].variables[0].data_type, "5");
            std::assert_eq!(tables[0].db_suffix(), "T001");
        }
        other => std::panic!("unexpected table source {:?}", other),
    }

    std::assert_eq!(
        config.database.connection_string(),
        "Server=prime; database=; uid=loader;pwd=secret;Connect Timeout=1;Pooling=True"
    );
}

#[test]
fn test_valid_config_has_no_errors() {
    let config = GeneratorConfig::parse(INLINE_CONFIG).unwrap();
    let report = config.verify(2024);
    std::assert!(report.is_ok(), "{:?}", report.errors);
    std::assert!(report.warnings.is_empty());
}

#[test]
fn test_future_year_is_a_warning() {
    let config = GeneratorConfig::parse(INLINE_CONFIG).unwrap();
    let report = config.verify(2018);
    std::assert!(report.is_ok());
    std::assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_missing_values_are_errors() {
    let config = GeneratorConfig::parse("project_year = 19\n").unwrap();
    let report = config.verify(2024);
    // name, id, date, db name, server, user, year
    std::assert_eq!(report.errors.len(), 7);
    std::assert!(config.validate().is_err());
}

#[test]
fn test_project_date_must_be_a_date() {
    let config = GeneratorConfig::parse(
        &INLINE_CONFIG.replace("project_date = 2019-06-30", "project_date = 10:30:00"),
    ).unwrap();
    std::assert_eq!(config.verify(2024).errors.len(), 1);
}

#[test]
fn test_catalog_source_locations_are_checked() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog");
    fs::create_dir(&catalog).unwrap();
    let descriptions = dir.path().join("descriptions.csv");

    let content = INLINE_CONFIG.split("[tables]").next().unwrap().to_string() + &std::format!(
        "[tables]\nsource = \"catalog\"\ndirectory = {:?}\nvariable_descriptions = {:?}\n",
        catalog.to_str().unwrap(),
        descriptions.to_str().unwrap()
    );
    let config = GeneratorConfig::parse(&content).unwrap();
    std::assert_eq!(config.verify(2024).errors.len(), 1);

    fs::write(&descriptions, "001,Total\n").unwrap();
    std::assert!(config.verify(2024).is_ok());
}

#[test]
fn test_unknown_source_is_rejected() {
    let content = "[tables]\nsource = \"database\"\n";
    std::assert!(GeneratorConfig::parse(content).is_err());
}
