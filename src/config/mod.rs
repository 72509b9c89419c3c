//! Configuration files

pub mod generator_config;
#[cfg(test)]
mod tests;

pub use generator_config::{ConfigReport, DatabaseConfig, GeneratorConfig, TableSource, DEFAULT_SE_DATASET_NAME};
