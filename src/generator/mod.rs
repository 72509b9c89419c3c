//! Metadata document generator
//!
//! Builds brand-new metadata documents from a configuration: geography
//! levels plus tables declared inline or listed by a database catalog.

pub mod builder;
pub mod catalog;
pub mod geography;
pub mod metadata_generator;
pub mod model;
pub mod tables;
#[cfg(test)]
mod tests;

pub use builder::ElementBuilder;
pub use catalog::{CatalogColumn, CatalogSource, CatalogTable, CsvCatalog, VariableDescriptions};
pub use metadata_generator::{write_document, GenerationStats, MetadataGenerator};
pub use model::{ColumnType, GeoLevel, TableSpec, VariableSpec};
