//! Metadata document generation
//!
//! Assembles a complete `survey` document from a [`GeneratorConfig`]:
//! geography types, one geography summary dataset, an empty `SE` dataset
//! ready for hand-made tables and the `ORG` dataset holding the original
//! tables (declared inline or read from a catalog).

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::generator_config::{GeneratorConfig, TableSource};
use crate::generator::builder::{empty_cdata, ElementBuilder};
use crate::generator::catalog::{
    load_file_names, title_dictionary, CatalogSource, CatalogTable, CsvCatalog, VariableDescriptions,
};
use crate::generator::geography::{datasets, geo_id_table, geo_types, DatasetTarget};
use crate::generator::model::GeoLevel;
use crate::generator::tables::{catalog_tables, geo_id_suffix, inline_tables, BuiltTables};
use crate::metadata::constants::datasets as abbreviations;
use crate::metadata::document::{Document, Element};
use crate::metadata::errors::{MetaError, MetaResult};
use crate::metadata::guid::GuidAllocator;

/// Placeholder left in the `SE` dataset for tables added later
pub const SE_TABLES_PLACEHOLDER: &str = "Insert SE tables here !!!";

/// Counts collected while generating one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub geo_types: usize,
    pub tables: usize,
    pub variables: usize,
    pub skipped_tables: usize,
    pub skipped_variables: usize,
    pub guids: usize,
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} geo types, {} tables, {} variables ({} tables and {} variables skipped), {} GUIDs",
            self.geo_types, self.tables, self.variables, self.skipped_tables, self.skipped_variables, self.guids
        )
    }
}

/// Builds metadata documents for one configuration
pub struct MetadataGenerator<'a> {
    config: &'a GeneratorConfig,
    guids: GuidAllocator,
}

impl<'a> MetadataGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        MetadataGenerator { config, guids: GuidAllocator::new() }
    }

    /// Generate the document from the configured table source
    pub fn generate(&mut self) -> MetaResult<(Document, GenerationStats)> {
        let config = self.config;
        match &config.tables {
            TableSource::Inline { tables } => {
                let built = inline_tables(tables, &mut self.guids);
                Ok(self.assemble(built, &[]))
            }
            TableSource::Catalog { directory, variable_descriptions, file_names_list } => {
                let descriptions_path = variable_descriptions.as_ref().ok_or_else(|| {
                    MetaError::ConfigError("Catalog tables need a variable description location".to_string())
                })?;
                let file_names_path = file_names_list.as_ref().ok_or_else(|| {
                    MetaError::ConfigError("Catalog tables need a file names list".to_string())
                })?;

                let descriptions = VariableDescriptions::load(descriptions_path)?;
                let file_titles = load_file_names(file_names_path)?;
                let catalog = CsvCatalog::new(directory);
                self.generate_from_catalog(&catalog, &descriptions, &file_titles)
            }
        }
    }

    /// Generate the document with original tables read from a catalog
    pub fn generate_from_catalog(
        &mut self,
        catalog: &dyn CatalogSource,
        descriptions: &VariableDescriptions,
        file_titles: &HashMap<String, String>,
    ) -> MetaResult<(Document, GenerationStats)> {
        let table_names = catalog.table_names()?;
        if table_names.is_empty() {
            return Err(MetaError::CatalogError("Table names do not exist in the catalog".to_string()));
        }
        let titles = title_dictionary(&table_names, file_titles);
        let tables = catalog.tables()?;

        let year = self.config.project_year.to_string();
        let built = catalog_tables(&tables, &year, &titles, descriptions, &mut self.guids);
        Ok(self.assemble(built, &tables))
    }

    fn survey_dataset(&mut self, abbreviation: &str, name: &str, visible: bool, tables: ElementBuilder,
                      catalog: &[CatalogTable]) -> ElementBuilder {
        let dataset_list = self.datasets(catalog);

        ElementBuilder::new("SurveyDataset")
            .child(ElementBuilder::new("DataBibliographicInfo"))
            .child(ElementBuilder::new("notes"))
            .child(empty_cdata("PrivateNotes"))
            .child(empty_cdata("Description"))
            .child(ElementBuilder::new("datasets").children(dataset_list))
            .child(ElementBuilder::new("iterations"))
            .child(tables)
            .attr("GUID", &self.guids.issue())
            .attrs(TREE_STATE)
            .attr("Description", "")
            .attr("Visible", if visible { "true" } else { "false" })
            .attr("abbreviation", abbreviation)
            .attr("name", name)
            .attr("DisplayName", name)
    }

    fn datasets(&mut self, catalog: &[CatalogTable]) -> Vec<Element> {
        let config = self.config;
        let connection_string = config.database.connection_string();
        let target = DatasetTarget {
            project_id: &config.project_id,
            connection_string: &connection_string,
            db_name: &config.database.name,
        };
        datasets(
            &config.geo_levels,
            &target,
            |level: &GeoLevel| geo_id_suffix(catalog, &config.project_id, level),
            &mut self.guids,
        )
    }

    fn assemble(&mut self, built: BuiltTables, catalog: &[CatalogTable]) -> (Document, GenerationStats) {
        let config = self.config;
        let levels = &config.geo_levels;

        let geo_type_list = geo_types(levels, &mut self.guids);
        let geo_datasets = self.datasets(catalog);
        let geo_table = geo_id_table(levels, &mut self.guids);

        let geo_dataset = ElementBuilder::new("GeoSurveyDataset")
            .child(ElementBuilder::new("DataBibliographicInfo"))
            .child(ElementBuilder::new("notes"))
            .child(empty_cdata("PrivateNotes"))
            .child(empty_cdata("Description"))
            .child(ElementBuilder::new("datasets").children(geo_datasets))
            .child(ElementBuilder::new("iterations"))
            .child(ElementBuilder::new("tables").child_element(geo_table))
            .attr("GUID", &self.guids.issue())
            .attrs(TREE_STATE)
            .attr("Description", "Geographic Summary Count")
            .attr("Visible", "false")
            .attr("abbreviation", abbreviations::GEOGRAPHY)
            .attr("name", "Geography Summary File")
            .attr("DisplayName", "Geography Summary File");

        let se_dataset = self.survey_dataset(
            abbreviations::DERIVED,
            config.se_dataset_name(),
            false,
            ElementBuilder::new("tables").comment(SE_TABLES_PLACEHOLDER),
            catalog,
        );

        let stats_tables = built.tables.len();
        let org_dataset = self.survey_dataset(
            abbreviations::ORIGINAL,
            "Original Tables",
            true,
            ElementBuilder::new("tables").children(built.tables),
            catalog,
        );

        let survey = ElementBuilder::new("survey")
            .child(empty_cdata("Description"))
            .child(empty_cdata("notes"))
            .child(empty_cdata("PrivateNotes"))
            .child(ElementBuilder::new("documentation").child(ElementBuilder::new("documentlinks")).attr("Label", "Documentation"))
            .child(ElementBuilder::new("geoTypes").children(geo_type_list))
            .child(geo_dataset)
            .child(ElementBuilder::new("SurveyDatasets").child(se_dataset).child(org_dataset))
            .child(ElementBuilder::new("Categories").child(ElementBuilder::new("string").text(&config.project_name)))
            .attr("GUID", &self.guids.issue())
            .attr("Visible", "true")
            .attr("GeoTypeTreeNodeExpanded", "true")
            .attr("GeoCorrespondenceTreeNodeExpanded", "false")
            .attr("name", &config.project_id)
            .attr("DisplayName", &config.project_name)
            .attr("year", &config.project_year.to_string())
            .attr("Categories", "")
            .build();

        let stats = GenerationStats {
            geo_types: levels.len(),
            tables: stats_tables,
            variables: built.variables,
            skipped_tables: built.skipped_tables,
            skipped_variables: built.skipped_variables,
            guids: self.guids.issued(),
        };
        info!("Generated metadata for {}: {}", config.project_id, stats);
        (Document::new(survey), stats)
    }
}

/// Tree expansion flags shared by every survey dataset
const TREE_STATE: [(&str, &str); 4] = [
    ("SurveyDatasetTreeNodeExpanded", "true"),
    ("TablesTreeNodeExpanded", "true"),
    ("IterationsTreeNodeExpanded", "false"),
    ("DatasetsTreeNodeExpanded", "true"),
];

/// Write a generated document, creating the output directory if needed
pub fn write_document(document: &Document, path: &Path) -> MetaResult<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    document.save(path)?;
    info!("Writing to: {}", path.display());
    Ok(path.to_path_buf())
}
