//! Table and variable elements of the original (`ORG`) dataset

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::generator::builder::ElementBuilder;
use crate::generator::catalog::{CatalogColumn, CatalogTable, VariableDescriptions};
use crate::generator::model::{GeoLevel, TableSpec, VariableSpec};
use crate::metadata::document::Element;
use crate::metadata::guid::GuidAllocator;
use crate::utils::string_utils::after_nth;

/// Variable attributes written before `name`
pub(crate) const VARIABLE_PREAMBLE: [(&str, &str); 8] = [
    ("UVID", ""),
    ("BracketSourceVarGUID", ""),
    ("BracketFromVal", "0"),
    ("BracketToVal", "0"),
    ("BracketType", "None"),
    ("FirstInBracketSet", "false"),
    ("notes", ""),
    ("PrivateNotes", ""),
];

/// Variable attributes written between `formatting` and `aggMethod`
pub(crate) const VARIABLE_TRAILER: [(&str, &str); 5] = [
    ("customFormatStr", ""),
    ("FormulaFunctionBodyCSharp", ""),
    ("suppType", "0"),
    ("SuppField", ""),
    ("suppFlags", ""),
];

/// Catalog tables that never describe data
const EXCLUDED_TABLES: [&str; 2] = ["table_names", "sysdiagrams"];

/// Catalog columns that never become variables
const EXCLUDED_COLUMNS: [&str; 10] = [
    "NAME", "SUMLEV", "v1", "Geo_level", "QName", "TYPE", "Geo", "FIPS", "Geo_orig", "V1",
];

/// Empty `OutputFormat` block every table starts with
pub(crate) fn output_format() -> ElementBuilder {
    ElementBuilder::new("OutputFormat")
        .child(ElementBuilder::new("Columns"))
        .attr("TableTitle", "")
        .attr("TableUniverse", "")
}

/// A data variable of an original table
fn data_variable(
    guids: &mut GuidAllocator,
    name: &str,
    label: &str,
    indent: &str,
    data_type: &str,
    formatting: &str,
) -> Element {
    ElementBuilder::new("variable")
        .attr("GUID", &guids.issue())
        .attrs(VARIABLE_PREAMBLE)
        .attr("name", name)
        .attr("label", label)
        .attr("qLabel", "")
        .attr("indent", indent)
        .attr("dataType", data_type)
        .attr("dataTypeLength", "0")
        .attr("formatting", formatting)
        .attrs(VARIABLE_TRAILER)
        .attr("aggMethod", "1")
        .attr("DocLinksAsString", "")
        .attr("AggregationStr", "Add")
        .build()
}

/// An original table holding the given variables
fn data_table(guids: &mut GuidAllocator, name: &str, title: &str, suffix: &str, variables: Vec<Element>) -> Element {
    ElementBuilder::new("table")
        .child(output_format())
        .children(variables)
        .attr("GUID", &guids.issue())
        .attrs([
            ("VariablesAreExclusive", "false"),
            ("DollarYear", "0"),
            ("PercentBaseMin", "1"),
            ("name", name),
            ("displayName", name),
            ("title", title),
            ("titleWrapped", title),
            ("universe", "none"),
            ("Visible", "true"),
            ("TreeNodeCollapsed", "true"),
            ("CategoryPriorityOrder", "0"),
            ("ShowOnFirstPageOfCategoryListing", "false"),
            ("DbTableSuffix", suffix),
            ("uniqueTableId", name),
        ])
        .build()
}

/// Tables and variables produced for the `ORG` dataset
#[derive(Debug, Default)]
pub struct BuiltTables {
    pub tables: Vec<Element>,
    pub variables: usize,
    pub skipped_tables: usize,
    pub skipped_variables: usize,
}

/// Tables declared inline in the configuration
pub fn inline_tables(specs: &[TableSpec], guids: &mut GuidAllocator) -> BuiltTables {
    let mut built = BuiltTables::default();

    for spec in specs {
        let variables: Vec<Element> = spec
            .variables
            .iter()
            .map(|v: &VariableSpec| {
                data_variable(guids, &v.name, &v.label, &v.indent.to_string(), &v.data_type, &v.formatting)
            })
            .collect();
        built.variables += variables.len();
        built.tables.push(data_table(guids, &spec.name, &spec.title, spec.db_suffix(), variables));
    }
    built
}

/// Catalog tables belonging to the project year, sorted by name
///
/// `table_names`, `sysdiagrams` and names starting with `_` are left out.
pub fn project_tables<'a>(tables: &'a [CatalogTable], project_year: &str) -> Vec<&'a CatalogTable> {
    let mut selected: Vec<&CatalogTable> = tables
        .iter()
        .filter(|t| t.name.contains(project_year))
        .filter(|t| !EXCLUDED_TABLES.contains(&t.name.as_str()) && !t.name.starts_with('_'))
        .collect();
    selected.sort_by(|a, b| a.name.cmp(&b.name));
    selected
}

/// Metadata name of a database table: first and last `_` segments
/// (`PC2019_SL040_T001` → `PC2019_T001`)
pub fn metadata_table_name(table_name: &str) -> Option<String> {
    let (prefix, _) = table_name.split_once('_')?;
    let (_, last) = table_name.rsplit_once('_')?;
    Some(format!("{}_{}", prefix, last))
}

fn keeps_column(column: &CatalogColumn) -> bool {
    !EXCLUDED_COLUMNS.contains(&column.name.as_str())
        && !column.name.contains("_NAME")
        && !column.name.contains("FIPS")
}

/// Variables of one catalog table, described by the description lookup
fn catalog_variables(
    table: &CatalogTable,
    descriptions: &VariableDescriptions,
    guids: &mut GuidAllocator,
    built: &mut BuiltTables,
) -> Vec<Element> {
    let mut variables = Vec::new();

    for column in table.columns.iter().filter(|c| keeps_column(c)) {
        let key = match after_nth(&column.name, '_', 2) {
            Some(key) => key,
            None => {
                warn!("Column '{}' of {} has no description id, skipping", column.name, table.name);
                built.skipped_variables += 1;
                continue;
            }
        };
        let description = match descriptions.get(key) {
            Some(description) => description,
            None => {
                warn!("Undefined variable found: {} ({})", column.name, key);
                built.skipped_variables += 1;
                continue;
            }
        };

        let (data_type, formatting) = column.column_type.attributes();
        let indent = description.indent.as_deref().unwrap_or("0");
        variables.push(data_variable(guids, &column.name, &description.label, indent, data_type, formatting));
    }
    variables
}

/// Original tables from a catalog
///
/// Tables sharing their first and last name segments are emitted once.
/// Tables whose suffix has no title are skipped with a warning.
pub fn catalog_tables(
    tables: &[CatalogTable],
    project_year: &str,
    titles: &HashMap<String, String>,
    descriptions: &VariableDescriptions,
    guids: &mut GuidAllocator,
) -> BuiltTables {
    let mut built = BuiltTables::default();
    let mut seen: HashSet<String> = HashSet::new();

    for table in project_tables(tables, project_year) {
        let meta_name = match metadata_table_name(&table.name) {
            Some(name) => name,
            None => {
                warn!("Table '{}' does not follow the PROJECT_..._SUFFIX naming, skipping", table.name);
                built.skipped_tables += 1;
                continue;
            }
        };
        if !seen.insert(meta_name.clone()) {
            continue;
        }

        let suffix = table.name.rsplit('_').next().unwrap_or(&table.name);
        let title = match titles.get(suffix) {
            Some(title) => title,
            None => {
                warn!("Table suffix '{}' of {} is not in table_names, skipping", suffix, table.name);
                built.skipped_tables += 1;
                continue;
            }
        };

        let variables = catalog_variables(table, descriptions, guids, &mut built);
        built.variables += variables.len();
        built.tables.push(data_table(guids, &meta_name, title, suffix, variables));
    }
    built
}

/// Suffix (with its `_`) of the first data table of a level, `_001` when the level has none
pub fn geo_id_suffix(tables: &[CatalogTable], project_id: &str, level: &GeoLevel) -> String {
    let mut candidates: Vec<&str> = tables
        .iter()
        .map(|t| t.name.as_str())
        .filter(|name| !EXCLUDED_TABLES.contains(name) && !name.starts_with('_'))
        .filter(|name| name.contains(&level.sumlev) && name.starts_with(project_id))
        .collect();
    candidates.sort();

    candidates
        .first()
        .and_then(|name| name.rfind('_').map(|index| name[index..].to_string()))
        .unwrap_or_else(|| "_001".to_string())
}

