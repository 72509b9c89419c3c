//! Table and column catalogs
//!
//! The generator reads the tables of a project from a [`CatalogSource`].
//! [`CsvCatalog`] reads the catalog exported from the project database:
//!
//! * `columns.csv` with header `table,column,data_type`, one row per column,
//!   in column order;
//! * `table_names.csv` with header `file_name,table_suffix`, mapping the
//!   imported data files to table suffixes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::generator::model::ColumnType;
use crate::metadata::errors::{MetaError, MetaResult};
use crate::utils::csv_utils::{read_csv_rows, CsvTable};

/// Extensions identifying data file names in `table_names`
const DATA_FILE_EXTENSIONS: [&str; 3] = [".txt", ".csv", ".tsv"];

/// One database column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    pub name: String,
    pub column_type: ColumnType,
}

/// One database table with its columns in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTable {
    pub name: String,
    pub columns: Vec<CatalogColumn>,
}

/// A source of table and column listings
pub trait CatalogSource {
    /// Every user table with its columns
    fn tables(&self) -> MetaResult<Vec<CatalogTable>>;

    /// `(file_name, table_suffix)` rows of the `table_names` table
    fn table_names(&self) -> MetaResult<Vec<(String, String)>>;
}

/// Catalog exported as CSV files into one directory
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    directory: PathBuf,
}

impl CsvCatalog {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        CsvCatalog { directory: directory.as_ref().to_path_buf() }
    }

    fn read(&self, file_name: &str) -> MetaResult<CsvTable> {
        let path = self.directory.join(file_name);
        if !path.is_file() {
            return Err(MetaError::CatalogError(format!("{} does not exist", path.display())));
        }
        CsvTable::read(&path)
    }
}

impl CatalogSource for CsvCatalog {
    fn tables(&self) -> MetaResult<Vec<CatalogTable>> {
        let csv = self.read("columns.csv")?;
        let table_column = csv.require_column("table")?;
        let name_column = csv.require_column("column")?;
        let type_column = csv.require_column("data_type")?;

        let mut tables: Vec<CatalogTable> = Vec::new();
        for row in &csv.rows {
            let table = csv.field(row, table_column);
            let column = CatalogColumn {
                name: csv.field(row, name_column).to_string(),
                column_type: ColumnType::from_sql(csv.field(row, type_column)),
            };

            match tables.iter_mut().find(|t| t.name == table) {
                Some(existing) => existing.columns.push(column),
                None => tables.push(CatalogTable { name: table.to_string(), columns: vec![column] }),
            }
        }

        debug!("Catalog lists {} tables", tables.len());
        Ok(tables)
    }

    fn table_names(&self) -> MetaResult<Vec<(String, String)>> {
        let csv = self.read("table_names.csv")?;
        let file_column = csv.require_column("file_name")?;
        let suffix_column = csv.require_column("table_suffix")?;

        Ok(csv
            .rows
            .iter()
            .map(|row| (csv.field(row, file_column).to_string(), csv.field(row, suffix_column).to_string()))
            .collect())
    }
}

/// Description of one variable, keyed by its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescription {
    pub label: String,
    pub indent: Option<String>,
}

/// Variable id → description lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableDescriptions {
    entries: HashMap<String, VariableDescription>,
    columns: Option<usize>,
}

impl VariableDescriptions {
    /// Load a description file, or every file of a directory
    pub fn load<P: AsRef<Path>>(location: P) -> MetaResult<Self> {
        let location = location.as_ref();
        let mut descriptions = VariableDescriptions::default();

        if location.is_dir() {
            let mut files: Vec<PathBuf> = fs::read_dir(location)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file())
                .collect();
            files.sort();
            for file in files {
                descriptions.read_file(&file)?;
            }
        } else {
            descriptions.read_file(location)?;
        }

        info!("Loaded {} variable descriptions from {}", descriptions.len(), location.display());
        Ok(descriptions)
    }

    /// Add the rows of one `id,description[,indent]` file
    ///
    /// Every row of every file must have the same number of columns, 2 or 3.
    pub fn read_file(&mut self, path: &Path) -> MetaResult<()> {
        for row in read_csv_rows(path)? {
            self.insert_row(row)?;
        }
        Ok(())
    }

    fn insert_row(&mut self, row: Vec<String>) -> MetaResult<()> {
        let count = row.len();
        if count != 2 && count != 3 {
            return Err(MetaError::CatalogError(format!(
                "Number of columns in variable description file is not ok: {}", count
            )));
        }
        match self.columns {
            Some(expected) if expected != count => {
                return Err(MetaError::CatalogError(format!(
                    "Number of columns changes in variable descriptions ({} then {})", expected, count
                )));
            }
            _ => self.columns = Some(count),
        }

        let mut fields = row.into_iter();
        let id = fields.next().unwrap_or_default();
        let label = fields.next().unwrap_or_default();
        let indent = fields.next();
        self.entries.insert(id, VariableDescription { label, indent });
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&VariableDescription> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read the `file name,title` list of imported data files
pub fn load_file_names<P: AsRef<Path>>(path: P) -> MetaResult<HashMap<String, String>> {
    let mut titles = HashMap::new();
    for row in read_csv_rows(path)? {
        match row.as_slice() {
            [file_name, title, ..] => {
                titles.insert(file_name.clone(), title.clone());
            }
            _ => warn!("Skipping incomplete line in file names list: {:?}", row),
        }
    }
    Ok(titles)
}

/// Table suffix → title, from the catalog's `table_names` rows and the file names list
pub fn title_dictionary(
    table_names: &[(String, String)],
    file_titles: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut dictionary = HashMap::new();

    for (file_name, suffix) in table_names {
        if !DATA_FILE_EXTENSIONS.iter().any(|ext| file_name.contains(ext)) {
            continue;
        }
        match file_titles.get(file_name) {
            Some(title) => {
                dictionary.insert(suffix.clone(), title.clone());
            }
            None => warn!("Data file '{}' is missing from the file names list", file_name),
        }
    }
    dictionary
}
