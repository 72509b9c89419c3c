//! Declarative descriptors consumed by the generator

use serde::Deserialize;

/// One geography (summary) level of a project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeoLevel {
    /// Summary level code, e.g. `SL040`
    pub sumlev: String,
    /// Human readable name, e.g. `State`
    pub label: String,
    pub fips_length: u32,
    pub partial_fips_length: u32,
    pub indent: u32,
    /// Plural form of the label when it is not a known one
    #[serde(default)]
    pub plural: Option<String>,
}

impl GeoLevel {
    pub fn new(sumlev: &str, label: &str, fips_length: u32, partial_fips_length: u32, indent: u32) -> Self {
        GeoLevel {
            sumlev: sumlev.to_string(),
            label: label.to_string(),
            fips_length,
            partial_fips_length,
            indent,
            plural: None,
        }
    }

    /// Summary level number without the `SL` prefix
    pub fn sumlev_number(&self) -> &str {
        self.sumlev.strip_prefix("SL").unwrap_or(&self.sumlev)
    }

    /// Name of the FIPS column of this level, e.g. `SL040_FIPS`
    pub fn fips_column(&self) -> String {
        format!("{}_FIPS", self.sumlev)
    }
}

/// A variable declared directly in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub indent: u32,
    #[serde(default = "default_inline_data_type")]
    pub data_type: String,
    #[serde(default = "default_inline_formatting")]
    pub formatting: String,
}

fn default_inline_data_type() -> String {
    "5".to_string()
}

fn default_inline_formatting() -> String {
    "9".to_string()
}

/// A table declared directly in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub title: String,
    /// Database table suffix, defaults to the table name
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
}

impl TableSpec {
    pub fn db_suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or(&self.name)
    }
}

/// Database column type as reported by a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Unknown,
}

impl ColumnType {
    /// Classify a SQL type name (`int`, `float`, `nvarchar`, ...)
    pub fn from_sql(type_name: &str) -> Self {
        let lowered = type_name.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "int" | "bigint" | "smallint" | "tinyint" | "integer" => ColumnType::Integer,
            "float" | "real" | "double" | "decimal" | "numeric" => ColumnType::Float,
            _ if lowered.contains("char") || lowered == "text" => ColumnType::Text,
            _ => ColumnType::Unknown,
        }
    }

    /// `(dataType, formatting)` attribute values of a variable
    pub fn attributes(&self) -> (&'static str, &'static str) {
        match self {
            ColumnType::Integer => ("4", "9"),
            ColumnType::Float => ("7", "9"),
            ColumnType::Text => ("2", "0"),
            ColumnType::Unknown => ("0", "0"),
        }
    }
}
