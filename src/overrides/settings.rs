//! Override settings sheet
//!
//! One CSV row per table or variable change, grouped by `survey_id`. Only the
//! columns below are read; any other column of the sheet is ignored.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::metadata::errors::MetaResult;
use crate::utils::csv_utils::CsvTable;

/// Columns of the settings sheet
pub mod columns {
    pub const SURVEY_ID: &str = "survey_id";
    pub const PROJECT_NAME: &str = "project_name";
    pub const TABLE_OLD_NAME: &str = "table_old_name";
    pub const TABLE_NEW_NAME: &str = "table_new_name";
    pub const OLD_CATEGORY_NAME: &str = "old_category_name";
    pub const NEW_CATEGORY_NAME: &str = "new_category_name";
    pub const VARIABLE_ID: &str = "variable_id";
    pub const VARIABLE_NEW_NAME: &str = "variable_new_name";
    pub const COLOR_PALETTE: &str = "color_palette";
    pub const CUTPOINTS: &str = "cutpoints";
    pub const TYPE_OF_MAP: &str = "type_of_map";
}

/// One row of the settings sheet; empty cells are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsRow {
    pub survey_id: String,
    pub project_name: String,
    pub table_old_name: String,
    pub table_new_name: String,
    pub old_category_name: String,
    pub new_category_name: String,
    pub variable_id: String,
    pub variable_new_name: String,
    pub color_palette: String,
    pub cutpoints: String,
    pub type_of_map: String,
}

/// Every row of a settings sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSettings {
    pub rows: Vec<SettingsRow>,
}

impl OverrideSettings {
    /// Read a settings CSV; only `survey_id` is a required column
    pub fn load<P: AsRef<Path>>(path: P) -> MetaResult<Self> {
        let csv = CsvTable::read(path.as_ref())?;
        let survey_id = csv.require_column(columns::SURVEY_ID)?;

        let lookup: HashMap<&str, Option<usize>> = [
            columns::PROJECT_NAME,
            columns::TABLE_OLD_NAME,
            columns::TABLE_NEW_NAME,
            columns::OLD_CATEGORY_NAME,
            columns::NEW_CATEGORY_NAME,
            columns::VARIABLE_ID,
            columns::VARIABLE_NEW_NAME,
            columns::COLOR_PALETTE,
            columns::CUTPOINTS,
            columns::TYPE_OF_MAP,
        ]
        .into_iter()
        .map(|name| (name, csv.column(name)))
        .collect();

        let rows = csv
            .rows
            .iter()
            .map(|row| {
                let cell = |name: &str| match lookup.get(name).copied().flatten() {
                    Some(index) => csv.field(row, index).to_string(),
                    None => String::new(),
                };
                SettingsRow {
                    survey_id: csv.field(row, survey_id).to_string(),
                    project_name: cell(columns::PROJECT_NAME),
                    table_old_name: cell(columns::TABLE_OLD_NAME),
                    table_new_name: cell(columns::TABLE_NEW_NAME),
                    old_category_name: cell(columns::OLD_CATEGORY_NAME),
                    new_category_name: cell(columns::NEW_CATEGORY_NAME),
                    variable_id: cell(columns::VARIABLE_ID),
                    variable_new_name: cell(columns::VARIABLE_NEW_NAME),
                    color_palette: cell(columns::COLOR_PALETTE),
                    cutpoints: cell(columns::CUTPOINTS),
                    type_of_map: cell(columns::TYPE_OF_MAP),
                }
            })
            .collect::<Vec<_>>();

        debug!("Loaded {} override rows", rows.len());
        Ok(OverrideSettings { rows })
    }

    /// Rows of one survey
    pub fn for_survey<'a>(&'a self, survey_id: &'a str) -> impl Iterator<Item = &'a SettingsRow> + 'a {
        self.rows.iter().filter(move |row| row.survey_id == survey_id)
    }

    /// Distinct survey ids, in sheet order
    pub fn survey_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !row.survey_id.is_empty() && !ids.contains(&row.survey_id.as_str()) {
                ids.push(&row.survey_id);
            }
        }
        ids
    }
}

/// `AggregationStr` of a map type (`bubbles` or `shaded`, any case)
pub fn aggregation_for_map_type(map_type: &str) -> Option<&'static str> {
    match map_type.trim().to_lowercase().as_str() {
        "bubbles" => Some("Add"),
        "shaded" => Some("Rate|||100000"),
        _ => None,
    }
}
