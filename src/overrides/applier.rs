//! Applies override settings to a metadata document

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::metadata::constants::{attrs, tags};
use crate::metadata::document::{Document, Element};
use crate::metadata::errors::{MetaError, MetaResult};
use crate::overrides::palette::PaletteCatalog;
use crate::overrides::settings::{aggregation_for_map_type, OverrideSettings};
use crate::sync::patch::{patch_attributes, PatchOutcome};

/// Counts collected while applying overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideReport {
    pub files: usize,
    pub display_names: usize,
    pub tables_updated: usize,
    pub variables_updated: usize,
    pub unchanged: usize,
    pub skipped_missing_attribute: usize,
    /// Variable ids of the sheet with no matching variable
    pub unmatched_variables: usize,
    pub unknown_palettes: usize,
}

impl OverrideReport {
    fn absorb(&mut self, other: &OverrideReport) {
        self.files += other.files;
        self.display_names += other.display_names;
        self.tables_updated += other.tables_updated;
        self.variables_updated += other.variables_updated;
        self.unchanged += other.unchanged;
        self.skipped_missing_attribute += other.skipped_missing_attribute;
        self.unmatched_variables += other.unmatched_variables;
        self.unknown_palettes += other.unknown_palettes;
    }

    fn count(&mut self, outcome: PatchOutcome, element: &Element) {
        match outcome {
            PatchOutcome::Updated(_) if element.name == tags::TABLE => self.tables_updated += 1,
            PatchOutcome::Updated(_) => self.variables_updated += 1,
            PatchOutcome::Unchanged => self.unchanged += 1,
            PatchOutcome::MissingAttribute(missing) => {
                debug!(
                    "Skipping <{}> '{}': no '{}' attribute",
                    element.name,
                    element.attr(attrs::NAME).unwrap_or_default(),
                    missing
                );
                self.skipped_missing_attribute += 1;
            }
        }
    }
}

impl fmt::Display for OverrideReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} display names, {} tables and {} variables updated, {} unchanged, \
             {} skipped (missing attribute), {} unmatched variables, {} unknown palettes",
            self.files, self.display_names, self.tables_updated, self.variables_updated, self.unchanged,
            self.skipped_missing_attribute, self.unmatched_variables, self.unknown_palettes
        )
    }
}

/// The overrides of one survey, keyed for lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyOverrides {
    pub display_name: Option<String>,
    /// Old table title → new title
    pub table_titles: HashMap<String, String>,
    /// Old data category → new category
    pub categories: HashMap<String, String>,
    /// Variable id → attribute values
    pub variables: HashMap<String, Vec<(&'static str, String)>>,
    pub unknown_palettes: usize,
}

impl SurveyOverrides {
    /// Collect the rows of `survey_id`; empty cells set nothing
    pub fn collect(settings: &OverrideSettings, survey_id: &str, palettes: &PaletteCatalog) -> Self {
        let mut overrides = SurveyOverrides::default();

        for row in settings.for_survey(survey_id) {
            if overrides.display_name.is_none() && !row.project_name.is_empty() {
                overrides.display_name = Some(row.project_name.clone());
            }
            if !row.table_old_name.is_empty() && !row.table_new_name.is_empty() {
                overrides.table_titles.insert(row.table_old_name.clone(), row.table_new_name.clone());
            }
            if !row.old_category_name.is_empty() && !row.new_category_name.is_empty() {
                overrides.categories.insert(row.old_category_name.clone(), row.new_category_name.clone());
            }
            if row.variable_id.is_empty() {
                continue;
            }

            let mut values: Vec<(&'static str, String)> = Vec::new();
            if !row.variable_new_name.is_empty() {
                values.push((attrs::LABEL, row.variable_new_name.clone()));
            }
            if !row.color_palette.is_empty() {
                match palettes.resolve(&row.color_palette) {
                    Some(id) => values.push((attrs::PALETTE_NAME, id.to_string())),
                    None => {
                        warn!("Unknown color palette '{}' for {}", row.color_palette, row.variable_id);
                        overrides.unknown_palettes += 1;
                    }
                }
            }
            if !row.cutpoints.is_empty() {
                values.push((attrs::FILTER_RULE, row.cutpoints.clone()));
            }
            if !row.type_of_map.is_empty() {
                match aggregation_for_map_type(&row.type_of_map) {
                    Some(aggregation) => values.push((attrs::AGGREGATION_STR, aggregation.to_string())),
                    None => warn!("Unknown map type '{}' for {}", row.type_of_map, row.variable_id),
                }
            }
            if !values.is_empty() {
                overrides.variables.entry(row.variable_id.clone()).or_default().extend(values);
            }
        }
        overrides
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.table_titles.is_empty()
            && self.categories.is_empty()
            && self.variables.is_empty()
    }

    /// Variable overrides for a variable name
    ///
    /// Sheets list ids either as the full name or without the `<survey>_` prefix.
    fn variable(&self, name: &str, survey_id: &str) -> Option<(&str, &[(&'static str, String)])> {
        if let Some((key, values)) = self.variables.get_key_value(name) {
            return Some((key.as_str(), values.as_slice()));
        }
        let short = name.strip_prefix(survey_id)?.strip_prefix('_')?;
        self.variables
            .get_key_value(short)
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

/// Apply the overrides of the document's survey in place
pub fn apply_overrides(
    document: &mut Document,
    settings: &OverrideSettings,
    palettes: &PaletteCatalog,
) -> MetaResult<OverrideReport> {
    if document.root.name != tags::SURVEY {
        return Err(MetaError::ElementNotFound("/survey".to_string()));
    }
    let survey_id = document.root.require_attr(attrs::NAME)?.to_string();
    let overrides = SurveyOverrides::collect(settings, &survey_id, palettes);

    let mut report = OverrideReport {
        unknown_palettes: overrides.unknown_palettes,
        ..Default::default()
    };
    if overrides.is_empty() {
        warn!("No overrides for survey {}", survey_id);
        return Ok(report);
    }

    if let Some(display_name) = &overrides.display_name {
        document.root.set_attr(attrs::DISPLAY_NAME, display_name);
        report.display_names += 1;
    }

    let mut matched: Vec<&str> = Vec::new();
    document.root.walk_mut(&mut |element: &mut Element| match element.name.as_str() {
        tags::TABLE => {
            let mut values: Vec<(&str, String)> = Vec::new();
            if let Some(title) = element.attr(attrs::TITLE).and_then(|t| overrides.table_titles.get(t)) {
                values.push((attrs::TITLE, title.clone()));
                values.push((attrs::TITLE_WRAPPED, title.clone()));
            }
            if let Some(category) = element
                .attr(attrs::DATA_CATEGORIES)
                .and_then(|c| overrides.categories.get(c))
            {
                values.push((attrs::DATA_CATEGORIES, category.clone()));
            }
            if !values.is_empty() {
                let outcome = patch_attributes(element, values.iter().map(|(k, v)| (*k, v.as_str())));
                report.count(outcome, element);
            }
        }
        tags::VARIABLE => {
            let found = element
                .attr(attrs::NAME)
                .and_then(|name| overrides.variable(name, &survey_id));
            if let Some((key, values)) = found {
                matched.push(key);
                let outcome = patch_attributes(element, values.iter().map(|(k, v)| (*k, v.as_str())));
                report.count(outcome, element);
            }
        }
        _ => {}
    });

    report.unmatched_variables = overrides
        .variables
        .keys()
        .filter(|id| !matched.contains(&id.as_str()))
        .count();
    if report.unmatched_variables > 0 {
        warn!("{} variable ids of {} matched no variable", report.unmatched_variables, survey_id);
    }
    Ok(report)
}

/// Apply overrides to one file and write it back
pub fn override_file<P: AsRef<Path>>(
    path: P,
    settings: &OverrideSettings,
    palettes: &PaletteCatalog,
) -> MetaResult<OverrideReport> {
    let path = path.as_ref();
    let mut document = Document::load(path)?;
    let mut report = apply_overrides(&mut document, settings, palettes)?;
    report.files = 1;
    document.save(path)?;
    info!("Applied overrides to {}: {}", path.display(), report);
    Ok(report)
}

/// Apply overrides to a batch of files, calling `on_file` after each one
pub fn override_files<F>(
    files: &[PathBuf],
    settings: &OverrideSettings,
    palettes: &PaletteCatalog,
    mut on_file: F,
) -> MetaResult<OverrideReport>
where
    F: FnMut(&Path),
{
    let mut total = OverrideReport::default();
    for path in files {
        total.absorb(&override_file(path, settings, palettes)?);
        on_file(path);
    }
    Ok(total)
}
