//! Copies the tables of one survey dataset into another document

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::merge::formula::remap_formula;
use crate::metadata::constants::{attrs, datasets, tags};
use crate::metadata::document::{Document, Element};
use crate::metadata::errors::{MetaError, MetaResult};
use crate::metadata::guid::GuidAllocator;
use crate::metadata::query::{find_dataset, find_dataset_mut};

/// What to merge and how project identifiers change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Abbreviation of the survey dataset to copy
    pub dataset: String,
    /// Project id used in the source, defaults to the source survey name
    pub old_project_id: Option<String>,
    /// Project id of the target, defaults to the target survey name
    pub new_project_id: Option<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            dataset: datasets::DERIVED.to_string(),
            old_project_id: None,
            new_project_id: None,
        }
    }
}

/// Counts collected by a merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub tables: usize,
    pub variables: usize,
    pub formulas_remapped: usize,
    pub unresolved_references: usize,
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tables, {} variables copied, {} formulas remapped, {} unresolved references",
            self.tables, self.variables, self.formulas_remapped, self.unresolved_references
        )
    }
}

/// `GUID → name` of every table and variable under `SurveyDatasets`
fn guid_names(root: &Element) -> HashMap<String, String> {
    let mut names = HashMap::new();
    if let Some(survey_datasets) = root.child(tags::SURVEY_DATASETS) {
        survey_datasets.walk(&mut |e: &Element| {
            if e.name == tags::TABLE || e.name == tags::VARIABLE {
                if let (Some(guid), Some(name)) = (e.attr(attrs::GUID), e.attr(attrs::NAME)) {
                    names.insert(guid.to_string(), name.to_string());
                }
            }
        });
    }
    names
}

/// `name → GUID` of every table and variable under `SurveyDatasets`, added to `into`
fn name_guids(root: &Element, into: &mut HashMap<String, String>) {
    if let Some(survey_datasets) = root.child(tags::SURVEY_DATASETS) {
        survey_datasets.walk(&mut |e: &Element| {
            if e.name == tags::TABLE || e.name == tags::VARIABLE {
                if let (Some(guid), Some(name)) = (e.attr(attrs::GUID), e.attr(attrs::NAME)) {
                    into.insert(name.to_string(), guid.to_string());
                }
            }
        });
    }
}

fn project_id(explicit: &Option<String>, survey: &Element, role: &str) -> MetaResult<String> {
    match explicit {
        Some(id) => Ok(id.clone()),
        None => survey.attr(attrs::NAME).map(|n| n.to_string()).ok_or_else(|| {
            MetaError::InvalidArgument(format!("No project id given and the {} survey has no name", role))
        }),
    }
}

/// Copy the tables of the configured dataset from `source` into `target`
///
/// Copied tables and variables receive fresh GUIDs. GUID references inside
/// aggregation formulas are resolved through the source element names: the
/// target's element of that name wins, else the freshly copied one.
pub fn merge_dataset(
    source: &Document,
    target: &mut Document,
    options: &MergeOptions,
    guids: &mut GuidAllocator,
) -> MetaResult<MergeReport> {
    let old_id = project_id(&options.old_project_id, &source.root, "source")?;
    let new_id = project_id(&options.new_project_id, &target.root, "target")?;
    let rename = |value: &str| {
        if old_id.is_empty() {
            value.to_string()
        } else {
            value.replace(old_id.as_str(), &new_id)
        }
    };

    let source_tables = find_dataset(&source.root, &options.dataset)
        .and_then(|d| d.child(tags::TABLES))
        .ok_or_else(|| MetaError::ElementNotFound(format!("tables of dataset {} in source", options.dataset)))?;

    let mut report = MergeReport::default();
    let mut copied: Vec<Element> = source_tables.elements().filter(|e| e.name == tags::TABLE).cloned().collect();

    // fresh identities for the copies
    let mut resolved: HashMap<String, String> = HashMap::new();
    for table in copied.iter_mut() {
        let guid = guids.issue();
        table.set_attr(attrs::GUID, &guid);
        if let Some(name) = table.attr(attrs::NAME) {
            resolved.insert(name.to_string(), guid);
        }
        report.tables += 1;

        for variable in table.elements_mut().filter(|e| e.name == tags::VARIABLE) {
            let guid = guids.issue();
            variable.set_attr(attrs::GUID, &guid);
            if let Some(name) = variable.attr(attrs::NAME) {
                resolved.insert(name.to_string(), guid);
            }
            if let Some(body) = variable.attr(attrs::FORMULA_BODY).map(|b| b.to_string()) {
                variable.set_attr(attrs::FORMULA_BODY, &rename(&body));
            }
            report.variables += 1;
        }
    }
    name_guids(&target.root, &mut resolved);

    let source_names = guid_names(&source.root);
    for table in copied.iter_mut() {
        for variable in table.elements_mut().filter(|e| e.name == tags::VARIABLE) {
            let formula = match variable.attr(attrs::AGGREGATION_STR) {
                Some(formula) => formula.to_string(),
                None => continue,
            };

            let remapped = remap_formula(
                &formula,
                |old_guid| {
                    let name = source_names.get(old_guid)?;
                    resolved.get(&rename(name)).or_else(|| resolved.get(name)).cloned()
                },
                &rename,
            );

            for reference in &remapped.unresolved {
                warn!("Cannot resolve {} in AggregationStr of {}, left unchanged",
                      reference, variable.attr(attrs::NAME).unwrap_or("?"));
            }
            report.unresolved_references += remapped.unresolved.len();
            if remapped.remapped > 0 {
                report.formulas_remapped += 1;
            }
            if remapped.formula != formula {
                debug!("AggregationStr '{}' -> '{}'", formula, remapped.formula);
                variable.set_attr(attrs::AGGREGATION_STR, &remapped.formula);
            }
        }
    }

    let target_tables = find_dataset_mut(&mut target.root, &options.dataset)
        .and_then(|d| d.child_mut(tags::TABLES))
        .ok_or_else(|| MetaError::ElementNotFound(format!("tables of dataset {} in target", options.dataset)))?;
    for table in copied {
        target_tables.push_element(table);
    }

    info!("Merged dataset {} ({} -> {}): {}", options.dataset, old_id, new_id, report);
    Ok(report)
}

/// Merge `source` into `target` and write the result
///
/// The merged document goes to `output`, or back to `target` when absent.
pub fn merge_files(source: &Path, target: &Path, output: Option<&Path>, options: &MergeOptions) -> MetaResult<MergeReport> {
    let source_doc = Document::load(source)?;
    let mut target_doc = Document::load(target)?;
    let mut guids = GuidAllocator::new();

    let report = merge_dataset(&source_doc, &mut target_doc, options, &mut guids)?;
    let output = output.unwrap_or(target);
    target_doc.save(output)?;
    info!("Writing to: {}", output.display());
    Ok(report)
}
