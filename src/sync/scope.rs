//! Synchronization scopes
//!
//! A scope names the element kind, the attributes to copy and the survey
//! dataset the copy is restricted to.

use std::fmt;
use std::str::FromStr;

use crate::metadata::constants::{presets, tags};
use crate::metadata::errors::{MetaError, MetaResult};

/// Element kinds that can be synchronized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Table,
    Variable,
}

impl ElementKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Table => tags::TABLE,
            ElementKind::Variable => tags::VARIABLE,
        }
    }
}

impl FromStr for ElementKind {
    type Err = MetaError;

    fn from_str(s: &str) -> MetaResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "tables" => Ok(ElementKind::Table),
            "variable" | "variables" => Ok(ElementKind::Variable),
            _ => Err(MetaError::InvalidArgument(format!("Unknown element kind: {}", s))),
        }
    }
}

/// What to copy from the template into the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncScope {
    pub kind: ElementKind,
    /// Attribute names, in the order they are written
    pub attributes: Vec<String>,
    /// Survey dataset abbreviation the copy is restricted to
    pub dataset: Option<String>,
}

impl SyncScope {
    pub fn new(kind: ElementKind, attributes: &[&str]) -> Self {
        SyncScope {
            kind,
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
            dataset: None,
        }
    }

    /// Build a scope from a named preset
    ///
    /// Known presets: `variable-formatting`, `variable-full`,
    /// `variable-aggregation` and `table-full`.
    pub fn preset(name: &str) -> MetaResult<Self> {
        let scope = match name.trim().to_lowercase().as_str() {
            "variable-formatting" | "formatting" => {
                SyncScope::new(ElementKind::Variable, presets::VARIABLE_FORMATTING)
            }
            "variable-full" | "variables" => SyncScope::new(ElementKind::Variable, presets::VARIABLE_FULL),
            "variable-aggregation" | "aggregation" => {
                SyncScope::new(ElementKind::Variable, presets::VARIABLE_AGGREGATION)
            }
            "table-full" | "tables" => SyncScope::new(ElementKind::Table, presets::TABLE_FULL),
            _ => return Err(MetaError::InvalidArgument(format!("Unknown sync preset: {}", name))),
        };
        Ok(scope)
    }

    /// Build a scope from an explicit, comma separated attribute list
    pub fn custom(kind: ElementKind, attribute_list: &str) -> MetaResult<Self> {
        let attributes: Vec<String> = attribute_list
            .split(',')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        if attributes.is_empty() {
            return Err(MetaError::InvalidArgument("Empty attribute list".to_string()));
        }

        Ok(SyncScope {
            kind,
            attributes,
            dataset: None,
        })
    }

    /// Restrict the scope to one survey dataset
    pub fn within(mut self, dataset: Option<&str>) -> Self {
        self.dataset = dataset.map(str::to_string);
        self
    }
}

impl fmt::Display for SyncScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.kind.tag(), self.attributes.join(", "))?;
        if let Some(dataset) = &self.dataset {
            write!(f, " in {}", dataset)?;
        }
        Ok(())
    }
}
