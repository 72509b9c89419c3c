//! Node selection helpers
//!
//! The metadata format nests tables and variables inside named survey
//! datasets. These helpers select elements by tag, optionally restricted to
//! the subtree of the survey dataset carrying a given abbreviation
//! (the `//SurveyDataset[@abbreviation="ORG"]//variable` kind of query).

use crate::metadata::constants::{attrs, tags};
use crate::metadata::document::Element;

/// Selects descendant elements by tag and optional dataset scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Tag to match
    pub tag: String,
    /// Abbreviation of the enclosing survey dataset, if restricted
    pub dataset: Option<String>,
}

impl Selector {
    /// Match every element with the given tag
    pub fn tag(tag: &str) -> Self {
        Selector {
            tag: tag.to_string(),
            dataset: None,
        }
    }

    /// Restrict matches to one survey dataset
    pub fn within(mut self, abbreviation: Option<&str>) -> Self {
        self.dataset = abbreviation.map(str::to_string);
        self
    }

    /// Collect matching elements in document order
    pub fn select<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(root, self.dataset.is_none(), &mut found);
        found
    }

    fn collect<'a>(&self, element: &'a Element, in_scope: bool, found: &mut Vec<&'a Element>) {
        let in_scope = in_scope || self.opens_scope(element);
        if in_scope && element.name == self.tag {
            found.push(element);
        }
        for child in element.elements() {
            self.collect(child, in_scope, found);
        }
    }

    /// Visit matching elements mutably in document order
    pub fn for_each_mut<F>(&self, root: &mut Element, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        let in_scope = self.dataset.is_none();
        self.visit_mut(root, in_scope, visit);
    }

    fn visit_mut<F>(&self, element: &mut Element, in_scope: bool, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        let in_scope = in_scope || self.opens_scope(element);
        if in_scope && element.name == self.tag {
            visit(element);
        }
        for child in element.elements_mut() {
            self.visit_mut(child, in_scope, visit);
        }
    }

    fn opens_scope(&self, element: &Element) -> bool {
        match &self.dataset {
            Some(abbreviation) => {
                is_dataset(element) && element.attr(attrs::ABBREVIATION) == Some(abbreviation.as_str())
            }
            None => false,
        }
    }
}

fn is_dataset(element: &Element) -> bool {
    element.name == tags::SURVEY_DATASET || element.name == tags::GEO_SURVEY_DATASET
}

/// Find the survey dataset element with the given abbreviation
pub fn find_dataset<'a>(root: &'a Element, abbreviation: &str) -> Option<&'a Element> {
    let mut found = None;
    root.walk(&mut |e: &'a Element| {
        if found.is_none() && is_dataset(e) && e.attr(attrs::ABBREVIATION) == Some(abbreviation) {
            found = Some(e);
        }
    });
    found
}

/// Mutable counterpart of [`find_dataset`]
pub fn find_dataset_mut<'a>(root: &'a mut Element, abbreviation: &str) -> Option<&'a mut Element> {
    if is_dataset(root) && root.attr(attrs::ABBREVIATION) == Some(abbreviation) {
        return Some(root);
    }
    for child in root.elements_mut() {
        if let Some(found) = find_dataset_mut(child, abbreviation) {
            return Some(found);
        }
    }
    None
}
