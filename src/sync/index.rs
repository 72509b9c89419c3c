//! Source document indexing
//!
//! Builds the key → attribute record lookup consulted while patching a
//! target document.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::metadata::constants::attrs;
use crate::metadata::document::Element;
use crate::metadata::query::Selector;
use crate::sync::key::KeyRule;
use crate::sync::scope::SyncScope;

/// Attribute values captured from one source node, addressed by name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeRecord {
    values: Vec<(String, String)>,
}

impl AttributeRecord {
    /// Capture the named attributes of an element
    ///
    /// Returns the first missing attribute name when the element lacks one.
    pub fn capture(element: &Element, names: &[String]) -> Result<Self, String> {
        let mut values = Vec::with_capacity(names.len());
        for name in names {
            match element.attr(name) {
                Some(value) => values.push((name.clone(), value.to_string())),
                None => return Err(name.clone()),
            }
        }
        Ok(AttributeRecord { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of looking a key up in the index
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a AttributeRecord),
    /// No source node carries the key
    Missing,
    /// Several source nodes carry the key
    Ambiguous,
}

/// Key → record mapping built from the source document
#[derive(Debug, Default)]
pub struct SourceIndex {
    records: HashMap<String, AttributeRecord>,
    ambiguous: HashSet<String>,
    incomplete: usize,
}

impl SourceIndex {
    /// Index every node selected by the scope
    pub fn build(root: &Element, scope: &SyncScope, rule: &KeyRule) -> Self {
        let mut index = SourceIndex::default();
        let selector = Selector::tag(scope.kind.tag()).within(scope.dataset.as_deref());

        for element in selector.select(root) {
            let name = match element.attr(attrs::NAME) {
                Some(name) => name,
                None => {
                    index.incomplete += 1;
                    continue;
                }
            };

            let record = match AttributeRecord::capture(element, &scope.attributes) {
                Ok(record) => record,
                Err(missing) => {
                    warn!("Source <{}> '{}' has no '{}' attribute, not indexed",
                          element.name, name, missing);
                    index.incomplete += 1;
                    continue;
                }
            };

            let key = rule.derive(name).to_string();
            if index.ambiguous.contains(&key) {
                continue;
            }
            if index.records.remove(&key).is_some() {
                warn!("Key '{}' matches several source <{}> elements, leaving it out", key, element.name);
                index.ambiguous.insert(key);
                continue;
            }
            index.records.insert(key, record);
        }

        debug!("Indexed {} source <{}> elements ({} ambiguous keys, {} incomplete)",
               index.records.len(), scope.kind.tag(), index.ambiguous.len(), index.incomplete);
        index
    }

    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        if self.ambiguous.contains(key) {
            return Lookup::Ambiguous;
        }
        match self.records.get(key) {
            Some(record) => Lookup::Found(record),
            None => Lookup::Missing,
        }
    }

    /// Number of usable keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Source nodes left out because they lacked a name or a scoped attribute
    pub fn incomplete(&self) -> usize {
        self.incomplete
    }
}
