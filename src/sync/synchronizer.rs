//! Template → target attribute synchronization
//!
//! A [`Synchronizer`] indexes the template document once and can then patch
//! any number of target documents. A [`SyncPlan`] bundles several scopes and
//! the survey display name step, mirroring the usual "make the new year look
//! like last year" job.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::metadata::constants::{attrs, tags};
use crate::metadata::document::{Document, Element};
use crate::metadata::errors::{MetaError, MetaResult};
use crate::metadata::query::Selector;
use crate::sync::index::{Lookup, SourceIndex};
use crate::sync::key::KeyRule;
use crate::sync::patch::{patch_attributes, PatchOutcome};
use crate::sync::scope::SyncScope;
use crate::sync::survey::sync_display_name;

/// Counts collected while patching one target document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Target nodes selected by the scope
    pub examined: usize,
    /// Nodes with at least one attribute changed
    pub updated: usize,
    /// Matched nodes that already held the template values
    pub unchanged: usize,
    /// Nodes whose key does not exist in the template
    pub unmatched: usize,
    /// Nodes whose key matches several template nodes
    pub ambiguous: usize,
    /// Nodes lacking a scoped attribute (or a name), left untouched
    pub skipped_missing_attribute: usize,
}

impl SyncReport {
    fn absorb(&mut self, other: &SyncReport) {
        self.examined += other.examined;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
        self.unmatched += other.unmatched;
        self.ambiguous += other.ambiguous;
        self.skipped_missing_attribute += other.skipped_missing_attribute;
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} examined, {} updated, {} unchanged, {} unmatched, {} ambiguous, {} skipped (missing attribute)",
            self.examined, self.updated, self.unchanged, self.unmatched, self.ambiguous,
            self.skipped_missing_attribute
        )
    }
}

/// Copies one scope of attributes from an indexed template
#[derive(Debug)]
pub struct Synchronizer {
    scope: SyncScope,
    rule: KeyRule,
    index: SourceIndex,
}

impl Synchronizer {
    /// Index the template document for the given scope and key rule
    pub fn new(template: &Document, scope: SyncScope, rule: KeyRule) -> Self {
        let index = SourceIndex::build(&template.root, &scope, &rule);
        Synchronizer { scope, rule, index }
    }

    pub fn scope(&self) -> &SyncScope {
        &self.scope
    }

    pub fn index(&self) -> &SourceIndex {
        &self.index
    }

    /// Patch the target document in place
    pub fn apply(&self, target: &mut Document) -> SyncReport {
        let mut report = SyncReport::default();
        let mut warned: HashSet<String> = HashSet::new();
        let selector = Selector::tag(self.scope.kind.tag()).within(self.scope.dataset.as_deref());

        selector.for_each_mut(&mut target.root, &mut |element: &mut Element| {
            report.examined += 1;

            let key = match element.attr(attrs::NAME) {
                Some(name) => self.rule.derive(name).to_string(),
                None => {
                    report.skipped_missing_attribute += 1;
                    return;
                }
            };

            let record = match self.index.lookup(&key) {
                Lookup::Found(record) => record,
                Lookup::Missing => {
                    report.unmatched += 1;
                    return;
                }
                Lookup::Ambiguous => {
                    if warned.insert(key.clone()) {
                        warn!("Key '{}' is ambiguous in the template, target left unmodified", key);
                    }
                    report.ambiguous += 1;
                    return;
                }
            };

            match patch_attributes(element, record.iter()) {
                PatchOutcome::Updated(count) => {
                    debug!("Updated {} attributes on <{}> '{}'", count, element.name, key);
                    report.updated += 1;
                }
                PatchOutcome::Unchanged => report.unchanged += 1,
                PatchOutcome::MissingAttribute(missing) => {
                    debug!("Skipping <{}> '{}': no '{}' attribute", element.name, key, missing);
                    report.skipped_missing_attribute += 1;
                }
            }
        });

        info!("Synchronized {}: {}", self.scope, report);
        report
    }
}

/// A set of synchronization steps run against each target
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub scopes: Vec<SyncScope>,
    pub key_rule: KeyRule,
    /// Also re-date the survey display name
    pub display_name: bool,
}

impl SyncPlan {
    pub fn new(key_rule: KeyRule) -> Self {
        SyncPlan {
            scopes: Vec::new(),
            key_rule,
            display_name: false,
        }
    }

    pub fn with_scope(mut self, scope: SyncScope) -> Self {
        self.scopes.push(scope);
        self
    }

    pub fn with_display_name(mut self, enabled: bool) -> Self {
        self.display_name = enabled;
        self
    }

    /// Index the template for every scope of the plan
    pub fn prepare(&self, template: &Document) -> MetaResult<PreparedSync> {
        if self.scopes.is_empty() && !self.display_name {
            return Err(MetaError::InvalidArgument("Sync plan has nothing to do".to_string()));
        }

        let survey = if self.display_name {
            if template.root.name != tags::SURVEY {
                return Err(MetaError::ElementNotFound("/survey in template".to_string()));
            }
            // Only the survey attributes are needed, not the whole tree
            let mut survey = Element::new(&template.root.name);
            survey.attributes = template.root.attributes.clone();
            Some(survey)
        } else {
            None
        };

        let synchronizers = self
            .scopes
            .iter()
            .map(|scope| Synchronizer::new(template, scope.clone(), self.key_rule))
            .collect();

        Ok(PreparedSync { survey, synchronizers })
    }
}

/// A plan whose template has already been indexed
#[derive(Debug)]
pub struct PreparedSync {
    survey: Option<Element>,
    synchronizers: Vec<Synchronizer>,
}

impl PreparedSync {
    /// Run every step against one target document
    pub fn apply(&self, target: &mut Document) -> MetaResult<Vec<SyncReport>> {
        if let Some(template_survey) = &self.survey {
            if target.root.name != tags::SURVEY {
                return Err(MetaError::ElementNotFound("/survey in target".to_string()));
            }
            sync_display_name(template_survey, &mut target.root)?;
        }

        Ok(self.synchronizers.iter().map(|s| s.apply(target)).collect())
    }

    /// Synchronize one file in place, returning the combined report
    pub fn apply_file(&self, path: &Path) -> MetaResult<SyncReport> {
        let mut document = Document::load(path)?;
        let mut total = SyncReport::default();
        for report in self.apply(&mut document)? {
            total.absorb(&report);
        }
        document.save(path)?;
        info!("Synchronized {}: {}", path.display(), total);
        Ok(total)
    }

    /// Synchronize a batch of files, calling `on_file` after each one
    ///
    /// The first failure stops the batch; files already written stay written.
    pub fn apply_files<F>(&self, paths: &[PathBuf], mut on_file: F) -> MetaResult<SyncReport>
    where
        F: FnMut(&Path),
    {
        let mut total = SyncReport::default();
        for path in paths {
            total.absorb(&self.apply_file(path)?);
            on_file(path);
        }
        Ok(total)
    }
}
