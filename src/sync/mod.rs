//! Attribute synchronization between metadata documents
//!
//! Copies table and variable attributes (and the survey display name) from a
//! template document into target documents whose nodes share a key.

pub mod key;
pub mod scope;
pub mod index;
pub mod patch;
pub mod survey;
pub mod synchronizer;
#[cfg(test)]
mod tests;

pub use index::{AttributeRecord, Lookup, SourceIndex};
pub use key::KeyRule;
pub use patch::{patch_attributes, PatchOutcome};
pub use scope::{ElementKind, SyncScope};
pub use survey::{survey_year, sync_display_name};
pub use synchronizer::{PreparedSync, SyncPlan, SyncReport, Synchronizer};
