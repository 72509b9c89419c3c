//! Survey metadata document module
//!
//! This module provides the document tree used by every operation,
//! element selection, vocabulary constants and GUID handling.

pub mod errors;
pub mod constants;
pub mod document;
pub mod query;
pub mod guid;
#[cfg(test)]
pub(crate) mod tests;

pub use document::{Attribute, Document, Element, Node};
pub use errors::{MetaError, MetaResult};
pub use guid::{is_valid_guid, GuidAllocator};
pub use query::Selector;
