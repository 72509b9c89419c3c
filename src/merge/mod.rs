//! Survey dataset merge
//!
//! Carries the hand-made tables of a previous-year document over to a new
//! document, re-issuing GUIDs and fixing the references between them.

pub mod formula;
pub mod merger;

pub use formula::{reference_positions, remap_formula, RemappedFormula};
pub use merger::{merge_dataset, merge_files, MergeOptions, MergeReport};
