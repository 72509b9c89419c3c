//! Choropleth cut points
//!
//! Natural breaks classification of CSV data columns, written as
//! `CategoryFilters` documents.

pub mod dataset;
pub mod filters;
pub mod jenks;
pub mod writer;

pub use filters::{category_filters, filter_ranges, FilterRange};
pub use jenks::{jenks_breaks, parse_values, BreaksError};
pub use writer::{cutpoints_for_directory, cutpoints_for_file, CutpointOptions, CutpointReport};
