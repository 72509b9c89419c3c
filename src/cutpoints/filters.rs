//! `CategoryFilters` documents built from class boundaries

use crate::generator::builder::ElementBuilder;
use crate::metadata::constants::tags;
use crate::metadata::document::Document;
use crate::utils::string_utils::title_case;

/// One `Filter` range; an empty bound is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRange {
    pub from: String,
    pub to: String,
}

fn bound(value: f64) -> String {
    (value.trunc() as i64).to_string()
}

/// Filter ranges from class boundaries
///
/// Boundary `i` opens range `i` (empty when the boundary is zero) and the next
/// boundary closes it; the last range is open ended.
/// `[0, 271, 479]` gives `("", "271")`, `("271", "479")`, `("479", "")`.
pub fn filter_ranges(breaks: &[f64]) -> Vec<FilterRange> {
    breaks
        .iter()
        .enumerate()
        .map(|(i, value)| FilterRange {
            from: if *value != 0.0 { bound(*value) } else { String::new() },
            to: breaks.get(i + 1).map(|next| bound(*next)).unwrap_or_default(),
        })
        .collect()
}

/// Name of the filter set of a column, e.g. `cutpoints_ELEC2019_Votes_Total`
pub fn filter_set_name(project_id: &str, column: &str) -> String {
    format!("cutpoints_{}_{}", project_id, title_case(column))
}

/// File the filters of a column are written to
pub fn output_file_name(project_id: &str, column: &str) -> String {
    format!("{}{}.xml", project_id, column)
}

/// A standalone `CategoryFilters` document
pub fn category_filters(project_id: &str, column: &str, breaks: &[f64]) -> Document {
    let filters = filter_ranges(breaks).into_iter().map(|range| {
        ElementBuilder::new(tags::FILTER)
            .attr("from", &range.from)
            .attr("to", &range.to)
            .build()
    });

    let root = ElementBuilder::new(tags::CATEGORY_FILTERS)
        .child(ElementBuilder::new(tags::FILTER_SET).children(filters))
        .attr("name", &filter_set_name(project_id, column))
        .attr("valueFormat", "Number")
        .build();

    Document { root, declaration: false }
}
