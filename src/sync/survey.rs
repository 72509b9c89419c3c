//! Survey display name synchronization
//!
//! Survey names follow the `prefix + year` convention (`EVR2011`, `PC2018`),
//! which is how the target year is found.

use lazy_static::lazy_static;
use log::info;
use regex::Regex;

use crate::metadata::constants::attrs;
use crate::metadata::document::Element;
use crate::metadata::errors::{MetaError, MetaResult};

lazy_static! {
    static ref YEAR_PATTERN: Regex = Regex::new(r"^\d{4}$").unwrap();
}

/// Year encoded in the last four characters of a survey name
pub fn survey_year(name: &str) -> Option<&str> {
    let start = name.char_indices().rev().nth(3).map(|(i, _)| i)?;
    let year = &name[start..];
    if YEAR_PATTERN.is_match(year) {
        Some(year)
    } else {
        None
    }
}

/// Copy the template survey's display name into the target, re-dated
///
/// The template year is replaced by the target year; when the template name
/// does not mention its year the target year is appended. Returns the new
/// display name.
pub fn sync_display_name(template: &Element, target: &mut Element) -> MetaResult<String> {
    let template_year = template.require_attr(attrs::YEAR)?;
    let template_name = template.require_attr(attrs::DISPLAY_NAME)?;

    let target_name = target.require_attr(attrs::NAME)?;
    let target_year = survey_year(target_name).ok_or_else(|| {
        MetaError::InvalidArgument(format!("Survey name '{}' does not end with a year", target_name))
    })?;

    let display_name = if !template_year.is_empty() && template_name.contains(template_year) {
        template_name.replace(template_year, target_year)
    } else {
        format!("{} {}", template_name, target_year)
    };

    info!("Survey display name: '{}' -> '{}'", template_name, display_name);
    target.set_attr(attrs::DISPLAY_NAME, &display_name);
    Ok(display_name)
}
