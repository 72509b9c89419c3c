//! Attribute patching with the skip-on-missing-attribute policy

use crate::metadata::document::Element;

/// Outcome of patching a single element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// At least one attribute changed value
    Updated(usize),
    /// Every attribute already held the requested value
    Unchanged,
    /// The element lacks the named attribute and was left untouched
    MissingAttribute(String),
}

/// Overwrite attributes on an element
///
/// Every attribute must already exist on the element. If one is missing the
/// element is not modified at all.
pub fn patch_attributes<'a, I>(element: &mut Element, updates: I) -> PatchOutcome
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let updates: Vec<(&str, &str)> = updates.into_iter().collect();

    if let Some((missing, _)) = updates.iter().find(|(name, _)| !element.has_attr(name)) {
        return PatchOutcome::MissingAttribute(missing.to_string());
    }

    let mut changed = 0;
    for (name, value) in updates {
        if element.attr(name) != Some(value) {
            element.set_attr(name, value);
            changed += 1;
        }
    }

    if changed == 0 {
        PatchOutcome::Unchanged
    } else {
        PatchOutcome::Updated(changed)
    }
}
