//! Replacement table for mis-decoded character sequences
//!
//! UTF-8 text read back as Latin-1 turns every accented letter into a
//! two-character sequence (`ó` becomes `Ã³`). A [`CharRepair`] maps those
//! sequences back to the intended characters.

use lazy_static::lazy_static;
use log::warn;

use crate::metadata::errors::{MetaError, MetaResult};

lazy_static! {
    /// Sequences seen in Spanish-language survey labels
    static ref DEFAULT_REPAIRS: Vec<(&'static str, &'static str)> = vec![
        ("Ã³", "ó"),
        ("Ã¡", "á"),
        ("Ã±", "ñ"),
        ("Ãº", "ú"),
        ("Ã©", "é"),
    ];
}

/// Upper bound on replacement passes over one value
const MAX_PASSES: usize = 8;

/// Validated malformed-sequence → replacement table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharRepair {
    replacements: Vec<(String, String)>,
}

impl CharRepair {
    /// Build a table from explicit entries
    ///
    /// Fails when a malformed sequence is empty, listed twice, or appears
    /// inside any replacement (the result would not be stable).
    pub fn new(entries: Vec<(String, String)>) -> MetaResult<Self> {
        for (index, (malformed, _)) in entries.iter().enumerate() {
            if malformed.is_empty() {
                return Err(MetaError::InvalidArgument("Empty malformed sequence in repair map".to_string()));
            }
            if entries[..index].iter().any(|(earlier, _)| earlier == malformed) {
                return Err(MetaError::InvalidArgument(format!("Sequence '{}' is mapped twice", malformed)));
            }
            if let Some((_, replacement)) = entries.iter().find(|(_, r)| r.contains(malformed.as_str())) {
                return Err(MetaError::InvalidArgument(format!(
                    "Replacement '{}' contains the malformed sequence '{}'", replacement, malformed
                )));
            }
        }
        Ok(CharRepair { replacements: entries })
    }

    /// The built-in table
    pub fn defaults() -> Self {
        CharRepair {
            replacements: DEFAULT_REPAIRS
                .iter()
                .map(|(malformed, fixed)| (malformed.to_string(), fixed.to_string()))
                .collect(),
        }
    }

    /// The built-in table plus extra entries (an extra entry overrides a default one)
    pub fn with_extra(extra: Vec<(String, String)>) -> MetaResult<Self> {
        let mut entries: Vec<(String, String)> = Self::defaults()
            .replacements
            .into_iter()
            .filter(|(malformed, _)| !extra.iter().any(|(m, _)| m == malformed))
            .collect();
        entries.extend(extra);
        Self::new(entries)
    }

    /// Parse a `malformed=replacement` pair as given on the command line
    pub fn parse_entry(entry: &str) -> MetaResult<(String, String)> {
        match entry.split_once('=') {
            Some((malformed, replacement)) if !malformed.is_empty() => {
                Ok((malformed.to_string(), replacement.to_string()))
            }
            _ => Err(MetaError::InvalidArgument(format!(
                "Repair entry '{}' must look like MALFORMED=REPLACEMENT", entry
            ))),
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.replacements
    }

    /// Repair one value, returning `None` when nothing needed fixing
    pub fn repair(&self, value: &str) -> Option<String> {
        let mut current = value.to_string();
        let mut changed = false;

        for _ in 0..MAX_PASSES {
            let mut pass_changed = false;
            for (malformed, replacement) in &self.replacements {
                if current.contains(malformed.as_str()) {
                    current = current.replace(malformed.as_str(), replacement);
                    pass_changed = true;
                }
            }
            if !pass_changed {
                return if changed { Some(current) } else { None };
            }
            changed = true;
        }

        warn!("Repair of '{}' did not settle after {} passes", value, MAX_PASSES);
        Some(current)
    }
}

impl Default for CharRepair {
    fn default() -> Self {
        Self::defaults()
    }
}
