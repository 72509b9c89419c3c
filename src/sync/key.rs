//! Key derivation rules
//!
//! Matching nodes of two documents share a key derived from their `name`
//! attribute. Year-specific documents prefix names with the project id
//! (`PC2018_T001_001` vs `PC2019_T001_001`), so most comparisons only look
//! at the tail of the name.

use std::fmt;
use std::str::FromStr;

use crate::metadata::errors::{MetaError, MetaResult};

/// How a matching key is derived from a node's `name`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRule {
    /// The full name
    Exact,
    /// The last N characters (the whole name when it is shorter)
    Trailing(usize),
    /// The segment after the last underscore (the whole name when there is none)
    AfterLastUnderscore,
}

impl KeyRule {
    /// Derive the key for a name
    pub fn derive<'a>(&self, name: &'a str) -> &'a str {
        match *self {
            KeyRule::Exact => name,
            KeyRule::Trailing(n) => {
                let count = name.chars().count();
                if count <= n {
                    return name;
                }
                let start = name
                    .char_indices()
                    .nth(count - n)
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                &name[start..]
            }
            KeyRule::AfterLastUnderscore => name.rsplit('_').next().unwrap_or(name),
        }
    }
}

impl FromStr for KeyRule {
    type Err = MetaError;

    /// Parses `exact`, `suffix` or `trailing:N`
    fn from_str(s: &str) -> MetaResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(KeyRule::Exact),
            "suffix" | "after-underscore" => Ok(KeyRule::AfterLastUnderscore),
            other => {
                let count = other
                    .strip_prefix("trailing:")
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| MetaError::InvalidArgument(format!(
                        "Unknown key rule '{}' (expected exact, suffix or trailing:N)",
                        s
                    )))?;
                Ok(KeyRule::Trailing(count))
            }
        }
    }
}

impl fmt::Display for KeyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRule::Exact => write!(f, "exact"),
            KeyRule::Trailing(n) => write!(f, "trailing:{}", n),
            KeyRule::AfterLastUnderscore => write!(f, "suffix"),
        }
    }
}
