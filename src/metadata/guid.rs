//! GUID generation and validation

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

lazy_static! {
    static ref GUID_PATTERN: Regex = Regex::new(
        r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
    ).unwrap();
}

/// Whether a string is a lowercase hyphenated GUID
pub fn is_valid_guid(value: &str) -> bool {
    GUID_PATTERN.is_match(value)
}

/// Issues random GUIDs that are unique within one run
#[derive(Debug, Default)]
pub struct GuidAllocator {
    issued: HashSet<String>,
}

impl GuidAllocator {
    pub fn new() -> Self {
        GuidAllocator::default()
    }

    /// Issue a fresh GUID
    pub fn issue(&mut self) -> String {
        loop {
            let guid = Uuid::new_v4().to_string();
            if self.issued.insert(guid.clone()) {
                return guid;
            }
        }
    }

    /// Number of GUIDs issued so far
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}
