//! Color palette catalog
//!
//! A JSON array of `{"title": .., "id": ..}` objects, looked up by title.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::metadata::errors::{MetaError, MetaResult};
use crate::utils::string_utils::title_case;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PaletteId {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
struct PaletteEntry {
    title: String,
    id: PaletteId,
}

/// Palette ids by title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteCatalog {
    ids: HashMap<String, String>,
}

impl PaletteCatalog {
    pub fn load<P: AsRef<Path>>(path: P) -> MetaResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| MetaError::ConfigError(format!("Cannot read palettes {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> MetaResult<Self> {
        let entries: Vec<PaletteEntry> = serde_json::from_str(json)?;
        let ids = entries
            .into_iter()
            .map(|entry| {
                let id = match entry.id {
                    PaletteId::Text(id) => id,
                    PaletteId::Number(id) => id.to_string(),
                };
                (entry.title, id)
            })
            .collect();
        Ok(PaletteCatalog { ids })
    }

    /// Id of a palette named in a settings sheet, matched on its title-cased name
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.ids.get(&title_case(name.trim())).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
