//! Bulk attribute overrides
//!
//! Renames tables and categories and sets variable labels, palettes, filter
//! rules and aggregation from a settings sheet.

pub mod applier;
pub mod palette;
pub mod settings;
#[cfg(test)]
mod tests;

pub use applier::{apply_overrides, override_file, override_files, OverrideReport, SurveyOverrides};
pub use palette::PaletteCatalog;
pub use settings::{aggregation_for_map_type, OverrideSettings, SettingsRow};
