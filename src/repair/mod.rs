//! Character repair for mis-decoded labels and titles

pub mod char_map;
pub mod repairer;

pub use char_map::CharRepair;
pub use repairer::{collect_xml_files, repair_document, repair_file, repair_files, RepairReport};
