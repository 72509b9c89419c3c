//! Utility modules for common functionality
//!
//! Run logging, progress reporting, CSV reading and naming helpers shared by
//! the commands.

pub mod logger;
pub mod progress;
pub mod string_utils;
pub mod csv_utils;
