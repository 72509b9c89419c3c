pub mod metadata;
pub mod sync;
pub mod repair;
pub mod config;
pub mod generator;
pub mod merge;
pub mod cutpoints;
pub mod overrides;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::MetaKit;

pub use metadata::{Document, Element, MetaError, MetaResult};
pub use sync::{KeyRule, SyncPlan, SyncScope};
pub use repair::CharRepair;
pub use config::GeneratorConfig;
pub use merge::MergeOptions;
pub use cutpoints::CutpointOptions;
