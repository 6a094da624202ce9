pub mod merge;
pub mod refresh_service;

pub use merge::{merge_entries, FixedMultiplier, OutputMultiplier, UniformMultiplier};
pub use refresh_service::{RefreshService, RefreshServiceTrait, RefreshSummary};
