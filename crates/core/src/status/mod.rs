pub mod status_model;
pub mod status_service;
pub mod status_traits;

pub use status_model::RefreshStatus;
pub use status_service::{StatusService, StatusServiceTrait};
pub use status_traits::StatusRepositoryTrait;
