use std::sync::Arc;

use crate::errors::Result;
use crate::status::{RefreshStatus, StatusRepositoryTrait};

/// Read access to the last-refresh summary.
pub trait StatusServiceTrait: Send + Sync {
    fn get_status(&self) -> Result<RefreshStatus>;
}

pub struct StatusService {
    repository: Arc<dyn StatusRepositoryTrait>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn StatusRepositoryTrait>) -> Self {
        StatusService { repository }
    }
}

impl StatusServiceTrait for StatusService {
    fn get_status(&self) -> Result<RefreshStatus> {
        self.repository.get_status()
    }
}
