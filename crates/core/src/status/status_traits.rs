use async_trait::async_trait;

use crate::errors::Result;
use crate::status::RefreshStatus;

/// Storage contract for the singleton refresh-status row.
#[async_trait]
pub trait StatusRepositoryTrait: Send + Sync {
    /// Current status, or the zero state if never initialized.
    fn get_status(&self) -> Result<RefreshStatus>;

    /// Overwrites the singleton with the given count and "now".
    async fn update_status(&self, total_countries: i64) -> Result<RefreshStatus>;
}
