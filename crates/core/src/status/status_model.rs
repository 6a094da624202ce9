use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the most recent completed refresh.
///
/// A process-wide singleton: only the latest refresh is visible, and it is
/// overwritten at the end of every cycle (last writer wins if two refreshes
/// race).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RefreshStatus {
    pub total_countries: i64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl Default for RefreshStatus {
    /// Zero state before any refresh has run.
    fn default() -> Self {
        RefreshStatus {
            total_countries: 0,
            last_refreshed_at: None,
        }
    }
}
