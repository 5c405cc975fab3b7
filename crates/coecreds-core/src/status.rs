//! Cluster lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a cluster as reported by the container-infra service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterStatus {
    CreateInProgress,
    CreateFailed,
    CreateComplete,
    UpdateInProgress,
    UpdateFailed,
    UpdateComplete,
    DeleteInProgress,
    DeleteFailed,
    DeleteComplete,
    ResumeComplete,
    RestoreComplete,
    RollbackComplete,
    SnapshotComplete,
    CheckComplete,
    AdoptComplete,
    /// Any state this crate does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ClusterStatus {
    /// Returns true if the last operation on the cluster finished successfully.
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            Self::CreateComplete
                | Self::UpdateComplete
                | Self::ResumeComplete
                | Self::RestoreComplete
                | Self::RollbackComplete
                | Self::SnapshotComplete
                | Self::CheckComplete
                | Self::AdoptComplete
        )
    }
}
