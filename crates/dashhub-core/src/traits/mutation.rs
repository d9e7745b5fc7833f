//! Mutation client trait for destructive folder/dashboard operations.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::uid::{DashboardUid, FolderUid};

/// Trait for the backend delete/move endpoints.
///
/// These are fire-and-await calls; on success the caller is responsible
/// for refreshing the affected parents so the browse tree resynchronizes.
#[async_trait]
pub trait ItemMutationClient: Send + Sync + std::fmt::Debug + 'static {
    /// Delete a folder and everything in it.
    async fn delete_folder(&self, uid: &FolderUid) -> AppResult<()>;

    /// Delete a dashboard.
    async fn delete_dashboard(&self, uid: &DashboardUid) -> AppResult<()>;

    /// Move a folder under a new parent (`None` = root).
    async fn move_folder(&self, uid: &FolderUid, dest: Option<&FolderUid>) -> AppResult<()>;

    /// Move a dashboard under a new parent (`None` = root).
    async fn move_dashboard(&self, uid: &DashboardUid, dest: Option<&FolderUid>) -> AppResult<()>;
}
