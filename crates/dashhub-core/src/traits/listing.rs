//! Listing client trait for the folder and dashboard backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::item::{DashboardItem, FolderItem};
use crate::types::pagination::PageQuery;
use crate::types::uid::FolderUid;

/// Trait for the backend listing endpoints.
///
/// `list_folders` hits the folder CRUD endpoint; `list_dashboards` goes
/// through the search service scoped to the parent's location. In both
/// cases a short page (`len < page_size`) signals that no further pages
/// of that kind exist for the parent.
#[async_trait]
pub trait ListingClient: Send + Sync + std::fmt::Debug + 'static {
    /// List at most one page of folders that are direct children of
    /// `parent` (`None` = root), in the backend's default ordering.
    async fn list_folders(
        &self,
        parent: Option<&FolderUid>,
        page: &PageQuery,
    ) -> AppResult<Vec<FolderItem>>;

    /// List at most one page of dashboards that are direct children of
    /// `parent` (`None` = root), in the backend's default ordering.
    async fn list_dashboards(
        &self,
        parent: Option<&FolderUid>,
        page: &PageQuery,
    ) -> AppResult<Vec<DashboardItem>>;
}
