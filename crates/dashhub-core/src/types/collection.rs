//! The per-parent collection model and the folders-first page planner.
//!
//! A [`BrowseCollection`] is the known, possibly partial set of children
//! loaded for one parent folder (or for the root). Children arrive in
//! pages, folders first; dashboards are only requested once every folder
//! page for that parent has been exhausted.

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Which kind of child the most recent page fetch targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchKind {
    /// A page of folders.
    Folder,
    /// A page of dashboards.
    Dashboard,
}

/// One fetched page of children, ready to be merged into a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBatch {
    /// The kind of item this page holds.
    pub kind: FetchKind,
    /// 1-based page number that was requested.
    pub page: u64,
    /// The items returned, in backend order.
    pub items: Vec<Item>,
    /// The page size that was requested.
    pub page_size: u64,
}

impl PageBatch {
    /// Whether the page came back full, implying further pages of the
    /// same kind may exist.
    pub fn has_more(&self) -> bool {
        self.items.len() as u64 == self.page_size
    }
}

/// The set of known children of one parent (or of the root).
///
/// `items` is strictly in fetch order: folders precede dashboards, and
/// within a kind pages are concatenated in the order they arrived. This
/// component never re-sorts; ordering is a property of what the backend
/// returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseCollection {
    /// Ordered children, insertion order = fetch order.
    pub items: Vec<Item>,
    /// Which kind the most recent page belonged to.
    pub last_fetched_kind: FetchKind,
    /// 1-based page number of the most recent fetch of `last_fetched_kind`.
    pub last_fetched_page: u64,
    /// True if the last page fetched for `last_fetched_kind` was full.
    pub last_kind_has_more_items: bool,
    /// True once dashboards have been paged to completion.
    pub is_fully_loaded: bool,
}

impl BrowseCollection {
    /// Build a fresh collection from the first fetched page.
    pub fn from_page(batch: PageBatch) -> Self {
        let mut collection = Self {
            items: Vec::new(),
            last_fetched_kind: batch.kind,
            last_fetched_page: batch.page,
            last_kind_has_more_items: false,
            is_fully_loaded: false,
        };
        collection.append_page(batch);
        collection
    }

    /// Append a fetched page, updating the bookkeeping fields.
    ///
    /// Items are concatenated to the end of the existing sequence, never
    /// reordered. `is_fully_loaded` holds iff the dashboard kind has been
    /// paged to completion.
    pub fn append_page(&mut self, batch: PageBatch) {
        let has_more = batch.has_more();
        self.last_fetched_kind = batch.kind;
        self.last_fetched_page = batch.page;
        self.last_kind_has_more_items = has_more;
        self.is_fully_loaded = batch.kind == FetchKind::Dashboard && !has_more;
        self.items.extend(batch.items);
    }

    /// Whether this collection counts as fully loaded for projection
    /// purposes. When dashboards are excluded from the view, exhausted
    /// folders alone are treated as complete.
    pub fn is_loaded_treating_excluded(&self, exclude_dashboards: bool) -> bool {
        if self.is_fully_loaded {
            return true;
        }
        exclude_dashboards
            && self.last_fetched_kind == FetchKind::Folder
            && !self.last_kind_has_more_items
    }
}

/// Decide which `(kind, page)` to request next for a parent, given its
/// current collection state.
///
/// Folders are paged to completion before the first dashboard page is
/// requested. Returns `None` when there is nothing left to fetch — that is
/// a no-op signal for the caller, not an error.
pub fn next_fetch(
    collection: Option<&BrowseCollection>,
    exclude_dashboards: bool,
) -> Option<(FetchKind, u64)> {
    let Some(collection) = collection else {
        return Some((FetchKind::Folder, 1));
    };

    if collection.last_fetched_kind == FetchKind::Folder && collection.last_kind_has_more_items {
        return Some((FetchKind::Folder, collection.last_fetched_page + 1));
    }

    if exclude_dashboards {
        return None;
    }

    match collection.last_fetched_kind {
        // Folders exhausted, transition to the first dashboard page.
        FetchKind::Folder => Some((FetchKind::Dashboard, 1)),
        FetchKind::Dashboard if collection.last_kind_has_more_items => {
            Some((FetchKind::Dashboard, collection.last_fetched_page + 1))
        }
        FetchKind::Dashboard => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::item::{DashboardItem, FolderItem};
    use crate::types::uid::{DashboardUid, FolderUid};

    fn folder_items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::Folder(FolderItem {
                    uid: FolderUid::from(format!("f{i}")),
                    title: format!("Folder {i}"),
                    parent_uid: None,
                    parent_title: None,
                })
            })
            .collect()
    }

    fn dashboard_items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::Dashboard(DashboardItem {
                    uid: DashboardUid::from(format!("d{i}")),
                    title: format!("Dashboard {i}"),
                    parent_uid: None,
                    tags: Vec::new(),
                })
            })
            .collect()
    }

    #[test]
    fn test_first_fetch_is_folder_page_one() {
        assert_eq!(next_fetch(None, false), Some((FetchKind::Folder, 1)));
        assert_eq!(next_fetch(None, true), Some((FetchKind::Folder, 1)));
    }

    #[test]
    fn test_full_folder_page_continues_folders() {
        let collection = BrowseCollection::from_page(PageBatch {
            kind: FetchKind::Folder,
            page: 1,
            items: folder_items(50),
            page_size: 50,
        });
        assert!(collection.last_kind_has_more_items);
        assert_eq!(
            next_fetch(Some(&collection), false),
            Some((FetchKind::Folder, 2))
        );
    }

    #[test]
    fn test_short_folder_page_transitions_to_dashboards() {
        let collection = BrowseCollection::from_page(PageBatch {
            kind: FetchKind::Folder,
            page: 2,
            items: folder_items(10),
            page_size: 50,
        });
        assert_eq!(
            next_fetch(Some(&collection), false),
            Some((FetchKind::Dashboard, 1))
        );
    }

    #[test]
    fn test_exhausted_folders_with_dashboards_excluded_is_none() {
        let collection = BrowseCollection::from_page(PageBatch {
            kind: FetchKind::Folder,
            page: 1,
            items: folder_items(3),
            page_size: 50,
        });
        assert_eq!(next_fetch(Some(&collection), true), None);
        assert!(collection.is_loaded_treating_excluded(true));
        assert!(!collection.is_loaded_treating_excluded(false));
    }

    #[test]
    fn test_dashboard_paging_continues_then_stops() {
        let mut collection = BrowseCollection::from_page(PageBatch {
            kind: FetchKind::Folder,
            page: 1,
            items: folder_items(3),
            page_size: 50,
        });
        collection.append_page(PageBatch {
            kind: FetchKind::Dashboard,
            page: 1,
            items: dashboard_items(50),
            page_size: 50,
        });
        assert!(!collection.is_fully_loaded);
        assert_eq!(
            next_fetch(Some(&collection), false),
            Some((FetchKind::Dashboard, 2))
        );

        collection.append_page(PageBatch {
            kind: FetchKind::Dashboard,
            page: 2,
            items: dashboard_items(7),
            page_size: 50,
        });
        assert!(collection.is_fully_loaded);
        assert_eq!(next_fetch(Some(&collection), false), None);
        assert_eq!(collection.items.len(), 60);
    }

    #[test]
    fn test_append_preserves_fetch_order() {
        let mut collection = BrowseCollection::from_page(PageBatch {
            kind: FetchKind::Folder,
            page: 1,
            items: folder_items(2),
            page_size: 50,
        });
        collection.append_page(PageBatch {
            kind: FetchKind::Dashboard,
            page: 1,
            items: dashboard_items(2),
            page_size: 50,
        });
        let uids: Vec<&str> = collection.items.iter().map(|i| i.uid_str()).collect();
        assert_eq!(uids, vec!["f0", "f1", "d0", "d1"]);
    }

    #[test]
    fn test_empty_dashboard_page_marks_fully_loaded() {
        let mut collection = BrowseCollection::from_page(PageBatch {
            kind: FetchKind::Folder,
            page: 1,
            items: Vec::new(),
            page_size: 50,
        });
        collection.append_page(PageBatch {
            kind: FetchKind::Dashboard,
            page: 1,
            items: Vec::new(),
            page_size: 50,
        });
        assert!(collection.is_fully_loaded);
        assert!(collection.items.is_empty());
    }
}
