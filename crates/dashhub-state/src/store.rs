//! The process-wide browse store.
//!
//! Wraps [`BrowseState`] in an async `RwLock` so that every reducer runs
//! atomically with respect to the store. Readers get cloned snapshots and
//! must treat them as immutable; the only way to change the tree is
//! through the methods here (or through [`crate::BrowseService`], which
//! funnels its merges through `modify`).

use tokio::sync::RwLock;

use dashhub_core::types::item::Item;
use dashhub_core::types::uid::FolderUid;

use crate::flat_tree::{FlatTreeFilter, FlatTreeRow, build_flat_tree};
use crate::selection;
use crate::state::BrowseState;

/// Owner of the browse-tree state.
#[derive(Debug, Default)]
pub struct BrowseStore {
    state: RwLock<BrowseState>,
}

impl BrowseStore {
    /// Create a store with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cloned snapshot of the current state.
    pub async fn snapshot(&self) -> BrowseState {
        self.state.read().await.clone()
    }

    /// Run a closure against the current state under the read lock.
    pub async fn read<T>(&self, f: impl FnOnce(&BrowseState) -> T) -> T {
        f(&*self.state.read().await)
    }

    /// Run a reducer against the state under the write lock.
    pub async fn modify<T>(&self, f: impl FnOnce(&mut BrowseState) -> T) -> T {
        f(&mut *self.state.write().await)
    }

    /// Expand or collapse a folder.
    pub async fn set_folder_open(&self, uid: &FolderUid, open: bool) {
        self.modify(|state| state.set_folder_open(uid, open)).await;
    }

    /// Set selection for one item and reconcile ancestors/descendants.
    pub async fn set_item_selection(&self, item: &Item, selected: bool) {
        self.modify(|state| selection::set_item_selection(state, item, selected))
            .await;
    }

    /// Select or deselect everything under `focus` (`None` = root).
    pub async fn set_all_selection(&self, selected: bool, focus: Option<&FolderUid>) {
        self.modify(|state| selection::set_all_selection(state, selected, focus))
            .await;
    }

    /// Project the current state into flat rows for rendering.
    pub async fn flat_tree(
        &self,
        focus: Option<&FolderUid>,
        page_size: u64,
        filter: &FlatTreeFilter,
    ) -> Vec<FlatTreeRow> {
        self.read(|state| build_flat_tree(state, focus, page_size, filter))
            .await
    }

    /// Reset expanded folders and selection, keeping loaded collections.
    /// Called when navigating to a different folder root.
    pub async fn reset_browse_ui(&self) {
        self.modify(BrowseState::reset_browse_ui).await;
    }

    /// Reset the entire state.
    pub async fn reset(&self) {
        self.modify(BrowseState::reset).await;
    }
}
