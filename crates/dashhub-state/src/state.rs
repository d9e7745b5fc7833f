//! The browse-tree state and its reducer-style mutations.
//!
//! [`BrowseState`] is an explicit, injectable value — no process-wide
//! singleton. Collections are created on first fetch for a parent,
//! appended to on "fetch next page", and replaced wholesale on refetch;
//! they are never destroyed in place, only superseded.

use std::collections::HashMap;

use dashhub_core::types::collection::{BrowseCollection, PageBatch};
use dashhub_core::types::item::{FolderItem, Item};
use dashhub_core::types::uid::FolderUid;

use crate::selection::SelectionState;

/// The full client-side state of the folder/dashboard browser.
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    /// Children of the root, `None` until first fetched.
    pub root_items: Option<BrowseCollection>,
    /// Children of each known folder, keyed by folder UID.
    pub children_by_parent: HashMap<FolderUid, BrowseCollection>,
    /// Expanded/collapsed state per folder.
    pub open_folders: HashMap<FolderUid, bool>,
    /// Checkbox selection state.
    pub selection: SelectionState,
}

impl BrowseState {
    /// Create an empty browse state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection for a parent (`None` = root), if fetched.
    pub fn collection_for(&self, parent: Option<&FolderUid>) -> Option<&BrowseCollection> {
        match parent {
            None => self.root_items.as_ref(),
            Some(uid) => self.children_by_parent.get(uid),
        }
    }

    /// Append a fetched page to the parent's collection, creating the
    /// collection if this was the first page.
    pub fn merge_page(&mut self, parent: Option<&FolderUid>, batch: PageBatch) {
        match parent {
            None => match &mut self.root_items {
                Some(existing) => existing.append_page(batch),
                slot @ None => *slot = Some(BrowseCollection::from_page(batch)),
            },
            Some(uid) => match self.children_by_parent.get_mut(uid) {
                Some(existing) => existing.append_page(batch),
                None => {
                    self.children_by_parent
                        .insert(uid.clone(), BrowseCollection::from_page(batch));
                }
            },
        }
    }

    /// Replace the parent's collection wholesale (refetch).
    pub fn replace_collection(&mut self, parent: Option<&FolderUid>, collection: BrowseCollection) {
        match parent {
            None => self.root_items = Some(collection),
            Some(uid) => {
                self.children_by_parent.insert(uid.clone(), collection);
            }
        }
    }

    /// Mark a folder expanded or collapsed.
    pub fn set_folder_open(&mut self, uid: &FolderUid, open: bool) {
        self.open_folders.insert(uid.clone(), open);
    }

    /// Whether a folder is currently expanded.
    pub fn is_folder_open(&self, uid: &FolderUid) -> bool {
        self.open_folders.get(uid).copied().unwrap_or(false)
    }

    /// Find a loaded folder item by UID, searching root items first and
    /// then every known child collection.
    pub fn find_folder(&self, uid: &FolderUid) -> Option<&FolderItem> {
        self.all_collections().find_map(|(_, collection)| {
            collection.items.iter().find_map(|item| match item {
                Item::Folder(f) if &f.uid == uid => Some(f),
                _ => None,
            })
        })
    }

    /// Resolve the parent under which a loaded item currently sits.
    ///
    /// Returns `None` when the item is not present in any loaded
    /// collection; `Some(None)` when it sits at the root; `Some(Some(uid))`
    /// when it sits under folder `uid`. Root items are searched first.
    pub fn find_parent_of(&self, uid_str: &str) -> Option<Option<FolderUid>> {
        self.all_collections().find_map(|(parent, collection)| {
            collection
                .items
                .iter()
                .any(|item| item.is_real() && item.uid_str() == uid_str)
                .then(|| parent.cloned())
        })
    }

    /// Reset the per-session browsing UI state: expanded folders and
    /// selection. Called when navigating to a different folder root.
    /// Loaded collections are kept.
    pub fn reset_browse_ui(&mut self) {
        self.open_folders.clear();
        self.selection.clear();
    }

    /// Reset everything, collections included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iterate over all loaded collections with their parent key, root
    /// collection first.
    fn all_collections(
        &self,
    ) -> impl Iterator<Item = (Option<&FolderUid>, &BrowseCollection)> + '_ {
        self.root_items
            .iter()
            .map(|c| (None, c))
            .chain(self.children_by_parent.iter().map(|(uid, c)| (Some(uid), c)))
    }
}
