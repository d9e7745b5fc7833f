//! Checkbox selection reconciliation across parent/child relationships.
//!
//! Selecting a folder marks every currently loaded descendant; descendants
//! that have not been fetched yet inherit selection when their page lands
//! (see the propagate-on-load hook in the fetch orchestration). Deselecting
//! any item forces every ancestor folder unselected, since a folder cannot
//! be "fully selected" once part of it is not. The `all` flag is derived
//! from the root collection after every mutation, never an independent
//! source of truth.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use dashhub_core::types::collection::BrowseCollection;
use dashhub_core::types::item::{Item, ItemKind};
use dashhub_core::types::uid::{DashboardUid, FolderUid, PanelUid};

use crate::state::BrowseState;

/// Per-kind checkbox state plus the derived select-all flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selected folders.
    pub folders: HashMap<FolderUid, bool>,
    /// Selected dashboards.
    pub dashboards: HashMap<DashboardUid, bool>,
    /// Selected panels (populated from search results, never from the tree).
    pub panels: HashMap<PanelUid, bool>,
    /// True iff every root-level item is individually selected. Derived.
    pub all: bool,
}

impl SelectionState {
    /// Whether a folder is selected.
    pub fn is_folder_selected(&self, uid: &FolderUid) -> bool {
        self.folders.get(uid).copied().unwrap_or(false)
    }

    /// Whether a dashboard is selected.
    pub fn is_dashboard_selected(&self, uid: &DashboardUid) -> bool {
        self.dashboards.get(uid).copied().unwrap_or(false)
    }

    /// Whether an item is selected. Synthetic rows are never selected.
    pub fn is_item_selected(&self, item: &Item) -> bool {
        match item {
            Item::Folder(f) => self.is_folder_selected(&f.uid),
            Item::Dashboard(d) => self.is_dashboard_selected(&d.uid),
            Item::Ui(_) => false,
        }
    }

    /// UIDs of the currently selected folders.
    pub fn selected_folder_uids(&self) -> impl Iterator<Item = &FolderUid> + '_ {
        self.folders
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(uid, _)| uid)
    }

    /// UIDs of the currently selected dashboards.
    pub fn selected_dashboard_uids(&self) -> impl Iterator<Item = &DashboardUid> + '_ {
        self.dashboards
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(uid, _)| uid)
    }

    /// Whether anything at all is selected.
    pub fn has_selection(&self) -> bool {
        self.folders.values().any(|s| *s)
            || self.dashboards.values().any(|s| *s)
            || self.panels.values().any(|s| *s)
    }

    /// Clear every entry and the select-all flag.
    pub fn clear(&mut self) {
        self.folders.clear();
        self.dashboards.clear();
        self.panels.clear();
        self.all = false;
    }

    fn mark_item(&mut self, item: &Item, selected: bool) {
        match item {
            Item::Folder(f) => {
                self.folders.insert(f.uid.clone(), selected);
            }
            Item::Dashboard(d) => {
                self.dashboards.insert(d.uid.clone(), selected);
            }
            Item::Ui(_) => {}
        }
    }

    fn mark_kind(&mut self, kind: ItemKind, uid_str: &str, selected: bool) {
        match kind {
            ItemKind::Folder => {
                self.folders.insert(FolderUid::from(uid_str), selected);
            }
            ItemKind::Dashboard => {
                self.dashboards.insert(DashboardUid::from(uid_str), selected);
            }
            ItemKind::Panel => {
                self.panels.insert(PanelUid::from(uid_str), selected);
            }
        }
    }
}

/// Set selection for one item and reconcile the rest of the tree.
///
/// The target and every currently loaded descendant get the new value,
/// depth-first. On deselect, every ancestor folder is forced unselected as
/// well. On select, ancestors are left alone; whole-tree consistency comes
/// from the derived `all` flag instead. Synthetic rows are ignored.
pub fn set_item_selection(state: &mut BrowseState, item: &Item, selected: bool) {
    let Some(kind) = item.kind() else {
        debug!(uid = item.uid_str(), "ignoring selection of synthetic row");
        return;
    };

    state.selection.mark_kind(kind, item.uid_str(), selected);
    if let Item::Folder(f) = item {
        let root = f.uid.clone();
        mark_loaded_subtree(
            &state.children_by_parent,
            &mut state.selection,
            &root,
            selected,
        );
    }

    if !selected {
        // A folder cannot stay fully selected once part of it is not.
        for ancestor in ancestor_chain(state, item.parent_uid()) {
            state.selection.folders.insert(ancestor, false);
        }
    }

    recompute_select_all(state);
}

/// Select or deselect everything.
///
/// Selecting marks every loaded descendant of `focus` (the whole root
/// collection when `None`), following currently loaded collections only —
/// no fetches are triggered. Deselecting clears every entry across all
/// three kinds unconditionally.
pub fn set_all_selection(state: &mut BrowseState, selected: bool, focus: Option<&FolderUid>) {
    if !selected {
        state.selection.clear();
        return;
    }

    match focus {
        None => {
            let items: Vec<Item> = state
                .root_items
                .as_ref()
                .map(|c| c.items.clone())
                .unwrap_or_default();
            for item in &items {
                state.selection.mark_item(item, true);
                if let Item::Folder(f) = item {
                    let root = f.uid.clone();
                    mark_loaded_subtree(
                        &state.children_by_parent,
                        &mut state.selection,
                        &root,
                        true,
                    );
                }
            }
        }
        Some(uid) => {
            let root = uid.clone();
            mark_loaded_subtree(&state.children_by_parent, &mut state.selection, &root, true);
        }
    }

    recompute_select_all(state);
}

/// Recompute the derived select-all flag.
///
/// True iff the root collection exists and every real item in it is
/// individually selected; defensively false when data is missing.
pub fn recompute_select_all(state: &mut BrowseState) {
    let all = match &state.root_items {
        None => false,
        Some(collection) => collection
            .items
            .iter()
            .filter(|item| item.is_real())
            .all(|item| state.selection.is_item_selected(item)),
    };
    state.selection.all = all;
}

/// Propagate-on-load hook: mark freshly appended children selected because
/// their parent folder is. Must stay coupled to the page-merge path so a
/// folder selected before its children were paged in still covers them.
pub fn select_appended(selection: &mut SelectionState, items: &[Item]) {
    for item in items {
        selection.mark_item(item, true);
    }
}

/// Depth-first walk of the loaded collections under `root`, marking every
/// real item. Children not yet loaded are simply not touched.
fn mark_loaded_subtree(
    children_by_parent: &HashMap<FolderUid, BrowseCollection>,
    selection: &mut SelectionState,
    root: &FolderUid,
    selected: bool,
) {
    let mut stack = vec![root.clone()];
    while let Some(folder_uid) = stack.pop() {
        let Some(collection) = children_by_parent.get(&folder_uid) else {
            continue;
        };
        for item in &collection.items {
            selection.mark_item(item, selected);
            if let Item::Folder(f) = item {
                stack.push(f.uid.clone());
            }
        }
    }
}

/// Collect the chain of ancestor folder UIDs, walking `parent_uid` links
/// through the loaded folders up to the root.
fn ancestor_chain(state: &BrowseState, start: Option<&FolderUid>) -> Vec<FolderUid> {
    let mut chain = Vec::new();
    let mut current = start.cloned();
    while let Some(uid) = current {
        current = state
            .find_folder(&uid)
            .and_then(|f| f.parent_uid.clone());
        chain.push(uid);
    }
    chain
}
