//! Flat-tree projection for virtualized rendering.
//!
//! Converts the sparse, per-parent collections plus the open-folders set
//! into a single ordered list of level-annotated rows. Synthetic rows are
//! inserted for not-yet-loaded pages (`pagination-placeholder`, which the
//! UI uses to trigger "load more" when scrolled into view) and for
//! expanded folders with zero children (`empty-folder`). The projection is
//! fully recomputed on each call; within one collection, row order is
//! strictly fetch order.

use serde::{Deserialize, Serialize};

use dashhub_core::types::item::{Item, ItemKind, UiItem};
use dashhub_core::types::uid::FolderUid;

use crate::state::BrowseState;

/// Sentinel used in synthetic uids for the root level.
const ROOT_SENTINEL: &str = "root";

/// One row of the linearized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTreeRow {
    /// The item rendered on this row.
    pub item: Item,
    /// The parent under which the row sits (`None` = root).
    pub parent: Option<FolderUid>,
    /// Nesting depth, 0 for direct children of the focus parent.
    pub level: u64,
    /// Whether the row's folder is expanded. Always false for non-folders.
    pub is_open: bool,
}

/// Rows and kinds to leave out of the projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTreeFilter {
    /// Item kinds to skip entirely (descendants included).
    pub exclude_kinds: Vec<ItemKind>,
    /// Specific UIDs to skip entirely, e.g. the folder being moved so it
    /// cannot be picked as its own destination.
    pub exclude_uids: Vec<String>,
    /// Suppress the synthetic empty-folder marker rows.
    pub exclude_empty_folders: bool,
}

impl FlatTreeFilter {
    fn skips(&self, item: &Item) -> bool {
        if let Some(kind) = item.kind()
            && self.exclude_kinds.contains(&kind)
        {
            return true;
        }
        self.exclude_uids.iter().any(|uid| uid == item.uid_str())
    }
}

/// Project the browse state into an ordered, level-annotated row list.
///
/// `focus` selects the subtree to project (`None` = root). Collapsed
/// folders hide their descendants; collections that are absent or not yet
/// fully loaded are padded with exactly `page_size` pagination placeholders
/// so the virtualization layer has stable rows to key and scroll into.
pub fn build_flat_tree(
    state: &BrowseState,
    focus: Option<&FolderUid>,
    page_size: u64,
    filter: &FlatTreeFilter,
) -> Vec<FlatTreeRow> {
    let exclude_dashboards = filter.exclude_kinds.contains(&ItemKind::Dashboard);
    let mut rows = Vec::new();
    walk(state, focus, 0, page_size, filter, exclude_dashboards, &mut rows);
    rows
}

#[allow(clippy::too_many_arguments)]
fn walk(
    state: &BrowseState,
    focus: Option<&FolderUid>,
    level: u64,
    page_size: u64,
    filter: &FlatTreeFilter,
    exclude_dashboards: bool,
    rows: &mut Vec<FlatTreeRow>,
) {
    // Collapsed folders hide their descendants. The focus parent itself
    // (level 0) always contributes, open or not.
    if let Some(uid) = focus
        && level != 0
        && !state.is_folder_open(uid)
    {
        return;
    }

    let collection = state.collection_for(focus);

    if let Some(collection) = collection {
        for item in &collection.items {
            if filter.skips(item) {
                continue;
            }

            let is_open = match item {
                Item::Folder(f) => state.is_folder_open(&f.uid),
                _ => false,
            };
            rows.push(FlatTreeRow {
                item: item.clone(),
                parent: focus.cloned(),
                level,
                is_open,
            });

            if let Item::Folder(f) = item {
                walk(
                    state,
                    Some(&f.uid),
                    level + 1,
                    page_size,
                    filter,
                    exclude_dashboards,
                    rows,
                );

                // An expanded folder whose children are loaded and empty
                // shows a "no items" marker instead of nothing.
                if is_open
                    && !filter.exclude_empty_folders
                    && let Some(children) = state.children_by_parent.get(&f.uid)
                    && children.is_loaded_treating_excluded(exclude_dashboards)
                    && children.items.is_empty()
                {
                    rows.push(FlatTreeRow {
                        item: Item::Ui(UiItem::EmptyFolder {
                            uid: format!("empty-folder-{}", f.uid),
                            parent: f.uid.clone(),
                        }),
                        parent: Some(f.uid.clone()),
                        level: level + 1,
                        is_open: false,
                    });
                }
            }
        }
    }

    let needs_placeholders = match collection {
        None => true,
        Some(c) => !c.is_loaded_treating_excluded(exclude_dashboards),
    };
    if needs_placeholders {
        let parent_key = focus.map_or(ROOT_SENTINEL, FolderUid::as_str);
        for index in 0..page_size {
            rows.push(FlatTreeRow {
                item: Item::Ui(UiItem::PaginationPlaceholder {
                    uid: format!("{parent_key}-pagination-{index}"),
                    parent: focus.cloned(),
                }),
                parent: focus.cloned(),
                level: level + 1,
                is_open: false,
            });
        }
    }
}
