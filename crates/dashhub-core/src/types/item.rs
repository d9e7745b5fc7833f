//! Browse-tree item model.
//!
//! An [`Item`] is one row's worth of data in the folder/dashboard browser:
//! either a real entity returned by the backend (`folder`, `dashboard`) or
//! a synthetic `ui` row minted by the flat-tree projector. Synthetic rows
//! are never persisted and never sent to the backend.

use serde::{Deserialize, Serialize};

use super::uid::{DashboardUid, FolderUid};

/// The selectable item kinds.
///
/// `Panel` never appears in a browse collection; it exists because the
/// selection model tracks panel checkboxes from search results alongside
/// folders and dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A folder.
    Folder,
    /// A dashboard.
    Dashboard,
    /// A panel inside a dashboard.
    Panel,
}

/// A folder as returned by the backend listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderItem {
    /// Backend-assigned unique identifier.
    pub uid: FolderUid,
    /// Display title.
    pub title: String,
    /// Parent folder UID, `None` for root-level folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_uid: Option<FolderUid>,
    /// Parent folder title (convenience field from the search response).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
}

/// A dashboard as returned by the search-backed listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardItem {
    /// Backend-assigned unique identifier.
    pub uid: DashboardUid,
    /// Display title.
    pub title: String,
    /// Parent folder UID, `None` for root-level dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_uid: Option<FolderUid>,
    /// Tags attached to the dashboard.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Synthetic rows produced by the flat-tree projector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ui_kind", rename_all = "kebab-case")]
pub enum UiItem {
    /// Stand-in row for a page of children that has not been fetched yet.
    /// Scrolling it into view triggers the next page fetch.
    PaginationPlaceholder {
        /// Deterministic synthetic uid, derived from the parent and index
        /// so the virtualized list can key rows stably across renders.
        uid: String,
        /// Parent whose next page this row represents (`None` = root).
        parent: Option<FolderUid>,
    },
    /// Marker row shown when an expanded folder has zero children.
    EmptyFolder {
        /// Deterministic synthetic uid derived from the parent.
        uid: String,
        /// The empty folder.
        parent: FolderUid,
    },
}

impl UiItem {
    /// The synthetic uid for this row.
    pub fn uid(&self) -> &str {
        match self {
            Self::PaginationPlaceholder { uid, .. } => uid,
            Self::EmptyFolder { uid, .. } => uid,
        }
    }
}

/// A browse-tree item: a real entity or a synthetic UI row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    /// A folder.
    Folder(FolderItem),
    /// A dashboard.
    Dashboard(DashboardItem),
    /// A synthetic row. Never persisted.
    Ui(UiItem),
}

impl Item {
    /// The item's uid as a plain string.
    ///
    /// Real items return their backend-assigned uid; synthetic rows return
    /// their deterministic derived uid.
    pub fn uid_str(&self) -> &str {
        match self {
            Self::Folder(f) => f.uid.as_str(),
            Self::Dashboard(d) => d.uid.as_str(),
            Self::Ui(u) => u.uid(),
        }
    }

    /// Display title, empty for synthetic rows.
    pub fn title(&self) -> &str {
        match self {
            Self::Folder(f) => &f.title,
            Self::Dashboard(d) => &d.title,
            Self::Ui(_) => "",
        }
    }

    /// The selectable kind, `None` for synthetic rows.
    pub fn kind(&self) -> Option<ItemKind> {
        match self {
            Self::Folder(_) => Some(ItemKind::Folder),
            Self::Dashboard(_) => Some(ItemKind::Dashboard),
            Self::Ui(_) => None,
        }
    }

    /// Parent folder UID as carried on the item itself.
    pub fn parent_uid(&self) -> Option<&FolderUid> {
        match self {
            Self::Folder(f) => f.parent_uid.as_ref(),
            Self::Dashboard(d) => d.parent_uid.as_ref(),
            Self::Ui(UiItem::PaginationPlaceholder { parent, .. }) => parent.as_ref(),
            Self::Ui(UiItem::EmptyFolder { parent, .. }) => Some(parent),
        }
    }

    /// Whether this is a real (persisted) item rather than a synthetic row.
    pub fn is_real(&self) -> bool {
        !matches!(self, Self::Ui(_))
    }
}

impl From<FolderItem> for Item {
    fn from(item: FolderItem) -> Self {
        Self::Folder(item)
    }
}

impl From<DashboardItem> for Item {
    fn from(item: DashboardItem) -> Self {
        Self::Dashboard(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(uid: &str) -> FolderItem {
        FolderItem {
            uid: FolderUid::from(uid),
            title: uid.to_uppercase(),
            parent_uid: None,
            parent_title: None,
        }
    }

    #[test]
    fn test_kind_discriminant() {
        let f = Item::from(folder("fx"));
        assert_eq!(f.kind(), Some(ItemKind::Folder));
        assert!(f.is_real());

        let ui = Item::Ui(UiItem::EmptyFolder {
            uid: "empty-folder-fx".to_string(),
            parent: FolderUid::from("fx"),
        });
        assert_eq!(ui.kind(), None);
        assert!(!ui.is_real());
    }

    #[test]
    fn test_serde_tagging() {
        let item = Item::Dashboard(DashboardItem {
            uid: DashboardUid::from("db1"),
            title: "Latency".to_string(),
            parent_uid: Some(FolderUid::from("ops")),
            tags: vec!["prod".to_string()],
        });
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["kind"], "dashboard");
        assert_eq!(json["uid"], "db1");
        assert_eq!(json["parent_uid"], "ops");

        let back: Item = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, item);
    }

    #[test]
    fn test_ui_serde_tagging() {
        let item = Item::Ui(UiItem::PaginationPlaceholder {
            uid: "root-pagination-0".to_string(),
            parent: None,
        });
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["kind"], "ui");
        assert_eq!(json["ui_kind"], "pagination-placeholder");
    }
}
