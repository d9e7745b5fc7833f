//! Core type definitions used across the DashHub workspace.

pub mod collection;
pub mod item;
pub mod pagination;
pub mod uid;

pub use collection::{BrowseCollection, FetchKind, PageBatch};
pub use item::{DashboardItem, FolderItem, Item, ItemKind, UiItem};
pub use pagination::PageQuery;
pub use uid::{DashboardUid, FolderUid, PanelUid};
