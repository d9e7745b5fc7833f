//! Browse-tree configuration.

use serde::{Deserialize, Serialize};

use crate::types::pagination::DEFAULT_PAGE_SIZE;

/// Settings for the folder/dashboard browse tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Number of children requested per page from the listing backend.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Scope the "load more" in-flight guard per parent folder.
    ///
    /// When `false`, a single guard is shared across all parents and only
    /// one outstanding page fetch is allowed in the whole tree.
    #[serde(default = "default_true")]
    pub per_parent_fetch_guard: bool,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            per_parent_fetch_guard: default_true(),
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}
