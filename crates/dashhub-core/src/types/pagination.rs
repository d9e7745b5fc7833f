//! Pagination types for the backend listing endpoints.

use serde::{Deserialize, Serialize};

/// Default page size for browse listings.
pub const DEFAULT_PAGE_SIZE: u64 = 50;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 999;

/// Request parameters for one page of a listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageQuery {
    /// Create a new page query.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The query for the first page at the same page size.
    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size)
    }

    /// Whether a page of `returned` items was full, implying more pages
    /// of the same kind may exist.
    pub fn is_full_page(&self, returned: usize) -> bool {
        returned as u64 == self.page_size
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        let q = PageQuery::new(0, 0);
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 1);

        let q = PageQuery::new(3, 100_000);
        assert_eq!(q.page, 3);
        assert_eq!(q.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_full_page() {
        let q = PageQuery::new(1, 50);
        assert!(q.is_full_page(50));
        assert!(!q.is_full_page(49));
        assert!(!q.is_full_page(0));
    }
}
