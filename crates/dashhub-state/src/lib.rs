//! # dashhub-state
//!
//! The browse-tree state engine for DashHub. Maintains the partially
//! loaded, paginated tree of folders and dashboards fetched incrementally
//! from the backend listing endpoints, keeps checkbox selection consistent
//! across parent/child relationships, projects the sparse tree into a flat
//! list for virtualized rendering, and orchestrates page fetches with a
//! folders-first policy and per-parent in-flight de-duplication.
//!
//! All tree mutations funnel through [`BrowseStore`], so every reducer is
//! atomic with respect to the store. The orchestration layer in
//! [`BrowseService`] talks to the backend through the client traits from
//! `dashhub-core` and merges results back in.

pub mod flat_tree;
pub mod selection;
pub mod service;
pub mod state;
pub mod store;

pub use flat_tree::{FlatTreeFilter, FlatTreeRow, build_flat_tree};
pub use selection::SelectionState;
pub use service::{BrowseService, FetchOutcome};
pub use state::BrowseState;
pub use store::BrowseStore;
