//! Fetch orchestration for the browse tree.
//!
//! Decides which page of which kind to request next for a parent
//! (folders first, then dashboards), issues the listing calls, and merges
//! results back into the store. Destructive operations (delete/move) go
//! through here too, followed by a best-effort refresh of the affected
//! parents.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::try_join_all;
use tracing::{debug, info};

use dashhub_core::AppResult;
use dashhub_core::config::browse::BrowseConfig;
use dashhub_core::traits::{ItemMutationClient, ListingClient};
use dashhub_core::types::collection::{BrowseCollection, FetchKind, PageBatch, next_fetch};
use dashhub_core::types::item::{Item, ItemKind};
use dashhub_core::types::pagination::PageQuery;
use dashhub_core::types::uid::{DashboardUid, FolderUid};

use crate::selection;
use crate::state::BrowseState;
use crate::store::BrowseStore;

/// What a `fetch_next_page` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page (or a folder page plus the cascaded first dashboard page)
    /// was fetched and merged.
    Fetched,
    /// The parent is already fully loaded (or only excluded kinds remain).
    NothingToFetch,
    /// Another fetch for this parent is still outstanding; no call made.
    AlreadyInFlight,
}

/// Key for the in-flight guard table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GuardKey {
    /// One guard shared by every parent.
    Global,
    /// One guard per parent (`None` = root).
    Parent(Option<FolderUid>),
}

/// Orchestrates page fetches and destructive mutations for the browse tree.
///
/// Dependencies are injected at construction time via `Arc` references.
#[derive(Debug)]
pub struct BrowseService {
    /// The browse store all merges go through.
    store: Arc<BrowseStore>,
    /// Backend listing client.
    listing: Arc<dyn ListingClient>,
    /// Backend mutation client.
    mutations: Arc<dyn ItemMutationClient>,
    /// Browse settings (page size, guard scoping).
    config: BrowseConfig,
    /// Outstanding fetch guards.
    in_flight: DashMap<GuardKey, ()>,
}

impl BrowseService {
    /// Create a new browse service.
    pub fn new(
        store: Arc<BrowseStore>,
        listing: Arc<dyn ListingClient>,
        mutations: Arc<dyn ItemMutationClient>,
        config: BrowseConfig,
    ) -> Self {
        Self {
            store,
            listing,
            mutations,
            config,
            in_flight: DashMap::new(),
        }
    }

    /// The store this service merges into.
    pub fn store(&self) -> &Arc<BrowseStore> {
        &self.store
    }

    /// The configured page size.
    pub fn page_size(&self) -> u64 {
        self.config.page_size
    }

    /// Fetch the next page of children for a parent (`None` = root).
    ///
    /// Folders are paged to completion before the first dashboard page.
    /// A short folder page cascades into dashboard page 1 within the same
    /// call, so a folder containing only dashboards surfaces them without
    /// a second round trip. When the last fetched page for the parent was
    /// a full folder page the next folder page is requested instead; when
    /// everything (modulo `exclude_kinds`) is loaded this is a no-op.
    ///
    /// While a fetch for the same parent is outstanding, further calls
    /// resolve to [`FetchOutcome::AlreadyInFlight`] without touching the
    /// network. On listing failure no state is mutated and the guard is
    /// released so the caller can retry.
    pub async fn fetch_next_page(
        &self,
        parent: Option<&FolderUid>,
        exclude_kinds: &[ItemKind],
    ) -> AppResult<FetchOutcome> {
        let Some(_guard) = self.try_acquire(parent) else {
            debug!(parent = parent.map(FolderUid::as_str), "fetch already in flight");
            return Ok(FetchOutcome::AlreadyInFlight);
        };

        let exclude_dashboards = exclude_kinds.contains(&ItemKind::Dashboard);
        let planned = self
            .store
            .read(|state| next_fetch(state.collection_for(parent), exclude_dashboards))
            .await;
        let Some((kind, page)) = planned else {
            return Ok(FetchOutcome::NothingToFetch);
        };
        debug!(
            parent = parent.map(FolderUid::as_str),
            ?kind,
            page,
            "fetching next page"
        );

        let batches = self.fetch_cascade(parent, kind, page, exclude_dashboards).await?;
        self.store
            .modify(|state| merge_batches(state, parent, batches))
            .await;
        Ok(FetchOutcome::Fetched)
    }

    /// Discard the collection for a parent and reload it from folder
    /// page 1, with the same folder-then-dashboard cascade as
    /// [`Self::fetch_next_page`]. Used after destructive operations to
    /// resynchronize a subtree whose membership changed.
    pub async fn refetch_children(&self, parent: Option<&FolderUid>) -> AppResult<()> {
        info!(parent = parent.map(FolderUid::as_str), "refetching children");
        let batches = self.fetch_cascade(parent, FetchKind::Folder, 1, false).await?;
        self.store
            .modify(|state| {
                let mut collection: Option<BrowseCollection> = None;
                let parent_selected = parent
                    .map(|uid| state.selection.is_folder_selected(uid))
                    .unwrap_or(false);
                for batch in batches {
                    if parent_selected {
                        selection::select_appended(&mut state.selection, &batch.items);
                    }
                    match &mut collection {
                        None => collection = Some(BrowseCollection::from_page(batch)),
                        Some(c) => c.append_page(batch),
                    }
                }
                if let Some(collection) = collection {
                    state.replace_collection(parent, collection);
                }
                selection::recompute_select_all(state);
            })
            .await;
        Ok(())
    }

    /// Refresh the parents of a set of items that were just deleted or
    /// moved. Each uid is resolved against the loaded collections; uids
    /// whose parent cannot be found are silently skipped (best-effort
    /// cache invalidation). One refetch per distinct parent, concurrent
    /// and order-insensitive.
    pub async fn refresh_parents(&self, uids: &[String]) -> AppResult<()> {
        let parents: HashSet<Option<FolderUid>> = self
            .store
            .read(|state| {
                uids.iter()
                    .filter_map(|uid| {
                        let found = state.find_parent_of(uid);
                        if found.is_none() {
                            debug!(uid, "no loaded parent for item, skipping refresh");
                        }
                        found
                    })
                    .collect()
            })
            .await;

        try_join_all(
            parents
                .iter()
                .map(|parent| self.refetch_children(parent.as_ref())),
        )
        .await?;
        Ok(())
    }

    /// Delete a folder, then refresh its parent.
    pub async fn delete_folder(&self, uid: &FolderUid) -> AppResult<()> {
        info!(%uid, "deleting folder");
        self.mutations.delete_folder(uid).await?;
        self.refresh_parents(std::slice::from_ref(&uid.0)).await
    }

    /// Delete a dashboard, then refresh its parent.
    pub async fn delete_dashboard(&self, uid: &DashboardUid) -> AppResult<()> {
        info!(%uid, "deleting dashboard");
        self.mutations.delete_dashboard(uid).await?;
        self.refresh_parents(std::slice::from_ref(&uid.0)).await
    }

    /// Move a folder under a new parent (`None` = root), then refresh the
    /// source parent. The destination resynchronizes on its next browse.
    pub async fn move_folder(&self, uid: &FolderUid, dest: Option<&FolderUid>) -> AppResult<()> {
        info!(%uid, dest = dest.map(FolderUid::as_str), "moving folder");
        self.mutations.move_folder(uid, dest).await?;
        self.refresh_parents(std::slice::from_ref(&uid.0)).await
    }

    /// Move a dashboard under a new parent (`None` = root), then refresh
    /// the source parent.
    pub async fn move_dashboard(
        &self,
        uid: &DashboardUid,
        dest: Option<&FolderUid>,
    ) -> AppResult<()> {
        info!(%uid, dest = dest.map(FolderUid::as_str), "moving dashboard");
        self.mutations.move_dashboard(uid, dest).await?;
        self.refresh_parents(std::slice::from_ref(&uid.0)).await
    }

    /// Fetch the requested page and, for a short folder page with
    /// dashboards not excluded, the first dashboard page as well.
    async fn fetch_cascade(
        &self,
        parent: Option<&FolderUid>,
        kind: FetchKind,
        page: u64,
        exclude_dashboards: bool,
    ) -> AppResult<Vec<PageBatch>> {
        let page_size = self.config.page_size;
        let query = PageQuery::new(page, page_size);
        let mut batches = Vec::with_capacity(2);

        match kind {
            FetchKind::Folder => {
                let folders = self.listing.list_folders(parent, &query).await?;
                let folders_exhausted = !query.is_full_page(folders.len());
                batches.push(PageBatch {
                    kind: FetchKind::Folder,
                    page,
                    items: folders.into_iter().map(Item::from).collect(),
                    page_size,
                });

                if folders_exhausted && !exclude_dashboards {
                    let first = PageQuery::first(page_size);
                    let dashboards = self.listing.list_dashboards(parent, &first).await?;
                    batches.push(PageBatch {
                        kind: FetchKind::Dashboard,
                        page: 1,
                        items: dashboards.into_iter().map(Item::from).collect(),
                        page_size,
                    });
                }
            }
            FetchKind::Dashboard => {
                let dashboards = self.listing.list_dashboards(parent, &query).await?;
                batches.push(PageBatch {
                    kind: FetchKind::Dashboard,
                    page,
                    items: dashboards.into_iter().map(Item::from).collect(),
                    page_size,
                });
            }
        }

        Ok(batches)
    }

    /// Mark a fetch for `parent` as outstanding. Returns `None` when one
    /// already is. The guard is released on drop, error paths included.
    fn try_acquire(&self, parent: Option<&FolderUid>) -> Option<InFlightGuard<'_>> {
        let key = if self.config.per_parent_fetch_guard {
            GuardKey::Parent(parent.cloned())
        } else {
            GuardKey::Global
        };
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(vacant) => {
                vacant.insert(());
                Some(InFlightGuard {
                    guards: &self.in_flight,
                    key,
                })
            }
        }
    }
}

/// Append fetched batches to the parent's collection, propagating the
/// parent's selection onto the newly loaded children.
fn merge_batches(state: &mut BrowseState, parent: Option<&FolderUid>, batches: Vec<PageBatch>) {
    let parent_selected = parent
        .map(|uid| state.selection.is_folder_selected(uid))
        .unwrap_or(false);
    for batch in batches {
        if parent_selected {
            selection::select_appended(&mut state.selection, &batch.items);
        }
        state.merge_page(parent, batch);
    }
    selection::recompute_select_all(state);
}

/// RAII release for an in-flight guard entry.
struct InFlightGuard<'a> {
    guards: &'a DashMap<GuardKey, ()>,
    key: GuardKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.guards.remove(&self.key);
    }
}
