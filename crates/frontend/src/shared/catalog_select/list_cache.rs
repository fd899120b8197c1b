//! Paged list cache.
//!
//! One entry per `(entity, token)` key holds the pages fetched so far, in
//! order, plus the in-flight flag that de-duplicates concurrent fetches for
//! the same key. Entries for old tokens are kept for cheap back-navigation,
//! bounded by an LRU cap per entity.

use contracts::catalog::CatalogItem;
use std::collections::HashMap;

/// Token entries kept per entity before the least recently used is evicted.
pub const MAX_TOKENS_PER_ENTITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub entity: String,
    pub token: String,
}

impl ListKey {
    pub fn new(entity: &str, token: &str) -> Self {
        Self {
            entity: entity.to_string(),
            token: token.to_string(),
        }
    }
}

/// One fetched page. Item order is server-defined and preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub page_number: usize,
    pub items: Vec<CatalogItem>,
    pub has_next: bool,
}

#[derive(Debug, Default)]
struct ListEntry {
    pages: Vec<CatalogPage>,
    is_fetching: bool,
    touched: u64,
}

impl ListEntry {
    fn next_page_number(&self) -> usize {
        self.pages.last().map(|p| p.page_number + 1).unwrap_or(1)
    }

    // Nothing fetched yet counts as "page 1 still outstanding".
    fn has_next(&self) -> bool {
        self.pages.last().map(|p| p.has_next).unwrap_or(true)
    }
}

#[derive(Debug, Default)]
pub struct ListStore {
    entries: HashMap<ListKey, ListEntry>,
    clock: u64,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure an entry exists for `key` and mark it most recently used for
    /// its entity. Evicts the least recently used other tokens beyond
    /// [`MAX_TOKENS_PER_ENTITY`]; entries with a fetch in flight stay.
    pub fn reset(&mut self, key: &ListKey) {
        self.clock += 1;
        let clock = self.clock;
        self.entries.entry(key.clone()).or_default().touched = clock;

        let count = self
            .entries
            .keys()
            .filter(|k| k.entity == key.entity)
            .count();
        if count <= MAX_TOKENS_PER_ENTITY {
            return;
        }
        let mut evictable: Vec<(ListKey, u64)> = self
            .entries
            .iter()
            .filter(|(k, e)| k.entity == key.entity && !e.is_fetching && **k != *key)
            .map(|(k, e)| (k.clone(), e.touched))
            .collect();
        evictable.sort_by_key(|(_, touched)| *touched);
        for (stale, _) in evictable.into_iter().take(count - MAX_TOKENS_PER_ENTITY) {
            self.entries.remove(&stale);
            log::debug!(
                "list cache: evicted entry {}/{:?}",
                stale.entity,
                stale.token
            );
        }
    }

    pub fn is_fetching(&self, key: &ListKey) -> bool {
        self.entries.get(key).map(|e| e.is_fetching).unwrap_or(false)
    }

    pub fn has_next(&self, key: &ListKey) -> bool {
        self.entries.get(key).map(|e| e.has_next()).unwrap_or(false)
    }

    /// All fetched items for the key, page order preserved.
    pub fn items(&self, key: &ListKey) -> Vec<CatalogItem> {
        self.entries
            .get(key)
            .map(|e| e.pages.iter().flat_map(|p| p.items.iter().cloned()).collect())
            .unwrap_or_default()
    }

    /// Claim the first page fetch, but only when nothing is cached yet for
    /// this key. Reopening a selector whose pages were retained renders the
    /// cached pages instead of refetching.
    pub fn begin_first_fetch(&mut self, key: &ListKey) -> Option<usize> {
        let entry = self.entries.get_mut(key)?;
        if entry.is_fetching || !entry.pages.is_empty() {
            return None;
        }
        entry.is_fetching = true;
        Some(1)
    }

    /// Claim the next page fetch for this key and return its page number.
    ///
    /// `None` when the entry does not exist, a fetch is already in flight,
    /// or the server reported no further pages. This is the guard that keeps
    /// rapid scroll events (or a second selector sharing the key) from
    /// issuing duplicate requests.
    pub fn begin_fetch(&mut self, key: &ListKey) -> Option<usize> {
        let entry = self.entries.get_mut(key)?;
        if entry.is_fetching || !entry.has_next() {
            return None;
        }
        entry.is_fetching = true;
        Some(entry.next_page_number())
    }

    /// Clear the in-flight flag without touching the pages (fetch failure or
    /// a response for a superseded token). The entry keeps its prior state,
    /// so the next qualifying user action retries the same page.
    pub fn abandon_fetch(&mut self, key: &ListKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.is_fetching = false;
        }
    }

    /// Append a fetched page. Pages must arrive contiguously; anything else
    /// (entry evicted mid-flight, out-of-order response) is dropped.
    pub fn complete_fetch(&mut self, key: &ListKey, page: CatalogPage) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        entry.is_fetching = false;
        if page.page_number != entry.next_page_number() {
            log::warn!(
                "list cache: dropped non-contiguous page {} for {}/{:?}",
                page.page_number,
                key.entity,
                key.token
            );
            return;
        }
        entry.pages.push(page);
    }

    /// Scan every loaded page of this entity, any token, for an id.
    pub fn find_item(&self, entity: &str, id: &str) -> Option<&CatalogItem> {
        self.entries
            .iter()
            .filter(|(k, _)| k.entity == entity)
            .flat_map(|(_, e)| e.pages.iter())
            .flat_map(|p| p.items.iter())
            .find(|item| item.id == id)
    }
}
