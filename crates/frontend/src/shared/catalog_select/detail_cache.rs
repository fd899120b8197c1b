//! Detail cache: one resolved item per `(entity, id)`, independent of which
//! list page (if any) it came from.
//!
//! Entries are replaced wholesale, never mutated in place. A successful
//! resolution stays valid until explicitly invalidated; the catalogs are
//! append-mostly and rarely change under an open selector.

use contracts::catalog::CatalogItem;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailKey {
    pub entity: String,
    pub id: String,
}

impl DetailKey {
    pub fn new(entity: &str, id: &str) -> Self {
        Self {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// `Failed` is sticky until invalidation so a dead id cannot turn every
/// render into another fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailEntry {
    Pending,
    Ready(CatalogItem),
    Failed,
}

#[derive(Debug, Default)]
pub struct DetailStore {
    entries: HashMap<DetailKey, DetailEntry>,
}

impl DetailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DetailKey) -> Option<&DetailEntry> {
        self.entries.get(key)
    }

    /// Record that a standalone detail fetch is outstanding.
    pub fn mark_pending(&mut self, key: DetailKey) {
        self.entries.insert(key, DetailEntry::Pending);
    }

    /// Store a resolved item (list-page promotion or detail fetch).
    pub fn insert(&mut self, key: DetailKey, item: CatalogItem) {
        self.entries.insert(key, DetailEntry::Ready(item));
    }

    /// Resolution of a standalone detail fetch. Ignored unless the entry is
    /// still pending: an invalidation or promotion that happened while the
    /// request was in flight wins over the response.
    pub fn complete_fetch(&mut self, key: &DetailKey, result: Option<CatalogItem>) {
        if !matches!(self.entries.get(key), Some(DetailEntry::Pending)) {
            return;
        }
        let entry = match result {
            Some(item) => DetailEntry::Ready(item),
            None => DetailEntry::Failed,
        };
        self.entries.insert(key.clone(), entry);
    }

    /// Forget the entry so the next resolution issues a fresh fetch.
    pub fn invalidate(&mut self, key: &DetailKey) {
        self.entries.remove(key);
    }
}
