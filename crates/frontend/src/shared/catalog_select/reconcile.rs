//! Keeps the two caches consistent.
//!
//! Label resolution checks loaded list pages before the detail cache and
//! promotes list hits into it, so an id that is already on screen never
//! costs a detail round trip. Selection commits follow the same rule in the
//! other direction: the picked item is written to the detail cache before
//! the change callback runs, so a parent that re-renders synchronously sees
//! the label without a fetch.

use super::detail_cache::{DetailEntry, DetailKey, DetailStore};
use super::list_cache::ListStore;
use contracts::catalog::CatalogItem;

/// Outcome of a label resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelResolution {
    /// No id set; show the placeholder.
    Empty,
    Ready(String),
    /// A detail fetch for this id is outstanding.
    Loading,
    /// Unknown id: a standalone detail fetch must be issued.
    FetchNeeded,
    /// A previous detail fetch failed; placeholder until invalidation.
    Failed,
}

/// Read-only resolution, safe to call from render closures.
pub fn peek_label(
    lists: &ListStore,
    details: &DetailStore,
    entity: &str,
    id: &str,
) -> LabelResolution {
    if id.is_empty() {
        return LabelResolution::Empty;
    }
    if let Some(item) = lists.find_item(entity, id) {
        return LabelResolution::Ready(item.label.clone());
    }
    match details.get(&DetailKey::new(entity, id)) {
        Some(DetailEntry::Ready(item)) => LabelResolution::Ready(item.label.clone()),
        Some(DetailEntry::Pending) => LabelResolution::Loading,
        Some(DetailEntry::Failed) => LabelResolution::Failed,
        None => LabelResolution::FetchNeeded,
    }
}

/// Full resolution: like [`peek_label`] but promotes list hits into the
/// detail cache and marks unknown ids pending, claiming the detail fetch
/// for the caller when `FetchNeeded` comes back.
pub fn resolve_label(
    lists: &ListStore,
    details: &mut DetailStore,
    entity: &str,
    id: &str,
) -> LabelResolution {
    if id.is_empty() {
        return LabelResolution::Empty;
    }
    // Loaded list pages win over whatever the detail cache holds: the two
    // must converge on the same label for a shared id.
    if let Some(item) = lists.find_item(entity, id) {
        let item = item.clone();
        let label = item.label.clone();
        details.insert(DetailKey::new(entity, id), item);
        return LabelResolution::Ready(label);
    }
    let key = DetailKey::new(entity, id);
    match details.get(&key) {
        Some(DetailEntry::Ready(item)) => LabelResolution::Ready(item.label.clone()),
        Some(DetailEntry::Pending) => LabelResolution::Loading,
        Some(DetailEntry::Failed) => LabelResolution::Failed,
        None => {
            details.mark_pending(key);
            LabelResolution::FetchNeeded
        }
    }
}

/// Write a just-picked item into the detail cache. The caller emits the new
/// value only after this returns.
pub fn commit_selection(details: &mut DetailStore, entity: &str, item: &CatalogItem) {
    details.insert(DetailKey::new(entity, &item.id), item.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::catalog_select::list_cache::{CatalogPage, ListKey};
    use serde_json::json;

    fn item(id: &str, label: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            label: label.to_string(),
            raw: json!({}),
        }
    }

    fn lists_with(entity: &str, token: &str, items: Vec<CatalogItem>) -> ListStore {
        let mut lists = ListStore::new();
        let key = ListKey::new(entity, token);
        lists.reset(&key);
        lists.begin_fetch(&key);
        lists.complete_fetch(
            &key,
            CatalogPage {
                page_number: 1,
                items,
                has_next: false,
            },
        );
        lists
    }

    #[test]
    fn test_empty_id_short_circuits() {
        let lists = ListStore::new();
        let mut details = DetailStore::new();
        assert_eq!(
            resolve_label(&lists, &mut details, "doctor", ""),
            LabelResolution::Empty
        );
        assert_eq!(details.get(&DetailKey::new("doctor", "")), None);
    }

    #[test]
    fn test_list_hit_promotes_into_detail_cache() {
        let lists = lists_with("doctor", "jak", vec![item("42", "dr. Siti")]);
        let mut details = DetailStore::new();

        let resolved = resolve_label(&lists, &mut details, "doctor", "42");
        assert_eq!(resolved, LabelResolution::Ready("dr. Siti".to_string()));

        // The promotion survives even once the list pages are gone.
        let empty = ListStore::new();
        assert_eq!(
            resolve_label(&empty, &mut details, "doctor", "42"),
            LabelResolution::Ready("dr. Siti".to_string())
        );
    }

    #[test]
    fn test_unknown_id_claims_one_fetch() {
        let lists = ListStore::new();
        let mut details = DetailStore::new();

        assert_eq!(
            resolve_label(&lists, &mut details, "doctor", "42"),
            LabelResolution::FetchNeeded
        );
        // A second resolution pass must not claim another fetch.
        assert_eq!(
            resolve_label(&lists, &mut details, "doctor", "42"),
            LabelResolution::Loading
        );
    }

    #[test]
    fn test_list_pages_win_over_stale_detail_entry() {
        let lists = lists_with("doctor", "", vec![item("42", "dr. Siti Aisyah")]);
        let mut details = DetailStore::new();
        details.insert(DetailKey::new("doctor", "42"), item("42", "dr. Siti"));

        assert_eq!(
            resolve_label(&lists, &mut details, "doctor", "42"),
            LabelResolution::Ready("dr. Siti Aisyah".to_string())
        );
        // Converged: the detail cache now carries the list-derived label.
        assert_eq!(
            peek_label(&ListStore::new(), &details, "doctor", "42"),
            LabelResolution::Ready("dr. Siti Aisyah".to_string())
        );
    }

    #[test]
    fn test_commit_selection_resolves_without_list_pages() {
        let mut details = DetailStore::new();
        commit_selection(&mut details, "doctor", &item("42", "dr. Siti"));
        assert_eq!(
            peek_label(&ListStore::new(), &details, "doctor", "42"),
            LabelResolution::Ready("dr. Siti".to_string())
        );
    }

    #[test]
    fn test_peek_never_mutates() {
        let lists = lists_with("doctor", "", vec![item("42", "dr. Siti")]);
        let details = DetailStore::new();
        assert_eq!(
            peek_label(&lists, &details, "doctor", "42"),
            LabelResolution::Ready("dr. Siti".to_string())
        );
        assert_eq!(details.get(&DetailKey::new("doctor", "42")), None);
        assert_eq!(
            peek_label(&lists, &details, "doctor", "99"),
            LabelResolution::FetchNeeded
        );
        assert_eq!(details.get(&DetailKey::new("doctor", "99")), None);
    }
}
