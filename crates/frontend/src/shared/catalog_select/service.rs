//! Screen-wide catalog cache service.
//!
//! The two stores live behind `RwSignal`s in an explicit keyed service, not
//! ambient module state. Provide one instance through context in the app
//! shell; every selector on the screen then shares it, which is what lets
//! two fields for the same entity reuse pages and observe a single in-flight
//! request per `(entity, token)` key.

use leptos::prelude::*;

use super::detail_cache::{DetailEntry, DetailKey, DetailStore};
use super::list_cache::{CatalogPage, ListKey, ListStore};
use super::reconcile::{self, LabelResolution};
use contracts::catalog::CatalogItem;

#[derive(Clone, Copy)]
pub struct CatalogCacheService {
    lists: RwSignal<ListStore>,
    details: RwSignal<DetailStore>,
}

/// Install a shared instance into context (call once in the app shell).
pub fn provide_catalog_caches() -> CatalogCacheService {
    if let Some(svc) = use_context::<CatalogCacheService>() {
        return svc;
    }
    let svc = CatalogCacheService::new();
    provide_context(svc);
    svc
}

impl CatalogCacheService {
    pub fn new() -> Self {
        Self {
            lists: RwSignal::new(ListStore::new()),
            details: RwSignal::new(DetailStore::new()),
        }
    }

    /// Context instance, or a fresh instance-local service when the host app
    /// did not provide one.
    pub fn acquire() -> Self {
        use_context::<CatalogCacheService>().unwrap_or_else(Self::new)
    }

    // --- list side ---------------------------------------------------------

    pub fn reset_list(&self, entity: &str, token: &str) {
        let key = ListKey::new(entity, token);
        self.lists.update(|l| l.reset(&key));
    }

    /// Claim the first page fetch for a fresh entry; `None` when pages are
    /// retained from an earlier visit or a fetch is already in flight.
    pub fn begin_first_fetch(&self, entity: &str, token: &str) -> Option<usize> {
        let key = ListKey::new(entity, token);
        self.lists
            .try_update(|l| l.begin_first_fetch(&key))
            .flatten()
    }

    /// Claim the next page fetch; `None` when one is already in flight or no
    /// further pages exist.
    pub fn begin_next_fetch(&self, entity: &str, token: &str) -> Option<usize> {
        let key = ListKey::new(entity, token);
        self.lists.try_update(|l| l.begin_fetch(&key)).flatten()
    }

    /// Release the in-flight flag without appending anything.
    pub fn abandon_fetch(&self, entity: &str, token: &str) {
        let key = ListKey::new(entity, token);
        self.lists.update(|l| l.abandon_fetch(&key));
    }

    /// Append a fetched page for its key.
    pub fn apply_page(&self, entity: &str, token: &str, page: CatalogPage) {
        let key = ListKey::new(entity, token);
        self.lists.update(|l| l.complete_fetch(&key, page));
    }

    /// Reactive: all fetched items for the key, page order preserved.
    pub fn list_items(&self, entity: &str, token: &str) -> Vec<CatalogItem> {
        let key = ListKey::new(entity, token);
        self.lists.with(|l| l.items(&key))
    }

    /// Reactive: a fetch for the key is outstanding.
    pub fn list_fetching(&self, entity: &str, token: &str) -> bool {
        let key = ListKey::new(entity, token);
        self.lists.with(|l| l.is_fetching(&key))
    }

    // --- detail side -------------------------------------------------------

    /// Reactive, read-only label resolution for render closures.
    pub fn peek_label(&self, entity: &str, id: &str) -> LabelResolution {
        self.lists.with(|lists| {
            self.details
                .with(|details| reconcile::peek_label(lists, details, entity, id))
        })
    }

    /// Mutating resolution: promotes list hits into the detail cache and
    /// claims the detail fetch for unknown ids. Run this from an effect, not
    /// a render closure. Internal reads are untracked; track `value` at the
    /// call site instead.
    pub fn resolve_label(&self, entity: &str, id: &str) -> LabelResolution {
        self.lists.with_untracked(|lists| {
            self.details
                .try_update(|details| reconcile::resolve_label(lists, details, entity, id))
                .unwrap_or(LabelResolution::Empty)
        })
    }

    /// Resolution of a standalone detail fetch (`None` marks failure).
    pub fn complete_detail(&self, entity: &str, id: &str, result: Option<CatalogItem>) {
        let key = DetailKey::new(entity, id);
        self.details.update(|d| d.complete_fetch(&key, result));
    }

    /// Forget a resolved item so the next resolution refetches it. For
    /// callers that know the underlying record changed.
    pub fn invalidate_detail(&self, entity: &str, id: &str) {
        let key = DetailKey::new(entity, id);
        self.details.update(|d| d.invalidate(&key));
    }

    /// Write the picked item into the detail cache, then emit. The ordering
    /// is the contract: a parent re-rendering synchronously from `emit` must
    /// already see the label.
    pub fn commit_selection(&self, entity: &str, item: &CatalogItem, emit: impl FnOnce(&str)) {
        self.details
            .update(|d| reconcile::commit_selection(d, entity, item));
        emit(&item.id);
    }

    /// Non-reactive detail lookup, mainly for callers outside the view tree.
    pub fn detail_entry(&self, entity: &str, id: &str) -> Option<DetailEntry> {
        let key = DetailKey::new(entity, id);
        self.details.with_untracked(|d| d.get(&key).cloned())
    }
}

impl Default for CatalogCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, label: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            label: label.to_string(),
            raw: json!({}),
        }
    }

    fn page(n: usize, items: Vec<CatalogItem>, has_next: bool) -> CatalogPage {
        CatalogPage {
            page_number: n,
            items,
            has_next,
        }
    }

    #[test]
    fn test_selection_is_readable_during_emit() {
        let svc = CatalogCacheService::new();
        let picked = item("42", "dr. Siti");

        let mut seen = None;
        svc.commit_selection("doctor", &picked, |id| {
            // The parent's synchronous re-render path: the label must already
            // resolve from the detail cache, before the emit returns.
            seen = Some(svc.peek_label("doctor", id));
        });
        assert_eq!(
            seen,
            Some(LabelResolution::Ready("dr. Siti".to_string()))
        );
    }

    #[test]
    fn test_shared_key_observes_single_inflight_request() {
        let svc = CatalogCacheService::new();
        svc.reset_list("doctor", "");

        // Two selector instances race on the same key; only one wins.
        assert_eq!(svc.begin_first_fetch("doctor", ""), Some(1));
        assert_eq!(svc.begin_first_fetch("doctor", ""), None);
        assert_eq!(svc.begin_next_fetch("doctor", ""), None);

        svc.apply_page("doctor", "", page(1, vec![item("a", "a")], true));
        assert_eq!(svc.begin_next_fetch("doctor", ""), Some(2));
    }

    #[test]
    fn test_resolve_label_promotes_and_claims_fetch_once() {
        let svc = CatalogCacheService::new();
        svc.reset_list("doctor", "jak");
        svc.begin_first_fetch("doctor", "jak");
        svc.apply_page("doctor", "jak", page(1, vec![item("42", "dr. Siti")], false));

        assert_eq!(
            svc.resolve_label("doctor", "42"),
            LabelResolution::Ready("dr. Siti".to_string())
        );
        // Promoted: resolvable even without the list entry.
        assert_eq!(
            svc.detail_entry("doctor", "42"),
            Some(DetailEntry::Ready(item("42", "dr. Siti")))
        );

        // Unknown id claims exactly one fetch.
        assert_eq!(svc.resolve_label("doctor", "99"), LabelResolution::FetchNeeded);
        assert_eq!(svc.resolve_label("doctor", "99"), LabelResolution::Loading);
        svc.complete_detail("doctor", "99", Some(item("99", "dr. Budi")));
        assert_eq!(
            svc.resolve_label("doctor", "99"),
            LabelResolution::Ready("dr. Budi".to_string())
        );
    }

    #[test]
    fn test_superseded_search_response_never_reaches_the_new_token() {
        use crate::shared::catalog_select::controller::{
            Command, PageDisposition, SelectorController,
        };

        fn armed(cmds: &[Command]) -> u64 {
            match cmds {
                [Command::ArmDebounce { generation, .. }] => *generation,
                other => panic!("expected ArmDebounce, got {:?}", other),
            }
        }

        let svc = CatalogCacheService::new();
        let mut c = SelectorController::new();

        // "jak" commits and its first page fetch goes out.
        c.open();
        svc.reset_list("doctor", "");
        let generation = armed(&c.keystroke("jak"));
        c.debounce_fired(generation);
        svc.reset_list("doctor", "jak");
        assert_eq!(svc.begin_first_fetch("doctor", "jak"), Some(1));

        // "jakar" commits while "jak" is still in the air.
        let generation = armed(&c.keystroke("jakar"));
        c.debounce_fired(generation);
        svc.reset_list("doctor", "jakar");
        assert_eq!(svc.begin_first_fetch("doctor", "jakar"), Some(1));

        // The late "jak" response: discarded, its entry just unlocked.
        assert_eq!(c.page_arrived("jak", 1, true), PageDisposition::DiscardStale);
        svc.abandon_fetch("doctor", "jak");
        assert!(svc.list_items("doctor", "jak").is_empty());

        // The "jakar" response lands normally.
        assert_eq!(c.page_arrived("jakar", 1, true), PageDisposition::Apply);
        svc.apply_page("doctor", "jakar", page(1, vec![item("1", "Jakarta Pusat")], false));
        assert_eq!(svc.list_items("doctor", "jakar").len(), 1);
        assert_eq!(c.token(), "jakar");
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let svc = CatalogCacheService::new();
        svc.complete_detail("doctor", "42", None); // no pending entry: ignored
        assert_eq!(svc.detail_entry("doctor", "42"), None);

        assert_eq!(svc.resolve_label("doctor", "42"), LabelResolution::FetchNeeded);
        svc.complete_detail("doctor", "42", Some(item("42", "dr. Siti")));
        svc.invalidate_detail("doctor", "42");
        assert_eq!(svc.resolve_label("doctor", "42"), LabelResolution::FetchNeeded);
    }
}
