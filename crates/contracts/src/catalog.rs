use serde::{Deserialize, Serialize};

/// One selectable catalog record, normalized for the selector layer.
///
/// `id` is the stable key, `label` the user-facing text. `raw` keeps the
/// entity-specific row exactly as the server returned it, so call sites can
/// read extra fields after a selection without another fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub label: String,
    pub raw: serde_json::Value,
}

/// Response envelope of `GET /{resource}?search={token}&page={n}`.
///
/// Rows stay untyped here; each entity supplies its own projection from the
/// raw row to a `CatalogItem`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub data: Vec<serde_json::Value>,
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: usize,
    pub total_pages: usize,
}

/// Response envelope of `GET /{resource}/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailEnvelope {
    pub data: serde_json::Value,
}
