//! Projection seam between entity-specific server rows and the generic
//! selector.

use contracts::catalog::CatalogItem;

/// Maps one raw server row to the `{id, label}` pair the selector renders.
/// Rows it rejects are skipped rather than failing the page.
pub type Projection = fn(&serde_json::Value) -> Option<CatalogItem>;

/// Static description of one catalog entity type.
///
/// `entity` namespaces both caches; `resource` is the API path segment of
/// the two endpoints (`/{resource}?search=…&page=…`, `/{resource}/{id}`).
#[derive(Debug, Clone, Copy)]
pub struct CatalogDescriptor {
    pub entity: &'static str,
    pub resource: &'static str,
    pub project: Projection,
}

/// String field access on a raw row. Numeric codes are rendered with
/// `to_string` so they still make usable ids.
pub fn raw_str(row: &serde_json::Value, field: &str) -> Option<String> {
    match row.get(field)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_str_reads_strings_and_numbers() {
        let row = json!({"kd_kel": 42, "desk_kel": "Menteng", "flags": []});
        assert_eq!(raw_str(&row, "kd_kel"), Some("42".to_string()));
        assert_eq!(raw_str(&row, "desk_kel"), Some("Menteng".to_string()));
        assert_eq!(raw_str(&row, "flags"), None);
        assert_eq!(raw_str(&row, "missing"), None);
    }
}
