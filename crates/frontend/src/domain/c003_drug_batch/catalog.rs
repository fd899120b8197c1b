use crate::shared::catalog_select::CatalogDescriptor;
use contracts::catalog::CatalogItem;
use serde::{Deserialize, Serialize};

/// Row shape of `GET /batch` (pharmacy stock batches).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugBatchRow {
    pub no_batch: String,
    pub nm_obat: String,
    #[serde(default)]
    pub expire: Option<String>,
}

pub const DRUG_BATCH: CatalogDescriptor = CatalogDescriptor {
    entity: "drug_batch",
    resource: "batch",
    project,
};

// The batch number alone is meaningless to the pharmacist; show the drug
// name with the batch in brackets.
fn project(row: &serde_json::Value) -> Option<CatalogItem> {
    let parsed: DrugBatchRow = serde_json::from_value(row.clone()).ok()?;
    Some(CatalogItem {
        id: parsed.no_batch.clone(),
        label: format!("{} [{}]", parsed.nm_obat, parsed.no_batch),
        raw: row.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_carries_drug_name_and_batch() {
        let row = json!({
            "no_batch": "B2024-117",
            "nm_obat": "Amoxicillin 500mg",
            "expire": "2026-11-01"
        });
        let item = (DRUG_BATCH.project)(&row).unwrap();
        assert_eq!(item.id, "B2024-117");
        assert_eq!(item.label, "Amoxicillin 500mg [B2024-117]");
    }
}
