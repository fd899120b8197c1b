use crate::shared::catalog_select::CatalogDescriptor;
use contracts::catalog::CatalogItem;
use serde::{Deserialize, Serialize};

/// Row shape of `GET /poli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoliRow {
    pub kd_poli: String,
    pub nm_poli: String,
}

pub const POLI: CatalogDescriptor = CatalogDescriptor {
    entity: "poli",
    resource: "poli",
    project,
};

fn project(row: &serde_json::Value) -> Option<CatalogItem> {
    let parsed: PoliRow = serde_json::from_value(row.clone()).ok()?;
    Some(CatalogItem {
        id: parsed.kd_poli,
        label: parsed.nm_poli,
        raw: row.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_poli_row() {
        let row = json!({"kd_poli": "P003", "nm_poli": "Poli Gigi"});
        let item = (POLI.project)(&row).unwrap();
        assert_eq!(item.id, "P003");
        assert_eq!(item.label, "Poli Gigi");
    }
}
