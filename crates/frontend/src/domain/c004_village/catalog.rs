use crate::shared::catalog_select::entity::raw_str;
use crate::shared::catalog_select::CatalogDescriptor;
use contracts::catalog::CatalogItem;

pub const VILLAGE: CatalogDescriptor = CatalogDescriptor {
    entity: "village",
    resource: "kelurahan",
    project,
};

// Village codes come back as bare numbers from the address service, so this
// one reads the raw row instead of going through a typed DTO.
fn project(row: &serde_json::Value) -> Option<CatalogItem> {
    Some(CatalogItem {
        id: raw_str(row, "kd_kel")?,
        label: raw_str(row, "desk_kel")?,
        raw: row.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_code_becomes_string_id() {
        let row = json!({"kd_kel": 3171, "desk_kel": "Menteng"});
        let item = (VILLAGE.project)(&row).unwrap();
        assert_eq!(item.id, "3171");
        assert_eq!(item.label, "Menteng");
    }

    #[test]
    fn test_row_without_description_is_rejected() {
        let row = json!({"kd_kel": 3171});
        assert!((VILLAGE.project)(&row).is_none());
    }
}
