use crate::shared::catalog_select::CatalogDescriptor;
use contracts::catalog::CatalogItem;
use serde::{Deserialize, Serialize};

/// Row shape of `GET /tarif` (billable treatment items).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffRow {
    pub kd_jenis_prw: String,
    pub nm_perawatan: String,
    #[serde(default)]
    pub total_byr: Option<f64>,
}

pub const TARIFF: CatalogDescriptor = CatalogDescriptor {
    entity: "tariff",
    resource: "tarif",
    project,
};

fn project(row: &serde_json::Value) -> Option<CatalogItem> {
    let parsed: TariffRow = serde_json::from_value(row.clone()).ok()?;
    Some(CatalogItem {
        id: parsed.kd_jenis_prw,
        label: parsed.nm_perawatan,
        raw: row.clone(),
    })
}
