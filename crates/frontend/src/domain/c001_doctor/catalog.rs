use crate::shared::catalog_select::CatalogDescriptor;
use contracts::catalog::CatalogItem;
use serde::{Deserialize, Serialize};

/// Row shape of `GET /dokter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRow {
    pub kd_dokter: String,
    pub nama_dokter: String,
    #[serde(default)]
    pub spesialis: Option<String>,
}

pub const DOCTOR: CatalogDescriptor = CatalogDescriptor {
    entity: "doctor",
    resource: "dokter",
    project,
};

fn project(row: &serde_json::Value) -> Option<CatalogItem> {
    let parsed: DoctorRow = serde_json::from_value(row.clone()).ok()?;
    Some(CatalogItem {
        id: parsed.kd_dokter,
        label: parsed.nama_dokter,
        raw: row.clone(),
    })
}
