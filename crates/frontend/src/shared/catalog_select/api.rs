//! HTTP layer for the two catalog endpoints.

use gloo_net::http::Request;

use super::entity::{CatalogDescriptor, Projection};
use super::list_cache::CatalogPage;
use crate::shared::api_utils::api_base;
use contracts::catalog::{CatalogItem, DetailEnvelope, ListEnvelope};

/// `GET /{resource}?search={token}&page={n}`, mapped to one cache page.
pub async fn fetch_page(
    desc: &CatalogDescriptor,
    token: &str,
    page: usize,
) -> Result<CatalogPage, String> {
    let url = format!(
        "{}/{}?search={}&page={}",
        api_base(),
        desc.resource,
        urlencoding::encode(token),
        page
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let envelope: ListEnvelope = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(project_page(&envelope, page, desc.project))
}

/// `GET /{resource}/{id}`, mapped through the entity projection.
pub async fn fetch_detail(desc: &CatalogDescriptor, id: &str) -> Result<CatalogItem, String> {
    let url = format!(
        "{}/{}/{}",
        api_base(),
        desc.resource,
        urlencoding::encode(id)
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let envelope: DetailEnvelope = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    (desc.project)(&envelope.data).ok_or_else(|| "Row rejected by projection".to_string())
}

/// Map one wire envelope into a cache page. Rows the projection rejects are
/// skipped; `has_next` comes from the server's pagination meta.
pub fn project_page(
    envelope: &ListEnvelope,
    requested_page: usize,
    project: Projection,
) -> CatalogPage {
    let items: Vec<CatalogItem> = envelope.data.iter().filter_map(|row| project(row)).collect();
    let pagination = &envelope.meta.pagination;
    CatalogPage {
        page_number: requested_page,
        items,
        has_next: pagination.current_page < pagination.total_pages,
    }
}
