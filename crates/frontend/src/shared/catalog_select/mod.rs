//! Remote-backed searchable selector with infinite pagination.
//!
//! One text box that behaves like a single-value selector over a large,
//! server-paginated catalog. Keystrokes are debounced into search tokens,
//! pages load on scroll proximity, and two caches stay consistent: the
//! per-token paged list cache and the per-id detail cache that resolves a
//! pre-existing value's label without refetching the page it lives on.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::shared::catalog_select::{provide_catalog_caches, CatalogSelect};
//! use crate::domain::c001_doctor::DOCTOR;
//!
//! // Once, in the app shell:
//! provide_catalog_caches();
//!
//! // In a form:
//! view! {
//!     <CatalogSelect
//!         descriptor=DOCTOR
//!         value=doctor_id
//!         on_change=Callback::new(move |id| set_doctor_id.set(id))
//!     />
//! }
//! ```

pub mod api;
pub mod component;
pub mod controller;
pub mod debounce;
pub mod detail_cache;
pub mod entity;
pub mod list_cache;
pub mod reconcile;
pub mod service;

pub use component::CatalogSelect;
pub use entity::{CatalogDescriptor, Projection};
pub use reconcile::LabelResolution;
pub use service::{provide_catalog_caches, CatalogCacheService};
