use super::catalog::DRUG_BATCH;
use crate::shared::catalog_select::CatalogSelect;
use leptos::prelude::*;

/// Pharmacy batch picker for dispensing and stock-opname forms.
#[component]
pub fn DrugBatchSelect(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)] disabled: Option<ReadSignal<bool>>,
) -> impl IntoView {
    let disabled = disabled.unwrap_or_else(|| {
        let (r, _) = signal(false);
        r
    });
    view! {
        <CatalogSelect
            descriptor=DRUG_BATCH
            value=value
            on_change=on_change
            placeholder="Select batch…".to_string()
            disabled=disabled
        />
    }
}
