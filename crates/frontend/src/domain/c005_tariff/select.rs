use super::catalog::TARIFF;
use crate::shared::catalog_select::CatalogSelect;
use leptos::prelude::*;

/// Tariff item picker for billing entry rows.
#[component]
pub fn TariffSelect(
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
            descriptor=TARIFF
            value=value
            on_change=on_change
            placeholder="Select tariff…".to_string()
            disabled=disabled
        />
    }
}
