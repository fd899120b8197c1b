use super::catalog::POLI;
use crate::shared::catalog_select::CatalogSelect;
use leptos::prelude::*;

/// Polyclinic ward picker.
#[component]
pub fn PoliSelect(
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
            descriptor=POLI
            value=value
            on_change=on_change
            placeholder="Select polyclinic…".to_string()
            disabled=disabled
        />
    }
}
