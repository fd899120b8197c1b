use super::catalog::VILLAGE;
use crate::shared::catalog_select::CatalogSelect;
use leptos::prelude::*;

/// Village picker for patient address forms.
#[component]
pub fn VillageSelect(
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
            descriptor=VILLAGE
            value=value
            on_change=on_change
            placeholder="Select village…".to_string()
            disabled=disabled
        />
    }
}
