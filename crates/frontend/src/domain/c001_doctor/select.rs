use super::catalog::DOCTOR;
use crate::shared::catalog_select::CatalogSelect;
use leptos::prelude::*;

/// Doctor picker for registration and scheduling forms.
#[component]
pub fn DoctorSelect(
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
            descriptor=DOCTOR
            value=value
            on_change=on_change
            placeholder="Select doctor…".to_string()
            disabled=disabled
        />
    }
}
