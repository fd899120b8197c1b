use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::controller::{Command, PageDisposition, SelectorController};
use super::entity::CatalogDescriptor;
use super::reconcile::LabelResolution;
use super::service::CatalogCacheService;

/// Scroll distance to the list bottom that triggers the next page fetch.
const SCROLL_THRESHOLD_PX: i32 = 10;

/// Everything command execution needs. `Copy` so the async fetch and timer
/// blocks can carry it around freely.
#[derive(Clone, Copy)]
struct SelectCtx {
    desc: CatalogDescriptor,
    caches: CatalogCacheService,
    controller: RwSignal<SelectorController>,
    on_change: Callback<String>,
    set_error: WriteSignal<Option<String>>,
}

impl SelectCtx {
    fn execute(self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::ResetAndFetchFirst { token } => {
                    self.set_error.set(None);
                    self.caches.reset_list(self.desc.entity, &token);
                    if let Some(page) = self.caches.begin_first_fetch(self.desc.entity, &token) {
                        self.spawn_page_fetch(token.clone(), page);
                    }
                }
                Command::FetchNext { token } => {
                    if let Some(page) = self.caches.begin_next_fetch(self.desc.entity, &token) {
                        self.set_error.set(None);
                        self.controller.update(|c| c.fetch_started());
                        self.spawn_page_fetch(token.clone(), page);
                    }
                }
                Command::ArmDebounce {
                    generation,
                    delay_ms,
                } => {
                    spawn_local(async move {
                        TimeoutFuture::new(delay_ms).await;
                        let commands = self
                            .controller
                            .try_update(|c| c.debounce_fired(generation))
                            .unwrap_or_default();
                        self.execute(commands);
                    });
                }
                Command::CommitSelection { item } => {
                    // Cache write happens before the emit; a parent that
                    // re-renders synchronously already resolves the label.
                    self.caches.commit_selection(self.desc.entity, &item, |id| {
                        self.on_change.run(id.to_string());
                    });
                }
            }
        }
    }

    fn spawn_page_fetch(self, token: String, page: usize) {
        spawn_local(async move {
            let result = api::fetch_page(&self.desc, &token, page).await;
            let ok = result.is_ok();
            let disposition = self
                .controller
                .try_update(|c| c.page_arrived(&token, page, ok))
                .unwrap_or(PageDisposition::DiscardStale);
            match (disposition, result) {
                (PageDisposition::Apply, Ok(fetched)) => {
                    self.caches.apply_page(self.desc.entity, &token, fetched);
                }
                (PageDisposition::Apply, Err(err)) => {
                    log::warn!(
                        "catalog {}: page {} fetch failed: {}",
                        self.desc.entity,
                        page,
                        err
                    );
                    self.caches.abandon_fetch(self.desc.entity, &token);
                    self.set_error.set(Some(err));
                }
                (PageDisposition::DiscardStale, _) => {
                    log::debug!(
                        "catalog {}: dropped stale response for token {:?}",
                        self.desc.entity,
                        token
                    );
                    self.caches.abandon_fetch(self.desc.entity, &token);
                }
            }
        });
    }
}

/// Single-value selector over a server-paginated, searchable catalog.
///
/// The input doubles as the search box: closed it shows the resolved label
/// of `value`, open it filters the popover list. Scrolling the list near its
/// bottom pages more results in.
#[component]
pub fn CatalogSelect(
    /// Entity wiring: cache namespace, API resource, row projection.
    descriptor: CatalogDescriptor,
    /// Currently selected id ("" means no selection).
    #[prop(into)]
    value: Signal<String>,
    /// Receives the new id after it has been committed to the detail cache.
    on_change: Callback<String>,
    /// Text shown while nothing is selected.
    #[prop(optional)]
    placeholder: Option<String>,
    #[prop(optional)]
    disabled: Option<ReadSignal<bool>>,
) -> impl IntoView {
    let caches = CatalogCacheService::acquire();
    let placeholder = placeholder.unwrap_or_else(|| "Select…".to_string());
    let disabled = disabled.unwrap_or_else(|| {
        let (r, _) = signal(false);
        r
    });

    let controller = RwSignal::new(SelectorController::new());
    let (search_text, set_search_text) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let desc = descriptor;
    let ctx = SelectCtx {
        desc,
        caches,
        controller,
        on_change,
        set_error,
    };

    // Resolve the display label for the current value; unknown ids get one
    // standalone detail fetch. Only `value` is tracked here.
    Effect::new(move |_| {
        let id = value.get();
        if caches.resolve_label(desc.entity, &id) == LabelResolution::FetchNeeded {
            spawn_local(async move {
                match api::fetch_detail(&desc, &id).await {
                    Ok(item) => caches.complete_detail(desc.entity, &id, Some(item)),
                    Err(err) => {
                        log::warn!("catalog {}: detail {} failed: {}", desc.entity, id, err);
                        caches.complete_detail(desc.entity, &id, None);
                    }
                }
            });
        }
    });

    let is_open = move || controller.with(|c| c.is_open());

    // Input value: the live search text while open, the resolved label when
    // closed. Empty for no selection / failed resolution, so the HTML
    // placeholder shows through.
    let input_value = move || {
        if is_open() {
            return search_text.get();
        }
        match caches.peek_label(desc.entity, &value.get()) {
            LabelResolution::Ready(label) => label,
            LabelResolution::Loading | LabelResolution::FetchNeeded => "Loading…".to_string(),
            LabelResolution::Empty | LabelResolution::Failed => String::new(),
        }
    };

    let open_selector = move || {
        if disabled.get() {
            return;
        }
        set_search_text.set(String::new());
        let commands = controller.try_update(|c| c.open()).unwrap_or_default();
        ctx.execute(commands);
    };

    let close_selector = move || {
        controller.update(|c| c.close());
        set_search_text.set(String::new());
    };

    let handle_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        if !is_open() {
            open_selector();
        }
        set_search_text.set(text.clone());
        let commands = controller
            .try_update(|c| c.keystroke(&text))
            .unwrap_or_default();
        ctx.execute(commands);
    };

    let handle_scroll = move |ev: web_sys::Event| {
        let el = event_target::<web_sys::Element>(&ev);
        let remaining = el.scroll_height() - el.scroll_top() - el.client_height();
        if remaining <= SCROLL_THRESHOLD_PX {
            let commands = controller
                .try_update(|c| c.scrolled_near_bottom())
                .unwrap_or_default();
            ctx.execute(commands);
        }
    };

    view! {
        <div class="catalog-select" style="position: relative; display: inline-block; min-width: 220px;">
            <input
                type="text"
                class="catalog-select__input"
                style="width: 100%; padding: 6px 26px 6px 10px; border: 1px solid #ccc; border-radius: 4px;"
                prop:value=input_value
                placeholder=placeholder.clone()
                disabled=move || disabled.get()
                on:click=move |_| {
                    if !is_open() {
                        open_selector();
                    }
                }
                on:input=handle_input
                on:keydown=move |ev| {
                    if ev.key() == "Escape" {
                        close_selector();
                    }
                }
            />
            {move || {
                (!value.get().is_empty() && !is_open() && !disabled.get()).then(|| {
                    view! {
                        <span
                            class="catalog-select__clear"
                            style="position: absolute; right: 8px; top: 50%; transform: translateY(-50%); cursor: pointer; color: #999;"
                            title="Clear selection"
                            on:click=move |_| on_change.run(String::new())
                        >
                            "\u{00d7}"
                        </span>
                    }
                })
            }}
            <Show when=is_open>
                <div
                    class="catalog-select__backdrop"
                    style="position: fixed; inset: 0; z-index: 10;"
                    on:click=move |_| close_selector()
                ></div>
                <div
                    class="catalog-select__popover"
                    style="position: absolute; top: 100%; left: 0; right: 0; z-index: 20; background: white; border: 1px solid #ccc; border-radius: 4px; box-shadow: 0 4px 12px rgba(0,0,0,0.15);"
                >
                    <div
                        class="catalog-select__rows"
                        style="max-height: 260px; overflow-y: auto;"
                        on:scroll=handle_scroll
                    >
                        {move || {
                            let token = controller.with(|c| c.token().to_string());
                            let items = caches.list_items(desc.entity, &token);
                            let fetching = caches.list_fetching(desc.entity, &token);
                            let has_error = error.get().is_some();
                            let empty = items.is_empty();

                            let rows = items
                                .into_iter()
                                .map(|item| {
                                    let row_id = item.id.clone();
                                    let label = item.label.clone();
                                    view! {
                                        <div
                                            class="catalog-select__row"
                                            style="padding: 6px 10px; cursor: pointer; border-bottom: 1px solid #f0f0f0;"
                                            class:selected=move || value.get() == row_id
                                            on:click=move |_| {
                                                let commands = controller
                                                    .try_update(|c| c.select(item.clone()))
                                                    .unwrap_or_default();
                                                set_search_text.set(String::new());
                                                ctx.execute(commands);
                                            }
                                        >
                                            {label}
                                        </div>
                                    }
                                })
                                .collect_view();

                            view! {
                                <>
                                {rows}
                                {fetching
                                    .then(|| {
                                        view! {
                                            <div class="catalog-select__status" style="padding: 8px 10px; color: #666;">
                                                "Loading…"
                                            </div>
                                        }
                                    })}
                                {has_error
                                    .then(|| {
                                        view! {
                                            <div class="catalog-select__status" style="padding: 8px 10px; color: #c00;">
                                                "Failed to load"
                                            </div>
                                        }
                                    })}
                                {(empty && !fetching && !has_error)
                                    .then(|| {
                                        view! {
                                            <div class="catalog-select__status" style="padding: 8px 10px; color: #666;">
                                                "Nothing found"
                                            </div>
                                        }
                                    })}
                                </>
                            }
                        }}
                    </div>
                </div>
            </Show>
        </div>
    }
}
