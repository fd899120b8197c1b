//! Selector state machine, one instance per mounted field.
//!
//! Every user-visible lifecycle (open/close, debounce, paging, selection)
//! runs through an explicit transition here instead of ad-hoc conditional
//! side effects. Transitions return [`Command`]s; the component executes
//! them, so each side effect is attached to exactly one transition.

use super::debounce::{DebounceAction, Debouncer};
use contracts::catalog::CatalogItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Closed,
    /// Open with no committed search; the unfiltered first page shows here.
    OpenEmpty,
    /// A keystroke is waiting out the debounce quiet window.
    OpenSearching,
    /// Pages for the committed token are rendered.
    OpenLoaded,
    /// A next-page fetch is outstanding.
    OpenFetchingNext,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Reset the list entry for `token` and fetch its first page (unless the
    /// entry already has retained pages).
    ResetAndFetchFirst { token: String },
    /// Fetch the next page for `token` if one is due and none is in flight.
    FetchNext { token: String },
    /// Arm the debounce quiet-window timer.
    ArmDebounce { generation: u64, delay_ms: u32 },
    /// Write the item into the detail cache, then emit its id.
    CommitSelection { item: CatalogItem },
}

/// What to do with a list response that just resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDisposition {
    /// Response matches the current token: append it (on success).
    Apply,
    /// Superseded token; drop the payload, only release the in-flight flag.
    DiscardStale,
}

#[derive(Debug, Clone)]
pub struct SelectorController {
    state: SelectorState,
    token: String,
    debounce: Debouncer,
}

impl SelectorController {
    pub fn new() -> Self {
        Self {
            state: SelectorState::Closed,
            token: String::new(),
            debounce: Debouncer::default(),
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// The committed search token the rendered list belongs to.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_open(&self) -> bool {
        self.state != SelectorState::Closed
    }

    /// Trigger open: unfiltered view, first page for `""`.
    pub fn open(&mut self) -> Vec<Command> {
        if self.is_open() {
            return Vec::new();
        }
        self.state = SelectorState::OpenEmpty;
        self.token.clear();
        self.debounce.reset();
        vec![Command::ResetAndFetchFirst {
            token: String::new(),
        }]
    }

    /// Outside click, Escape, or unmount.
    pub fn close(&mut self) {
        self.state = SelectorState::Closed;
    }

    /// Raw keystroke from the search box. Does not touch the caches; only
    /// the debounced token commit does.
    pub fn keystroke(&mut self, text: &str) -> Vec<Command> {
        if !self.is_open() {
            return Vec::new();
        }
        match self.debounce.keystroke(text) {
            DebounceAction::Commit(token) => self.commit_token(token),
            DebounceAction::Schedule {
                generation,
                delay_ms,
            } => {
                self.state = SelectorState::OpenSearching;
                vec![Command::ArmDebounce {
                    generation,
                    delay_ms,
                }]
            }
        }
    }

    /// The quiet-window timer for `generation` elapsed.
    pub fn debounce_fired(&mut self, generation: u64) -> Vec<Command> {
        if !self.is_open() {
            return Vec::new();
        }
        match self.debounce.timer_fired(generation) {
            Some(token) => self.commit_token(token),
            None => Vec::new(),
        }
    }

    fn commit_token(&mut self, token: String) -> Vec<Command> {
        self.state = if token.is_empty() {
            SelectorState::OpenEmpty
        } else {
            SelectorState::OpenLoaded
        };
        self.token = token.clone();
        vec![Command::ResetAndFetchFirst { token }]
    }

    /// Scroll proximity trigger from the list viewport. The in-flight and
    /// has-next guards are enforced by the list store when the command is
    /// executed, so rapid scroll events cannot double-fetch.
    pub fn scrolled_near_bottom(&mut self) -> Vec<Command> {
        match self.state {
            SelectorState::OpenLoaded | SelectorState::OpenEmpty => {
                vec![Command::FetchNext {
                    token: self.token.clone(),
                }]
            }
            _ => Vec::new(),
        }
    }

    /// A [`Command::FetchNext`] actually claimed a page.
    pub fn fetch_started(&mut self) {
        if matches!(
            self.state,
            SelectorState::OpenLoaded | SelectorState::OpenEmpty
        ) {
            self.state = SelectorState::OpenFetchingNext;
        }
    }

    /// A list response resolved (success or failure). `token` is the token
    /// captured when the fetch started; a mismatch with the current token
    /// means the response was superseded and must be discarded.
    pub fn page_arrived(&mut self, token: &str, page_number: usize, ok: bool) -> PageDisposition {
        if token != self.token {
            return PageDisposition::DiscardStale;
        }
        match self.state {
            // Closed mid-flight: keep the caches warm, leave the state be.
            SelectorState::Closed => {}
            // A newer keystroke is pending; its commit will restate things.
            SelectorState::OpenSearching => {}
            _ => {
                self.state = if !ok && page_number == 1 {
                    SelectorState::OpenEmpty
                } else {
                    SelectorState::OpenLoaded
                };
            }
        }
        PageDisposition::Apply
    }

    /// User picked an item from the rendered list.
    pub fn select(&mut self, item: CatalogItem) -> Vec<Command> {
        if !self.is_open() {
            return Vec::new();
        }
        self.state = SelectorState::Closed;
        vec![Command::CommitSelection { item }]
    }
}

impl Default for SelectorController {
    fn default() -> Self {
        Self::new()
    }
}
