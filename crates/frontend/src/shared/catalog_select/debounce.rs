//! Keystroke debouncing for the search box.
//!
//! The quiet-window timer itself lives in the component layer
//! (`TimeoutFuture`); this type owns the bookkeeping: which text is pending,
//! which timer generation is still current, and what token was last
//! committed. A timer firing for an outdated generation is ignored, which is
//! what collapses a rapid keystroke burst into a single committed token.

/// Default quiet window between the last keystroke and the committed token.
pub const DEFAULT_QUIET_MS: u32 = 500;

/// What the caller should do after feeding one keystroke in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceAction {
    /// Arm (or re-arm) the quiet-window timer for this generation.
    Schedule { generation: u64, delay_ms: u32 },
    /// Commit the token right away (the box was cleared; a stale filtered
    /// view must not linger).
    Commit(String),
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_ms: u32,
    generation: u64,
    pending: Option<String>,
    committed: String,
}

impl Debouncer {
    pub fn new(quiet_ms: u32) -> Self {
        Self {
            quiet_ms,
            generation: 0,
            pending: None,
            committed: String::new(),
        }
    }

    /// Last committed token. Starts as `""` (unfiltered).
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Feed one keystroke.
    pub fn keystroke(&mut self, text: &str) -> DebounceAction {
        self.generation += 1;
        if text.is_empty() {
            self.pending = None;
            self.committed.clear();
            DebounceAction::Commit(String::new())
        } else {
            self.pending = Some(text.to_string());
            DebounceAction::Schedule {
                generation: self.generation,
                delay_ms: self.quiet_ms,
            }
        }
    }

    /// Forget pending and committed state (popover reopened). Bumping the
    /// generation also disarms any timer still in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.committed.clear();
    }

    /// Quiet-window timer fired. Returns the token to commit, or `None` when
    /// a newer keystroke superseded this timer.
    pub fn timer_fired(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        let token = self.pending.take()?;
        self.committed = token.clone();
        Some(token)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_commits_only_last_token() {
        let mut d = Debouncer::new(500);
        let first = d.keystroke("j");
        let DebounceAction::Schedule { generation: g1, .. } = first else {
            panic!("expected schedule");
        };
        d.keystroke("ja");
        let DebounceAction::Schedule { generation: g3, .. } = d.keystroke("jak") else {
            panic!("expected schedule");
        };

        // Timers for superseded keystrokes fire into the void.
        assert_eq!(d.timer_fired(g1), None);
        assert_eq!(d.timer_fired(g3), Some("jak".to_string()));
        assert_eq!(d.committed(), "jak");

        // A timer cannot fire twice.
        assert_eq!(d.timer_fired(g3), None);
    }

    #[test]
    fn test_clearing_commits_immediately() {
        let mut d = Debouncer::new(500);
        let DebounceAction::Schedule { generation, .. } = d.keystroke("jak") else {
            panic!("expected schedule");
        };
        assert_eq!(d.keystroke(""), DebounceAction::Commit(String::new()));
        assert_eq!(d.committed(), "");
        // The pending "jak" timer was invalidated by the clear.
        assert_eq!(d.timer_fired(generation), None);
    }

    #[test]
    fn test_typing_after_commit_starts_new_window() {
        let mut d = Debouncer::new(500);
        let DebounceAction::Schedule { generation, .. } = d.keystroke("jak") else {
            panic!("expected schedule");
        };
        assert_eq!(d.timer_fired(generation), Some("jak".to_string()));

        let DebounceAction::Schedule { generation, .. } = d.keystroke("jakar") else {
            panic!("expected schedule");
        };
        assert_eq!(d.committed(), "jak");
        assert_eq!(d.timer_fired(generation), Some("jakar".to_string()));
        assert_eq!(d.committed(), "jakar");
    }
}
