// Search session - owns one search input's query, results and dropdown lifecycle
//
// One session per mounted dictionary screen. All mutation goes through the
// on_* handlers; every change is pushed to subscribed emitters synchronously,
// after the session lock is released.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use std::time::Duration;
use uuid::Uuid;

use super::state::{SearchEvent, SearchState};
use crate::events::{SearchEventEmitter, SearchResultSelectedPayload, SearchStateChangedPayload};
use crate::lookup::{Entry, Lexicon, LexiconMatcher};
use crate::timer::{Scheduler, TimerHandle};

/// Default delay between blur and dropdown close (150ms)
///
/// Long enough for a tap on a dropdown row to register before the row disappears.
pub const DEFAULT_BLUR_CLOSE_DELAY_MS: u64 = 150;

/// Configuration for search sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Delay before a blurred input closes its dropdown
    pub blur_close_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            blur_close_delay_ms: DEFAULT_BLUR_CLOSE_DELAY_MS,
        }
    }
}

impl SessionConfig {
    pub fn blur_close_delay(&self) -> Duration {
        Duration::from_millis(self.blur_close_delay_ms)
    }
}

/// Close scheduled by a blur
struct PendingClose {
    /// Identifies which blur scheduled this close
    generation: u64,
    timer: TimerHandle,
}

/// Mutable session data, guarded by `Shared::core`
struct SessionCore {
    state: SearchState,
    query: String,
    results: Vec<Entry>,
    pending_close: Option<PendingClose>,
    next_generation: u64,
}

impl SessionCore {
    fn dropdown_visible(&self) -> bool {
        self.state.dropdown_visible(!self.results.is_empty())
    }

    /// Cancel the pending close, if any. Returns true if one was pending.
    fn cancel_pending_close(&mut self) -> bool {
        match self.pending_close.take() {
            Some(pending) => {
                pending.timer.cancel();
                true
            }
            None => false,
        }
    }
}

/// Session state reachable from timer callbacks
struct Shared {
    id: Uuid,
    core: Mutex<SessionCore>,
    emitters: Mutex<Vec<Arc<dyn SearchEventEmitter>>>,
}

impl Shared {
    fn snapshot(&self, core: &SessionCore) -> SearchStateChangedPayload {
        SearchStateChangedPayload {
            session_id: self.id.to_string(),
            state: core.state,
            query: core.query.clone(),
            results: core.results.clone(),
            dropdown_visible: core.dropdown_visible(),
        }
    }

    fn emitters(&self) -> Vec<Arc<dyn SearchEventEmitter>> {
        self.emitters.lock().clone()
    }

    fn emit_state_changed(&self, payload: SearchStateChangedPayload) {
        for emitter in self.emitters() {
            emitter.emit_search_state_changed(payload.clone());
        }
    }

    /// Timer callback for the blur delay
    ///
    /// Acts only if the close scheduled under `generation` is still the
    /// pending one; a refocus, selection or newer blur makes it a no-op.
    fn close_elapsed(&self, generation: u64) {
        let payload = {
            let mut core = self.core.lock();
            let current = core
                .pending_close
                .as_ref()
                .is_some_and(|p| p.generation == generation && !p.timer.is_cancelled());
            if !current {
                crate::trace!(
                    "Search session {}: stale close {} ignored",
                    self.id,
                    generation
                );
                return;
            }

            core.pending_close = None;
            core.state = core.state.next(SearchEvent::CloseElapsed);
            crate::debug!(
                "Search session {}: blur delay elapsed, dropdown closed",
                self.id
            );
            self.snapshot(&core)
        };

        self.emit_state_changed(payload);
    }
}

/// A search input with autocomplete dropdown
///
/// Usage:
/// ```ignore
/// let session = SearchSession::new(lexicon, matcher, scheduler);
/// session.on_focus();
/// session.on_query_changed("nhật");
/// assert!(session.is_dropdown_visible());
/// ```
///
/// Dropping the session cancels any pending close.
pub struct SearchSession {
    shared: Arc<Shared>,
    lexicon: Arc<Lexicon>,
    matcher: LexiconMatcher,
    scheduler: Arc<dyn Scheduler>,
    config: SessionConfig,
}

impl SearchSession {
    /// Create a session with the default configuration
    pub fn new(
        lexicon: Arc<Lexicon>,
        matcher: LexiconMatcher,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self::with_config(lexicon, matcher, scheduler, SessionConfig::default())
    }

    /// Create a session with custom configuration
    pub fn with_config(
        lexicon: Arc<Lexicon>,
        matcher: LexiconMatcher,
        scheduler: Arc<dyn Scheduler>,
        config: SessionConfig,
    ) -> Self {
        let shared = Arc::new(Shared {
            id: Uuid::new_v4(),
            core: Mutex::new(SessionCore {
                state: SearchState::Idle,
                query: String::new(),
                results: Vec::new(),
                pending_close: None,
                next_generation: 0,
            }),
            emitters: Mutex::new(Vec::new()),
        });
        crate::debug!("Search session {} created", shared.id);

        Self {
            shared,
            lexicon,
            matcher,
            scheduler,
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    /// Register an emitter for this session's events
    pub fn subscribe(&self, emitter: Arc<dyn SearchEventEmitter>) {
        self.shared.emitters.lock().push(emitter);
    }

    /// Input gained focus
    ///
    /// Cancels a pending close and reopens the dropdown if there are results.
    pub fn on_focus(&self) {
        let payload = {
            let mut core = self.shared.core.lock();
            if core.cancel_pending_close() {
                crate::debug!(
                    "Search session {}: refocused, pending close cancelled",
                    self.shared.id
                );
            }

            let has_results = !core.results.is_empty();
            let next = core.state.next(SearchEvent::Focus { has_results });
            if next == core.state {
                return;
            }
            core.state = next;
            self.shared.snapshot(&core)
        };

        self.shared.emit_state_changed(payload);
    }

    /// Input lost focus
    ///
    /// The dropdown stays as it is until the blur delay elapses, so a tap on
    /// a result can still land. Blurring an unfocused input does nothing.
    pub fn on_blur(&self) {
        let payload = {
            let mut core = self.shared.core.lock();
            let next = core.state.next(SearchEvent::Blur);
            if next == core.state {
                return;
            }

            let generation = core.next_generation;
            core.next_generation += 1;

            let weak: Weak<Shared> = Arc::downgrade(&self.shared);
            let timer = self.scheduler.schedule(
                self.config.blur_close_delay(),
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.close_elapsed(generation);
                    }
                }),
            );

            core.pending_close = Some(PendingClose { generation, timer });
            core.state = next;
            crate::debug!(
                "Search session {}: blurred, closing in {}ms",
                self.shared.id,
                self.config.blur_close_delay_ms
            );
            self.shared.snapshot(&core)
        };

        self.shared.emit_state_changed(payload);
    }

    /// Input text changed; re-run the lookup immediately
    pub fn on_query_changed(&self, raw_query: &str) {
        let results = self.matcher.search(&self.lexicon, raw_query).to_vec();

        let payload = {
            let mut core = self.shared.core.lock();
            if core.query == raw_query && core.results == results {
                return;
            }

            let has_results = !results.is_empty();
            core.query = raw_query.to_string();
            core.results = results;
            core.state = core.state.next(SearchEvent::ResultsChanged { has_results });
            crate::trace!(
                "Search session {}: '{}' -> {} results",
                self.shared.id,
                raw_query,
                core.results.len()
            );
            self.shared.snapshot(&core)
        };

        self.shared.emit_state_changed(payload);
    }

    /// A dropdown result was picked
    ///
    /// Closes the dropdown at once (no blur delay) and puts the entry's
    /// headword in the input. Results are kept so a refocus shows them again.
    pub fn on_select(&self, entry: &Entry) {
        let payload = {
            let mut core = self.shared.core.lock();
            core.cancel_pending_close();
            core.query = entry.headword.clone();
            core.state = core.state.next(SearchEvent::Select);
            crate::debug!(
                "Search session {}: selected '{}'",
                self.shared.id,
                entry.headword
            );
            self.shared.snapshot(&core)
        };

        self.shared.emit_state_changed(payload);

        let selected = SearchResultSelectedPayload {
            session_id: self.shared.id.to_string(),
            entry: entry.clone(),
        };
        for emitter in self.shared.emitters() {
            emitter.emit_result_selected(selected.clone());
        }
    }

    pub fn is_dropdown_visible(&self) -> bool {
        self.shared.core.lock().dropdown_visible()
    }

    pub fn state(&self) -> SearchState {
        self.shared.core.lock().state
    }

    /// Current input value
    pub fn query(&self) -> String {
        self.shared.core.lock().query.clone()
    }

    /// Current results, in match order
    pub fn results(&self) -> Vec<Entry> {
        self.shared.core.lock().results.clone()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if self.shared.core.lock().cancel_pending_close() {
            crate::debug!(
                "Search session {} dropped, pending close cancelled",
                self.shared.id
            );
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
