// Tests for SearchSession
// Test cases:
// - focus -> type -> blur -> refocus before delay keeps the dropdown open
// - blur without refocus closes once the delay elapses
// - selection closes synchronously from every state and cancels a pending close
// - clearing the query hides the dropdown while focus stays
// - dropping the session cancels the pending close
// - emitters see every mutation

use super::*;
use crate::events::tests::MockEventEmitter;
use crate::timer::ManualScheduler;

const DELAY: Duration = Duration::from_millis(DEFAULT_BLUR_CLOSE_DELAY_MS);

fn create_test_session() -> (SearchSession, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let session = SearchSession::new(
        Arc::new(Lexicon::demo()),
        LexiconMatcher::new(),
        scheduler.clone(),
    );
    (session, scheduler)
}

#[test]
fn test_refocus_before_delay_cancels_close() {
    let (session, scheduler) = create_test_session();
    assert_eq!(session.state(), SearchState::Idle);

    session.on_focus();
    session.on_query_changed("nhật");
    assert_eq!(session.state(), SearchState::DropdownOpen);
    assert!(session.is_dropdown_visible());

    session.on_blur();
    assert_eq!(session.state(), SearchState::ClosingPending);
    // Dropdown stays up during the delay
    assert!(session.is_dropdown_visible());

    scheduler.advance(Duration::from_millis(100));
    session.on_focus();
    assert_eq!(session.state(), SearchState::DropdownOpen);
    assert_eq!(scheduler.pending_count(), 0);

    scheduler.advance(Duration::from_secs(1));
    assert!(session.is_dropdown_visible());
    assert_eq!(session.state(), SearchState::DropdownOpen);
}

#[test]
fn test_blur_closes_after_delay() {
    let (session, scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("hi");
    session.on_blur();

    scheduler.advance(DELAY - Duration::from_millis(1));
    assert_eq!(session.state(), SearchState::ClosingPending);
    assert!(session.is_dropdown_visible());

    scheduler.advance(Duration::from_millis(1));
    assert_eq!(session.state(), SearchState::Idle);
    assert!(!session.is_dropdown_visible());
}

#[test]
fn test_custom_blur_delay() {
    let scheduler = Arc::new(ManualScheduler::new());
    let session = SearchSession::with_config(
        Arc::new(Lexicon::demo()),
        LexiconMatcher::new(),
        scheduler.clone(),
        SessionConfig {
            blur_close_delay_ms: 500,
        },
    );
    session.on_focus();
    session.on_blur();

    scheduler.advance(Duration::from_millis(499));
    assert_eq!(session.state(), SearchState::ClosingPending);
    scheduler.advance(Duration::from_millis(1));
    assert_eq!(session.state(), SearchState::Idle);
}

#[test]
fn test_select_closes_synchronously_from_any_state() {
    let entry = Entry::new("日本語", "にほんご", "tiếng nhật");

    // Idle
    let (session, _scheduler) = create_test_session();
    session.on_select(&entry);
    assert_eq!(session.state(), SearchState::Idle);

    // Focused
    let (session, _scheduler) = create_test_session();
    session.on_focus();
    session.on_select(&entry);
    assert_eq!(session.state(), SearchState::Idle);

    // DropdownOpen
    let (session, _scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("nhật");
    session.on_select(&entry);
    assert_eq!(session.state(), SearchState::Idle);
    assert!(!session.is_dropdown_visible());

    // ClosingPending: the pending close is cancelled too
    let (session, scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("nhật");
    session.on_blur();
    session.on_select(&entry);
    assert_eq!(session.state(), SearchState::Idle);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_select_sets_query_and_keeps_results() {
    let (session, _scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("Nhật");
    let picked = session.results()[3].clone();

    session.on_select(&picked);
    assert_eq!(session.query(), "日本語");
    assert_eq!(session.results().len(), 5);

    // Refocusing shows the kept results again
    session.on_focus();
    assert_eq!(session.state(), SearchState::DropdownOpen);
}

#[test]
fn test_clearing_query_hides_dropdown_but_keeps_focus() {
    let (session, _scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("you");
    assert!(session.is_dropdown_visible());

    session.on_query_changed("");
    assert_eq!(session.state(), SearchState::Focused);
    assert!(!session.is_dropdown_visible());
    assert!(session.results().is_empty());
}

#[test]
fn test_typing_during_pending_close_updates_results() {
    let (session, scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("hi");
    session.on_blur();

    session.on_query_changed("");
    assert_eq!(session.state(), SearchState::ClosingPending);
    assert!(!session.is_dropdown_visible());

    scheduler.advance(DELAY);
    assert_eq!(session.state(), SearchState::Idle);
}

#[test]
fn test_second_blur_does_not_schedule_again() {
    let (session, scheduler) = create_test_session();
    session.on_focus();
    session.on_blur();
    session.on_blur();
    assert_eq!(scheduler.pending_count(), 1);

    // Blurring an idle input schedules nothing
    scheduler.advance(DELAY);
    session.on_blur();
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_stale_close_from_earlier_blur_is_ignored() {
    let (session, scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("hi");

    // First blur at t=0, refocus at t=100, second blur at t=100
    session.on_blur();
    scheduler.advance(Duration::from_millis(100));
    session.on_focus();
    session.on_blur();

    // t=150: the first close would have been due, but it was cancelled
    scheduler.advance(Duration::from_millis(50));
    assert_eq!(session.state(), SearchState::ClosingPending);

    // t=250: the second close is due
    scheduler.advance(Duration::from_millis(100));
    assert_eq!(session.state(), SearchState::Idle);
}

#[test]
fn test_drop_cancels_pending_close() {
    let (session, scheduler) = create_test_session();
    session.on_focus();
    session.on_blur();
    assert_eq!(scheduler.pending_count(), 1);

    drop(session);
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.advance(Duration::from_secs(1)), 0);
}

#[test]
fn test_emitters_notified_on_every_mutation() {
    let (session, scheduler) = create_test_session();
    let emitter = Arc::new(MockEventEmitter::new());
    session.subscribe(emitter.clone());

    session.on_focus(); // Focused, hidden
    session.on_query_changed("hi"); // DropdownOpen, visible
    session.on_query_changed("hi"); // unchanged, nothing emitted
    session.on_blur(); // ClosingPending, visible
    scheduler.advance(DELAY); // Idle, hidden

    assert_eq!(emitter.visibility_history(), vec![false, true, true, false]);

    let last = emitter.last_state_change().unwrap();
    assert_eq!(last.state, SearchState::Idle);
    assert_eq!(last.session_id, session.id().to_string());
    assert_eq!(last.query, "hi");
}

#[test]
fn test_select_emits_selected_entry() {
    let (session, _scheduler) = create_test_session();
    let emitter = Arc::new(MockEventEmitter::new());
    session.subscribe(emitter.clone());

    session.on_focus();
    session.on_query_changed("youni");
    let picked = session.results()[0].clone();
    session.on_select(&picked);

    let selected = emitter.result_selected_events.lock().unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].entry, picked);

    let last = emitter.last_state_change().unwrap();
    assert!(!last.dropdown_visible);
    assert_eq!(last.query, "ように");
}

#[test]
fn test_fallback_results_open_dropdown_for_unknown_query() {
    let (session, _scheduler) = create_test_session();
    session.on_focus();
    session.on_query_changed("xyz");

    assert!(session.is_dropdown_visible());
    assert_eq!(session.results()[0].headword, "火");
}
