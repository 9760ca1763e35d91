use super::*;

const ALL_STATES: [SearchState; 4] = [
    SearchState::Idle,
    SearchState::Focused,
    SearchState::DropdownOpen,
    SearchState::ClosingPending,
];

/// Test the focus -> results -> blur -> close path
#[test]
fn test_complete_interaction_flow() {
    let state = SearchState::default();
    assert_eq!(state, SearchState::Idle);

    let state = state.next(SearchEvent::Focus { has_results: false });
    assert_eq!(state, SearchState::Focused);

    let state = state.next(SearchEvent::ResultsChanged { has_results: true });
    assert_eq!(state, SearchState::DropdownOpen);

    let state = state.next(SearchEvent::Blur);
    assert_eq!(state, SearchState::ClosingPending);
    assert!(state.dropdown_visible(true));

    let state = state.next(SearchEvent::CloseElapsed);
    assert_eq!(state, SearchState::Idle);
    assert!(!state.dropdown_visible(true));
}

#[test]
fn test_refocus_during_pending_close() {
    let pending = SearchState::ClosingPending;
    assert_eq!(
        pending.next(SearchEvent::Focus { has_results: true }),
        SearchState::DropdownOpen
    );
    assert_eq!(
        pending.next(SearchEvent::Focus { has_results: false }),
        SearchState::Focused
    );
}

#[test]
fn test_focus_with_retained_results_opens_dropdown() {
    assert_eq!(
        SearchState::Idle.next(SearchEvent::Focus { has_results: true }),
        SearchState::DropdownOpen
    );
}

#[test]
fn test_clearing_results_closes_dropdown_but_keeps_focus() {
    let state = SearchState::DropdownOpen.next(SearchEvent::ResultsChanged { has_results: false });
    assert_eq!(state, SearchState::Focused);
    assert!(state.is_focused());
}

#[test]
fn test_select_always_idles() {
    for state in ALL_STATES {
        assert_eq!(
            state.next(SearchEvent::Select),
            SearchState::Idle,
            "from {:?}",
            state
        );
    }
}

#[test]
fn test_ignored_events_leave_state_unchanged() {
    assert_eq!(SearchState::Idle.next(SearchEvent::Blur), SearchState::Idle);
    assert_eq!(
        SearchState::Idle.next(SearchEvent::ResultsChanged { has_results: true }),
        SearchState::Idle
    );
    assert_eq!(
        SearchState::ClosingPending.next(SearchEvent::Blur),
        SearchState::ClosingPending
    );
    assert_eq!(
        SearchState::ClosingPending.next(SearchEvent::ResultsChanged { has_results: false }),
        SearchState::ClosingPending
    );
    // A stale close must not disturb a focused input
    for state in [SearchState::Idle, SearchState::Focused, SearchState::DropdownOpen] {
        assert_eq!(state.next(SearchEvent::CloseElapsed), state);
    }
    assert_eq!(
        SearchState::DropdownOpen.next(SearchEvent::Focus { has_results: false }),
        SearchState::DropdownOpen
    );
}

#[test]
fn test_dropdown_visibility_table() {
    assert!(!SearchState::Idle.dropdown_visible(true));
    assert!(!SearchState::Focused.dropdown_visible(true));
    assert!(SearchState::DropdownOpen.dropdown_visible(true));
    assert!(SearchState::ClosingPending.dropdown_visible(true));
    assert!(!SearchState::ClosingPending.dropdown_visible(false));
}
