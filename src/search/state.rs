// Search interaction state - focus and dropdown lifecycle of a search input

use serde::Serialize;

/// Interaction state of a search input and its result dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchState {
    /// Input not focused, dropdown closed
    #[default]
    Idle,
    /// Input focused, no results to show
    Focused,
    /// Input focused with results, dropdown shown
    DropdownOpen,
    /// Input lost focus; dropdown closes once the blur delay elapses
    ClosingPending,
}

/// Inputs that drive the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// Input gained focus
    Focus { has_results: bool },
    /// Input lost focus
    Blur,
    /// Result list was recomputed after the query changed
    ResultsChanged { has_results: bool },
    /// A result in the dropdown was picked
    Select,
    /// The blur delay elapsed without a refocus
    CloseElapsed,
}

impl SearchState {
    /// State after applying an event
    ///
    /// Transitions:
    /// - Idle | ClosingPending --Focus--> Focused or DropdownOpen (by results)
    /// - Focused | DropdownOpen --Blur--> ClosingPending
    /// - Focused --ResultsChanged(non-empty)--> DropdownOpen
    /// - DropdownOpen --ResultsChanged(empty)--> Focused
    /// - ClosingPending --CloseElapsed--> Idle
    /// - any --Select--> Idle
    ///
    /// Every other pair leaves the state unchanged.
    pub fn next(self, event: SearchEvent) -> SearchState {
        use SearchEvent as E;
        use SearchState as S;

        match (self, event) {
            (_, E::Select) => S::Idle,
            (S::Idle | S::ClosingPending, E::Focus { has_results }) => {
                Self::focused_with(has_results)
            }
            (S::Focused | S::DropdownOpen, E::Blur) => S::ClosingPending,
            (S::Focused | S::DropdownOpen, E::ResultsChanged { has_results }) => {
                Self::focused_with(has_results)
            }
            (S::ClosingPending, E::CloseElapsed) => S::Idle,
            (state, _) => state,
        }
    }

    /// Whether the dropdown is shown in this state
    ///
    /// While closing is pending the input still counts as focused, so the
    /// dropdown stays up (if there is anything in it) until the delay elapses.
    pub fn dropdown_visible(self, has_results: bool) -> bool {
        match self {
            SearchState::DropdownOpen => true,
            SearchState::ClosingPending => has_results,
            SearchState::Idle | SearchState::Focused => false,
        }
    }

    /// Whether the input counts as focused
    pub fn is_focused(self) -> bool {
        !matches!(self, SearchState::Idle)
    }

    fn focused_with(has_results: bool) -> SearchState {
        if has_results {
            SearchState::DropdownOpen
        } else {
            SearchState::Focused
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
