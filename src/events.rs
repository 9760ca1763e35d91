// Search and favorites events for frontend notification
// Defines event payloads and emission traits for testability

use serde::Serialize;

use crate::favorites::{FavoriteCategory, FavoriteId};
use crate::lookup::Entry;
use crate::search::SearchState;

/// Search-related event names
pub mod search_events {
    pub const SEARCH_STATE_CHANGED: &str = "search_state_changed";
    pub const SEARCH_RESULT_SELECTED: &str = "search_result_selected";
}

/// Favorites-related event names
pub mod favorites_events {
    pub const FAVORITES_UPDATED: &str = "favorites_updated";
}

/// Payload for search_state_changed event
///
/// Emitted after every mutation of a search session, carrying the full
/// render-relevant snapshot so the view never has to query back.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchStateChangedPayload {
    /// ID of the session that changed
    pub session_id: String,
    /// Interaction state after the mutation
    pub state: SearchState,
    /// Current input value
    pub query: String,
    /// Current result list, in match order
    pub results: Vec<Entry>,
    /// Whether the result dropdown should be rendered
    pub dropdown_visible: bool,
}

/// Payload for search_result_selected event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSelectedPayload {
    /// ID of the session the selection happened in
    pub session_id: String,
    /// The selected entry
    pub entry: Entry,
}

/// Kind of favorites mutation
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FavoritesAction {
    Add,
    Remove,
}

/// Payload for favorites_updated event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesUpdatedPayload {
    /// Category whose collection changed
    pub category: FavoriteCategory,
    /// Type of mutation
    pub action: FavoritesAction,
    /// ID of the affected item
    pub item_id: FavoriteId,
    /// ISO 8601 timestamp of the mutation
    pub timestamp: String,
}

/// Trait for emitting search session events
/// Allows mocking in tests while the host decides how to deliver them
pub trait SearchEventEmitter: Send + Sync {
    /// Emit search_state_changed event
    fn emit_search_state_changed(&self, payload: SearchStateChangedPayload);

    /// Emit search_result_selected event
    fn emit_result_selected(&self, payload: SearchResultSelectedPayload);
}

/// Trait for emitting favorites events
pub trait FavoritesEventEmitter: Send + Sync {
    /// Emit favorites_updated event
    fn emit_favorites_updated(&self, payload: FavoritesUpdatedPayload);
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
