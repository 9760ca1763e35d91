//! Terminal host for the search and favorites core.
//!
//! Each stdin line is either a query (plain text, fed to the search session
//! as if typed into the input) or a `:command` standing in for a UI event.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::setup::{AppError, AppState};
use crate::events::{
    FavoritesEventEmitter, FavoritesUpdatedPayload, SearchEventEmitter,
    SearchResultSelectedPayload, SearchStateChangedPayload,
};
use crate::favorites::{update_favorites, FavoriteCategory, FavoriteId, FavoriteItem};

pub const HELP_TEXT: &str = "\
Type text to search. Commands:
  :focus               focus the search input
  :blur                blur the search input (dropdown closes after the delay)
  :select N            pick result N (1-based) from the dropdown
  :fav CATEGORY ID     toggle a favorite (CATEGORY: vocabulary | kanji)
  :favs CATEGORY       list favorites of a category
  :help                show this help
  :quit                exit";

/// One parsed line of console input
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Query(String),
    Focus,
    Blur,
    /// Zero-based result index
    Select(usize),
    ToggleFavorite {
        category: FavoriteCategory,
        id: FavoriteId,
    },
    ListFavorites(FavoriteCategory),
    Help,
    Quit,
    /// Unrecognized command, with a message for the user
    Invalid(String),
}

/// Numeric ids become integer favorite ids, anything else stays text
fn parse_favorite_id(raw: &str) -> FavoriteId {
    raw.parse::<i64>()
        .map(FavoriteId::from)
        .unwrap_or_else(|_| FavoriteId::from(raw))
}

/// Parse a line of console input
pub fn parse_command(line: &str) -> ConsoleCommand {
    let Some(command) = line.trim().strip_prefix(':') else {
        return ConsoleCommand::Query(line.to_string());
    };

    let parts: Vec<&str> = command.split_whitespace().collect();
    match parts.as_slice() {
        ["focus"] => ConsoleCommand::Focus,
        ["blur"] => ConsoleCommand::Blur,
        ["select", n] => match n.parse::<usize>() {
            Ok(n) if n >= 1 => ConsoleCommand::Select(n - 1),
            _ => ConsoleCommand::Invalid(format!("Not a result number: {}", n)),
        },
        ["fav", category, id] => match category.parse::<FavoriteCategory>() {
            Ok(category) => ConsoleCommand::ToggleFavorite {
                category,
                id: parse_favorite_id(id),
            },
            Err(e) => ConsoleCommand::Invalid(e.to_string()),
        },
        ["favs", category] => match category.parse::<FavoriteCategory>() {
            Ok(category) => ConsoleCommand::ListFavorites(category),
            Err(e) => ConsoleCommand::Invalid(e.to_string()),
        },
        ["help"] => ConsoleCommand::Help,
        ["quit"] | ["q"] => ConsoleCommand::Quit,
        _ => ConsoleCommand::Invalid(format!("Unknown command: :{}", command.trim())),
    }
}

/// Renders session and favorites events as text
pub struct ConsoleView;

impl SearchEventEmitter for ConsoleView {
    fn emit_search_state_changed(&self, payload: SearchStateChangedPayload) {
        println!("[{:?}] query: {:?}", payload.state, payload.query);
        if payload.dropdown_visible {
            for (position, entry) in payload.results.iter().enumerate() {
                println!(
                    "  {:>2}. {}  {}  {}",
                    position + 1,
                    entry.headword,
                    entry.reading,
                    entry.gloss
                );
            }
        }
    }

    fn emit_result_selected(&self, payload: SearchResultSelectedPayload) {
        let entry = payload.entry;
        println!(
            "Selected: {} ({}) - {}",
            entry.headword, entry.reading, entry.gloss
        );
    }
}

impl FavoritesEventEmitter for ConsoleView {
    fn emit_favorites_updated(&self, payload: FavoritesUpdatedPayload) {
        println!(
            "Favorites ({}): {:?} {}",
            payload.category, payload.action, payload.item_id
        );
    }
}

/// Apply one command to the application state
///
/// Returns false when the console should exit.
pub fn execute(state: &AppState, command: ConsoleCommand) -> bool {
    match command {
        ConsoleCommand::Query(query) => state.session.on_query_changed(&query),
        ConsoleCommand::Focus => state.session.on_focus(),
        ConsoleCommand::Blur => state.session.on_blur(),
        ConsoleCommand::Select(index) => {
            // Rows are only tappable while the dropdown is shown
            let entry = if state.session.is_dropdown_visible() {
                state.session.results().get(index).cloned()
            } else {
                None
            };
            match entry {
                Some(entry) => state.session.on_select(&entry),
                None => println!("No result {} in the dropdown", index + 1),
            }
        }
        ConsoleCommand::ToggleFavorite { category, id } => {
            let is_favorite = update_favorites(&state.favorites, |favorites| {
                favorites.toggle_favorite(category, FavoriteItem::new(id.clone()))
            });
            println!("{} {} favorite: {}", category, id, is_favorite);
        }
        ConsoleCommand::ListFavorites(category) => {
            let favorites = state.favorites.lock();
            let items = favorites.favorites(category);
            if items.is_empty() {
                println!("No {} favorites", category);
            }
            for item in items {
                println!("  {}", item.id);
            }
        }
        ConsoleCommand::Help => println!("{}", HELP_TEXT),
        ConsoleCommand::Quit => return false,
        ConsoleCommand::Invalid(message) => println!("{}", message),
    }
    true
}

/// Read commands from stdin until EOF or `:quit`
pub async fn run_console(state: AppState) -> Result<(), AppError> {
    let view = Arc::new(ConsoleView);
    state.session.subscribe(view.clone());
    state.favorites.lock().subscribe(view);

    println!("{}", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppError::Io(e.to_string()))?
    {
        if !execute(&state, parse_command(&line)) {
            break;
        }
    }

    crate::info!("Console closed");
    Ok(())
}

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;
