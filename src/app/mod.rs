//! Application host: startup wiring and the interactive console.

mod console;
mod setup;

pub use console::{execute, parse_command, run_console, ConsoleCommand, ConsoleView};
pub use setup::{init_logging, setup, AppError, AppState, FavoritesStoreState, LaunchOptions};
