// Search module - interaction state and sessions for the dictionary search input

mod session;
mod state;

pub use session::{SearchSession, SessionConfig, DEFAULT_BLUR_CLOSE_DELAY_MS};
pub use state::{SearchEvent, SearchState};
