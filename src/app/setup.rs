//! Application setup and initialization.
//!
//! Loads configuration and lexicon, then builds the long-lived state the
//! console host drives: one favorites store and one search session.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
pub use crate::favorites::FavoritesStoreState;
use crate::favorites::FavoritesStore;
use crate::lookup::{Lexicon, LexiconError, LexiconMatcher};
use crate::search::SearchSession;
use crate::timer::Scheduler;

/// Error types for application startup
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    /// Terminal I/O failed
    #[error("Console I/O failed: {0}")]
    Io(String),
    /// No async runtime could be started
    #[error("Failed to start runtime: {0}")]
    Runtime(String),
}

/// Command line options: `kotoba [LEXICON_JSON] [CONFIG_JSON]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Lexicon file; the demo lexicon is used when absent
    pub lexicon_path: Option<PathBuf>,
    /// Config file; defaults are used when absent
    pub config_path: Option<PathBuf>,
}

impl LaunchOptions {
    /// Parse positional arguments (program name already stripped)
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut args = args.into_iter();
        Self {
            lexicon_path: args.next().map(PathBuf::from),
            config_path: args.next().map(PathBuf::from),
        }
    }
}

/// Everything the console host needs at runtime
pub struct AppState {
    pub config: AppConfig,
    pub session: SearchSession,
    pub favorites: Arc<FavoritesStoreState>,
}

/// Install the log subscriber
///
/// Library code logs through the `log` macros; the subscriber's log bridge
/// picks those up. `RUST_LOG` overrides the default level.
pub fn init_logging() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Load config and lexicon and build application state
pub fn setup(
    options: &LaunchOptions,
    scheduler: Arc<dyn Scheduler>,
) -> Result<AppState, AppError> {
    crate::info!("Setting up kotoba...");

    let config = match &options.config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let lexicon = match &options.lexicon_path {
        Some(path) => Lexicon::load(path)?,
        None => {
            crate::info!("No lexicon file given, using the built-in demo lexicon");
            Lexicon::demo()
        }
    };

    let matcher = LexiconMatcher::with_config(config.matcher.clone());
    let session = SearchSession::with_config(
        Arc::new(lexicon),
        matcher,
        scheduler,
        config.session.clone(),
    );
    let favorites = Arc::new(Mutex::new(FavoritesStore::new()));

    crate::info!("Setup complete! Search session {} ready.", session.id());
    Ok(AppState {
        config,
        session,
        favorites,
    })
}
