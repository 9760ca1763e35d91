// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod config;
pub mod events;
pub mod favorites;
pub mod lookup;
pub mod search;
pub mod timer;

use std::sync::Arc;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

/// Application entry point - runs the search console on a tokio runtime.
/// Note: This function cannot be unit tested as it reads from stdin.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn run() {
    app::init_logging();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("{}", app::AppError::Runtime(e.to_string()));
            return;
        }
    };

    let options = app::LaunchOptions::from_args(std::env::args().skip(1));
    let scheduler = Arc::new(timer::TokioScheduler::new(runtime.handle().clone()));

    let result = app::setup(&options, scheduler)
        .and_then(|state| runtime.block_on(app::run_console(state)));
    if let Err(e) = result {
        error!("kotoba exited with an error: {}", e);
    }
}
