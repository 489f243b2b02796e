//! Anisea application module: terminal setup and the async runtime.

/// Runtime event loop and background workers.
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::{
    HEADLESS_ENV, RunOptions, handle_debounced_query, handle_page_result, run, run_with_source,
    spawn_fetch_worker,
};
