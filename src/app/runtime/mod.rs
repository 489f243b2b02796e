use std::sync::Arc;
use std::time::Duration;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::logic::send_fetch;
use crate::sources::{AniListClient, MediaSource};
use crate::state::AppState;
use crate::theme::Settings;

use super::terminal::{restore_terminal, setup_terminal};

mod background;
mod channels;
mod cleanup;
mod event_loop;
mod handlers;
mod workers;

use background::spawn_event_thread;
use channels::Channels;
use cleanup::cleanup_on_exit;
use event_loop::run_event_loop;

pub use handlers::{handle_debounced_query, handle_page_result};
pub use workers::spawn_fetch_worker;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Environment variable that forces headless mode (no terminal, no event thread).
pub const HEADLESS_ENV: &str = "ANISEA_TEST_HEADLESS";

/// Startup options for the interactive browser.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Effective settings (config file plus CLI overrides).
    pub settings: Settings,
    /// Search term for the first request.
    pub initial_search: Option<String>,
    /// Run without a terminal.
    pub headless: bool,
}

/// What: Whether headless mode is requested by options or environment.
fn is_headless(options: &RunOptions) -> bool {
    options.headless || std::env::var(HEADLESS_ENV).ok().as_deref() == Some("1")
}

/// What: Run the Anisea TUI against the configured `AniList` endpoint.
///
/// Inputs:
/// - `options`: Settings, initial search term and headless flag.
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on unrecoverable terminal or client errors.
///
/// # Errors
/// - Returns `Err` when the HTTP client cannot be built or the terminal cannot be set up.
pub async fn run(options: RunOptions) -> Result<()> {
    let client = AniListClient::new(
        options.settings.api_endpoint.clone(),
        Duration::from_secs(options.settings.request_timeout_secs),
    )?;
    run_with_source(options, Arc::new(client)).await
}

/// What: Run the TUI with any catalog implementation.
///
/// Inputs:
/// - `options`: Settings, initial search term and headless flag.
/// - `source`: Catalog the fetch worker queries.
///
/// Output:
/// - `Ok(())` on clean exit.
///
/// Details:
/// - Sets up the terminal (skipped when headless), spawns the event thread, the
///   search debounce worker and the fetch worker, issues the mount request, then
///   drives the event loop until exit.
/// - On exit the event thread is cancelled and the terminal restored; in-flight
///   requests are left to finish on their own.
///
/// # Errors
/// - Returns `Err` when the terminal cannot be set up or restored.
pub async fn run_with_source<S: MediaSource>(options: RunOptions, source: Arc<S>) -> Result<()> {
    let headless = is_headless(&options);
    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut app = AppState::new(&options.settings, options.initial_search.as_deref());
    let debounce = Duration::from_millis(options.settings.search_debounce_ms);
    let mut channels = Channels::new(source, debounce);
    tracing::info!(
        headless,
        endpoint = %options.settings.api_endpoint,
        per_page = options.settings.per_page,
        debounce_ms = options.settings.search_debounce_ms,
        "[Runtime] starting"
    );

    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );

    send_fetch(app.view.mount(), &channels.fetch_tx);

    run_event_loop(&mut terminal, &mut app, &mut channels).await;

    cleanup_on_exit(&app, &channels);

    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
