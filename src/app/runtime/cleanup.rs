use std::sync::atomic::Ordering;

use crate::state::AppState;

use super::channels::Channels;

/// What: Release runtime resources on exit.
///
/// Inputs:
/// - `app`: Final application state (only read for the exit log line).
/// - `channels`: Communication channels.
///
/// Details:
/// - Signals the event reading thread to stop.
/// - Requests still in flight are not cancelled; their results are simply never read.
pub fn cleanup_on_exit(app: &AppState, channels: &Channels) {
    channels.event_thread_cancelled.store(true, Ordering::Relaxed);
    tracing::info!(
        items = app.view.items().len(),
        search = ?app.view.search_state().search_term,
        last_page = app.view.page_info().map(|p| p.current_page),
        stale_responses = app.stale_responses,
        "[Runtime] exiting"
    );
}
