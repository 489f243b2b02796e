use ratatui::Terminal;
use tokio::select;

use crate::logic::check_sentinel;
use crate::state::AppState;
use crate::ui::ui;

use super::channels::Channels;
use super::handlers::{handle_debounced_query, handle_page_result};

/// What: Process one message from any runtime channel.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Output: `true` if the event loop should exit, `false` to continue
async fn process_channel_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            crate::events::handle_event(&ev, app, &channels.query_tx, &channels.fetch_tx)
        }
        Some(text) = channels.debounced_rx.recv() => {
            handle_debounced_query(app, &text, &channels.fetch_tx);
            false
        }
        Some(res) = channels.results_rx.recv() => {
            handle_page_result(app, res);
            false
        }
        else => true
    }
}

/// What: Run the main event loop: draw, check the sentinel, handle one message.
///
/// Inputs:
/// - `terminal`: Optional terminal for rendering (None in headless mode)
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Details:
/// - The sentinel is checked against the viewport recorded by the draw that just
///   happened; when it issues a request the frame is redrawn right away so the
///   loading line appears.
/// - Exits when an event handler asks to, or when every channel has closed.
pub async fn run_event_loop(
    terminal: &mut Option<Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>>,
    app: &mut AppState,
    channels: &mut Channels,
) {
    loop {
        if let Some(t) = terminal.as_mut() {
            let _ = t.draw(|f| ui(f, app));
        }
        if check_sentinel(app, &channels.fetch_tx) {
            continue;
        }
        if process_channel_messages(app, channels).await {
            break;
        }
    }
}
