//! Event handling layer for Anisea's TUI.
//!
//! `handle_event` applies global shortcuts first, then delegates to grid
//! navigation, search box editing and mouse handling.

use crossterm::event::{Event as CEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::logic::send_fetch;
use crate::state::{AppState, QueryVariables};
use crate::theme::any_matches;

mod grid;
mod mouse;
mod search;

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: Terminal event.
/// - `app`: Application state.
/// - `query_tx`: Raw search text channel (debounced downstream).
/// - `fetch_tx`: Fetch worker channel, used for manual retry.
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(
    ev: &CEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<String>,
    fetch_tx: &mpsc::UnboundedSender<QueryVariables>,
) -> bool {
    match ev {
        CEvent::Key(ke) if ke.kind == KeyEventKind::Press => {
            handle_key(*ke, app, query_tx, fetch_tx)
        }
        CEvent::Mouse(me) => {
            mouse::handle_mouse_event(*me, app);
            false
        }
        _ => false,
    }
}

/// What: Handle a key press.
///
/// Output:
/// - `true` when the exit binding was pressed.
fn handle_key(
    ke: KeyEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<String>,
    fetch_tx: &mpsc::UnboundedSender<QueryVariables>,
) -> bool {
    let km = &app.keymap;
    let (code, mods) = (ke.code, ke.modifiers);
    if any_matches(&km.exit, code, mods) {
        return true;
    }
    if any_matches(&km.retry, code, mods) {
        if app.view.error().is_some() {
            tracing::info!("manual retry of last request");
            send_fetch(app.view.refetch(), fetch_tx);
        }
        return false;
    }
    if any_matches(&km.toggle_footer, code, mods) {
        app.show_keybinds_footer = !app.show_keybinds_footer;
        return false;
    }
    if any_matches(&km.reload_theme, code, mods) {
        crate::theme::reload_theme();
        tracing::info!("theme reloaded");
        return false;
    }
    if any_matches(&km.clear_search, code, mods) {
        search::clear_input(app, query_tx);
        return false;
    }
    if grid::handle_grid_key(ke, app) {
        return false;
    }
    search::handle_input_key(ke, app, query_tx);
    false
}
