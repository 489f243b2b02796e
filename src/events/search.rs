use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::send_query;
use crate::state::AppState;

/// What: Edit the search box for a key press and push the new text for debouncing.
///
/// Inputs:
/// - `ke`: Key event not consumed by global or grid bindings.
/// - `app`: Application state holding the input line.
/// - `query_tx`: Raw search text channel.
///
/// Output:
/// - `true` when the key edited the input.
///
/// Details:
/// - Printable characters (no Ctrl/Alt) append; Backspace removes the last character.
/// - Every edit sends the full text; the debounce worker keeps only the last one of a burst.
pub fn handle_input_key(
    ke: KeyEvent,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<String>,
) -> bool {
    let edited = match ke.code {
        KeyCode::Char(ch)
            if !ke
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.input.push(ch);
            true
        }
        KeyCode::Backspace => app.input.pop().is_some(),
        _ => false,
    };
    if edited {
        send_query(app, query_tx);
    }
    edited
}

/// What: Empty the search box.
///
/// Details:
/// - Sends the empty text like any other edit, which goes back to the unfiltered list.
pub fn clear_input(app: &mut AppState, query_tx: &mpsc::UnboundedSender<String>) {
    if app.input.is_empty() {
        return;
    }
    app.input.clear();
    send_query(app, query_tx);
}
