use crossterm::event::{KeyCode, KeyEvent};

use crate::logic::navigation::{jump_bottom, jump_top, move_selection, page_selection};
use crate::state::AppState;
use crate::theme::any_matches;

/// What: Move the card selection for navigation keys.
///
/// Output:
/// - `true` when the key was a navigation key and has been consumed.
pub fn handle_grid_key(ke: KeyEvent, app: &mut AppState) -> bool {
    if any_matches(&app.keymap.jump_top, ke.code, ke.modifiers) {
        jump_top(app);
        return true;
    }
    if any_matches(&app.keymap.jump_bottom, ke.code, ke.modifiers) {
        jump_bottom(app);
        return true;
    }
    match ke.code {
        KeyCode::Up => move_selection(app, 0, -1),
        KeyCode::Down => move_selection(app, 0, 1),
        KeyCode::Left => move_selection(app, -1, 0),
        KeyCode::Right => move_selection(app, 1, 0),
        KeyCode::PageUp => page_selection(app, -1),
        KeyCode::PageDown => page_selection(app, 1),
        _ => return false,
    }
    true
}
