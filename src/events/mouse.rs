use crossterm::event::{MouseEvent, MouseEventKind};

use crate::logic::navigation::{scroll_by, select_at};
use crate::state::{AppState, CARD_HEIGHT};

/// Card rows scrolled per wheel notch.
const WHEEL_ROWS: isize = 1;

/// What: Handle mouse wheel scrolling and card selection by click.
///
/// Inputs:
/// - `m`: Mouse event.
/// - `app`: Application state with the grid area recorded by the last draw.
///
/// Details:
/// - Wheel events scroll the grid; the sentinel check after the next draw sees the new offset.
/// - A left click inside the grid selects the card under the cursor.
pub fn handle_mouse_event(m: MouseEvent, app: &mut AppState) {
    match m.kind {
        MouseEventKind::ScrollDown => scroll_by(app, WHEEL_ROWS),
        MouseEventKind::ScrollUp => scroll_by(app, -WHEEL_ROWS),
        MouseEventKind::Down(crossterm::event::MouseButton::Left) => {
            let Some(rect) = app.grid_rect else {
                return;
            };
            let inside = m.column >= rect.x
                && m.column < rect.x + rect.width
                && m.row >= rect.y
                && m.row < rect.y + rect.height;
            if !inside {
                return;
            }
            let cols = u16::try_from(app.grid_columns.max(1)).unwrap_or(1);
            let card_width = (rect.width / cols).max(1);
            let col_idx = usize::from((m.column - rect.x) / card_width);
            let row_offset = usize::from((m.row - rect.y) / CARD_HEIGHT);
            select_at(app, col_idx, row_offset);
        }
        _ => {}
    }
}
