//! Card selection and grid scrolling.

use crate::state::AppState;

/// Terminal width from which the grid shows three columns.
pub const WIDE_MIN_WIDTH: u16 = 120;
/// Terminal width from which the grid shows two columns.
pub const MEDIUM_MIN_WIDTH: u16 = 80;

/// What: Pick the number of card columns for a grid of `width` cells.
///
/// Output:
/// - 3 on wide terminals, 2 on medium ones, 1 otherwise.
#[must_use]
pub const fn columns_for_width(width: u16) -> usize {
    if width >= WIDE_MIN_WIDTH {
        3
    } else if width >= MEDIUM_MIN_WIDTH {
        2
    } else {
        1
    }
}

/// What: Number of card rows needed for `items` cards in `columns` columns.
#[must_use]
pub const fn total_rows(items: usize, columns: usize) -> usize {
    items.div_ceil(if columns == 0 { 1 } else { columns })
}

/// Columns and visible rows of the last draw, with safe fallbacks before the first draw.
fn grid_dims(app: &AppState) -> (usize, usize) {
    let cols = app.grid_columns.max(1);
    let visible = app.grid_viewport.map_or(1, |vp| vp.visible_rows.max(1));
    (cols, visible)
}

/// What: Highest scroll offset, leaving room for the trailing sentinel row.
fn max_scroll(app: &AppState) -> usize {
    let (cols, visible) = grid_dims(app);
    (total_rows(app.view.items().len(), cols) + 1).saturating_sub(visible)
}

/// What: Scroll so the selected card's row is on screen.
pub fn ensure_selection_visible(app: &mut AppState) {
    let (cols, visible) = grid_dims(app);
    let row = app.selected / cols;
    if row < app.scroll_row {
        app.scroll_row = row;
    } else if row >= app.scroll_row + visible {
        app.scroll_row = row + 1 - visible;
    }
}

/// What: Move the selection by whole columns and rows.
///
/// Inputs:
/// - `app`: State with the current selection.
/// - `d_cols`: Horizontal step (negative is left).
/// - `d_rows`: Vertical step (negative is up).
///
/// Details:
/// - The result is clamped to the loaded items and the grid scrolls to keep it visible.
pub fn move_selection(app: &mut AppState, d_cols: isize, d_rows: isize) {
    let len = app.view.items().len();
    if len == 0 {
        app.selected = 0;
        return;
    }
    let (cols, _) = grid_dims(app);
    let cols = isize::try_from(cols).unwrap_or(isize::MAX);
    let delta = d_rows.saturating_mul(cols).saturating_add(d_cols);
    let target = app.selected.saturating_add_signed(delta);
    app.selected = target.min(len - 1);
    ensure_selection_visible(app);
}

/// What: Move the selection one screenful up (`-1`) or down (`+1`).
pub fn page_selection(app: &mut AppState, direction: isize) {
    let (_, visible) = grid_dims(app);
    let visible = isize::try_from(visible).unwrap_or(isize::MAX);
    move_selection(app, 0, direction.saturating_mul(visible));
}

/// What: Select the first card.
pub const fn jump_top(app: &mut AppState) {
    app.reset_selection();
}

/// What: Select the last loaded card.
pub fn jump_bottom(app: &mut AppState) {
    app.selected = app.view.items().len().saturating_sub(1);
    ensure_selection_visible(app);
}

/// What: Scroll the grid without moving the selection past the loaded items.
///
/// Inputs:
/// - `delta`: Rows to scroll (negative is up).
///
/// Details:
/// - The selection follows the viewport so it never leaves the screen.
pub fn scroll_by(app: &mut AppState, delta: isize) {
    let (cols, visible) = grid_dims(app);
    app.scroll_row = app.scroll_row.saturating_add_signed(delta).min(max_scroll(app));
    let row = app.selected / cols;
    let len = app.view.items().len();
    if row < app.scroll_row {
        app.selected = (app.scroll_row * cols).min(len.saturating_sub(1));
    } else if row >= app.scroll_row + visible {
        app.selected = ((app.scroll_row + visible - 1) * cols).min(len.saturating_sub(1));
    }
}

/// What: Select the card under a grid-relative cell position.
///
/// Inputs:
/// - `col_idx`: Card column that was clicked.
/// - `row_offset`: Card row offset from the top of the grid.
///
/// Output:
/// - `true` when the position holds a loaded card.
pub fn select_at(app: &mut AppState, col_idx: usize, row_offset: usize) -> bool {
    let (cols, _) = grid_dims(app);
    if col_idx >= cols {
        return false;
    }
    let idx = (app.scroll_row + row_offset) * cols + col_idx;
    if idx < app.view.items().len() {
        app.selected = idx;
        true
    } else {
        false
    }
}
