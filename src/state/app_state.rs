//! Central `AppState` container.

use ratatui::layout::Rect;

use crate::logic::pagination::PaginatedSearchView;
use crate::logic::sentinel::{GridViewport, Sentinel};
use crate::theme::{KeyMap, Settings};

/// Height of one card row in terminal lines.
pub const CARD_HEIGHT: u16 = 7;

/// Global application state shared by the event, networking, and UI layers.
///
/// The paginated view is the only owner of the result list; everything else
/// here is presentation state (input line, selection, scroll, layout).
#[derive(Debug)]
pub struct AppState {
    /// Result list and request state machine.
    pub view: PaginatedSearchView,
    /// Current search box text.
    pub input: String,
    /// Index into `view.items()` of the highlighted card.
    pub selected: usize,
    /// First card row shown in the grid.
    pub scroll_row: usize,
    /// Cards per row, as chosen by the last draw.
    pub grid_columns: usize,
    /// Grid rows as recorded by the last draw.
    pub grid_viewport: Option<GridViewport>,
    /// Screen area of the grid, for mouse hit-testing.
    pub grid_rect: Option<Rect>,
    /// End-of-grid visibility trigger.
    pub sentinel: Sentinel,
    /// Key bindings.
    pub keymap: KeyMap,
    /// Whether the key hint footer is drawn.
    pub show_keybinds_footer: bool,
    /// Responses dropped because their search was superseded.
    pub stale_responses: u64,
}

impl AppState {
    /// What: Build the initial state from settings.
    ///
    /// Inputs:
    /// - `settings`: Page size, sort order, sentinel margin, key bindings.
    /// - `initial_search`: Optional search term the first request uses.
    ///
    /// Output:
    /// - Idle state with an empty list; the search box shows `initial_search`.
    #[must_use]
    pub fn new(settings: &Settings, initial_search: Option<&str>) -> Self {
        let view = PaginatedSearchView::new(settings.per_page, settings.sort.clone())
            .with_initial_search(initial_search);
        Self {
            view,
            input: initial_search.unwrap_or_default().to_string(),
            selected: 0,
            scroll_row: 0,
            grid_columns: 1,
            grid_viewport: None,
            grid_rect: None,
            sentinel: Sentinel::new(settings.sentinel_margin_rows),
            keymap: settings.keymap.clone(),
            show_keybinds_footer: settings.show_keybinds_footer,
            stale_responses: 0,
        }
    }

    /// What: Reset selection and scroll to the top of the grid.
    pub const fn reset_selection(&mut self) {
        self.selected = 0;
        self.scroll_row = 0;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Initial state mirrors settings and the optional initial search.
    ///
    /// Inputs:
    /// - Settings with `per_page = 5` and a margin of 2 rows; initial search "bebop".
    ///
    /// Output:
    /// - Input line shows "bebop" and the mount request carries it with page size 5.
    fn new_uses_settings_and_initial_search() {
        let settings = Settings {
            per_page: 5,
            sentinel_margin_rows: 2,
            ..Settings::default()
        };
        let mut app = AppState::new(&settings, Some("bebop"));
        assert_eq!(app.input, "bebop");
        assert_eq!(app.sentinel.margin_rows(), 2);
        let vars = app.view.mount();
        assert_eq!(vars.search.as_deref(), Some("bebop"));
        assert_eq!(vars.per_page, 5);
    }
}
