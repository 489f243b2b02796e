//! TUI rendering for Anisea.
//!
//! The screen is split into a header line, the search box, the card grid, a
//! status line and an optional key hint footer. Rendering is read-only except
//! for the grid geometry recorded into [`AppState`] for the sentinel check and
//! mouse hit-testing.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

use crate::state::AppState;
use crate::theme::theme;

mod cards;
mod header;
mod status;

pub use status::sentinel_label;

/// Rows taken by the search box including its border.
const SEARCH_HEIGHT: u16 = 3;

/// What: Draw one frame.
///
/// Inputs:
/// - `f`: Frame to render into.
/// - `app`: Application state; grid geometry is written back.
///
/// Details:
/// - Called once per event loop iteration before the sentinel check.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let footer_h = u16::from(app.show_keybinds_footer);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(footer_h),
        ])
        .split(area);

    header::render_header(f, app, chunks[0]);
    header::render_search(f, app, chunks[1]);
    cards::render_grid(f, app, chunks[2]);
    status::render_status(f, app, chunks[3]);
    if app.show_keybinds_footer {
        status::render_footer(f, app, chunks[4]);
    }
}
