use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::state::AppState;
use crate::theme::theme;
use crate::util::truncate_to_width;

/// Shown in the empty search box.
const PLACEHOLDER: &str = "Search Anime";

/// What: Draw the one-line header naming the active listing.
///
/// Details:
/// - Shows "Trending" before any search term is set, otherwise the term the
///   last request was issued with (not the still-being-typed input).
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let heading = app
        .view
        .search_state()
        .search_term
        .as_deref()
        .map_or_else(|| "Trending".to_string(), |t| format!("Results for \"{t}\""));
    let brand = " Anisea ";
    let room = usize::from(area.width).saturating_sub(brand.width() + 2);
    let line = Line::from(vec![
        Span::styled(
            brand,
            Style::default()
                .fg(th.crust)
                .bg(th.mauve)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            truncate_to_width(&heading, room),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(th.base)),
        area,
    );
}

/// What: Draw the search box and place the terminal caret after the typed text.
///
/// Inputs:
/// - `f`: Frame to render into.
/// - `app`: Provides the input line.
/// - `area`: Box area including the border.
///
/// Details:
/// - An empty box shows a dimmed placeholder; the caret then sits at the start.
/// - Text wider than the box is shown by its tail so the caret stays visible.
pub fn render_search(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.sapphire))
        .style(Style::default().bg(th.base));
    let inner = block.inner(area);
    let room = usize::from(inner.width.saturating_sub(3));

    let (shown, style) = if app.input.is_empty() {
        (
            PLACEHOLDER.to_string(),
            Style::default().fg(th.overlay1).add_modifier(Modifier::ITALIC),
        )
    } else {
        (tail_to_width(&app.input, room), Style::default().fg(th.text))
    };
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(th.sapphire)),
        Span::styled(shown.clone(), style),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);

    if inner.width > 0 && inner.height > 0 {
        let typed = if app.input.is_empty() { 0 } else { shown.width() };
        let offset = u16::try_from(2 + typed).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset.min(inner.width.saturating_sub(1)));
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

/// What: Keep the last characters of `s` that fit in `max` cells.
fn tail_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut used = 0usize;
    let mut kept: Vec<char> = Vec::new();
    for ch in s.chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        kept.push(ch);
    }
    kept.into_iter().rev().collect()
}
