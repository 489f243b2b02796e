use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::logic::PaginatedSearchView;
use crate::state::{AppState, FetchStatus};
use crate::theme::{KeyChord, Theme, theme};

/// What: Text shown at the end of the grid for the current request state.
///
/// Output:
/// - `"Loading..."` while a request is in flight, the error message verbatim after a
///   failure, `"No results"` / `"End of results"` once the last page arrived,
///   `"Scroll for more"` otherwise, and an empty string before the first request.
#[must_use]
pub fn sentinel_label(view: &PaginatedSearchView) -> String {
    match view.status() {
        FetchStatus::Loading => "Loading...".to_string(),
        FetchStatus::Error(e) => e.message().to_string(),
        FetchStatus::Idle => match view.page_info() {
            None => String::new(),
            Some(info) if info.has_next_page => "Scroll for more".to_string(),
            Some(_) if view.items().is_empty() => "No results".to_string(),
            Some(_) => "End of results".to_string(),
        },
    }
}

/// Colour of the sentinel label for the current request state.
pub(super) fn sentinel_style(view: &PaginatedSearchView, th: &Theme) -> Style {
    match view.status() {
        FetchStatus::Loading => Style::default().fg(th.yellow),
        FetchStatus::Error(_) => Style::default().fg(th.red).add_modifier(Modifier::BOLD),
        FetchStatus::Idle => Style::default().fg(th.overlay2),
    }
}

/// What: Draw the status line: request state on the left, loaded count on the right.
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let count = app.view.items().len();
    let right = app.view.page_info().map_or_else(
        || format!("{count} loaded "),
        |info| format!("{count} loaded · page {} ", info.current_page),
    );
    let left_room = usize::from(area.width).saturating_sub(right.chars().count() + 2);
    let left = crate::util::truncate_to_width(&sentinel_label(&app.view), left_room);
    let pad = usize::from(area.width)
        .saturating_sub(1 + unicode_width::UnicodeWidthStr::width(left.as_str()))
        .saturating_sub(right.chars().count());
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(left, sentinel_style(&app.view, &th)),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, Style::default().fg(th.subtext1)),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(th.mantle)),
        area,
    );
}

/// What: Draw the key hint footer from the configured key map.
///
/// Details:
/// - Each action shows its first bound chord; unbound actions are omitted.
/// - Retry is only listed while the last request failed.
pub fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let km = &app.keymap;
    let key_style = Style::default().fg(th.text).add_modifier(Modifier::BOLD);
    let sep = Span::styled("  |  ", Style::default().fg(th.surface2));

    let mut hints: Vec<(Option<&KeyChord>, &str)> = vec![
        (km.exit.first(), "Exit"),
        (km.clear_search.first(), "Clear search"),
        (km.jump_top.first(), "Top"),
        (km.jump_bottom.first(), "Bottom"),
        (km.reload_theme.first(), "Reload theme"),
        (km.toggle_footer.first(), "Hide keys"),
    ];
    if app.view.error().is_some() {
        hints.insert(1, (km.retry.first(), "Retry"));
    }

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (chord, label) in hints {
        let Some(k) = chord else {
            continue;
        };
        if spans.len() > 1 {
            spans.push(sep.clone());
        }
        spans.extend([
            Span::styled(format!("[{}]", k.label()), key_style),
            Span::styled(format!(" {label}"), Style::default().fg(th.subtext0)),
        ]);
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(th.base)),
        area,
    );
}
