use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::logic::navigation::{columns_for_width, ensure_selection_visible, total_rows};
use crate::logic::sentinel::GridViewport;
use crate::state::{AppState, CARD_HEIGHT, MediaItem};
use crate::theme::{Theme, parse_color_value, theme};
use crate::util::{compact_count, truncate_to_width};

use super::status::{sentinel_label, sentinel_style};

/// What: Draw the card grid and the trailing sentinel row.
///
/// Inputs:
/// - `f`: Frame to render into.
/// - `app`: Application state; columns, grid area and viewport are written back.
/// - `area`: Grid area.
///
/// Details:
/// - Columns follow the terminal width breakpoints; each card row is `CARD_HEIGHT` lines.
/// - A partly visible last row counts as visible and is drawn clipped, so a grid
///   shorter than one card still shows a row and can reach the sentinel.
/// - The scroll offset is clamped after a resize and the selection kept on screen.
/// - The row after the last card row is the sentinel; when it is on screen it shows
///   the request state ("Loading...", the error, "End of results").
pub fn render_grid(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let cols = columns_for_width(area.width);
    let visible_rows = usize::from(area.height.div_ceil(CARD_HEIGHT));
    let item_count = app.view.items().len();
    let rows = total_rows(item_count, cols);

    app.grid_columns = cols;
    app.grid_rect = Some(area);
    app.grid_viewport = Some(GridViewport {
        first_row: app.scroll_row,
        visible_rows,
        total_rows: rows,
    });
    let max_first = (rows + 1).saturating_sub(visible_rows.max(1));
    app.scroll_row = app.scroll_row.min(max_first);
    if item_count > 0 {
        app.selected = app.selected.min(item_count - 1);
        ensure_selection_visible(app);
    }
    if let Some(vp) = app.grid_viewport.as_mut() {
        vp.first_row = app.scroll_row;
    }

    let cols_u16 = u16::try_from(cols).unwrap_or(1);
    let card_w = (area.width / cols_u16).max(1);
    for row_off in 0..visible_rows {
        let row = app.scroll_row + row_off;
        let y = area.y + u16::try_from(row_off).unwrap_or(0) * CARD_HEIGHT;
        let row_h = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        if row == rows {
            let mid_y = y + row_h.saturating_sub(1).min(CARD_HEIGHT / 2);
            let mid = Rect::new(area.x, mid_y, area.width, 1);
            let label = Paragraph::new(sentinel_label(&app.view))
                .style(sentinel_style(&app.view, &th))
                .alignment(Alignment::Center);
            f.render_widget(label, mid);
            break;
        }
        for col in 0..cols {
            let idx = row * cols + col;
            let Some(item) = app.view.items().get(idx) else {
                break;
            };
            let x = area.x + u16::try_from(col).unwrap_or(0) * card_w;
            let rect = Rect::new(x, y, card_w, row_h);
            render_card(f, item, rect, idx == app.selected, &th);
        }
    }
}

/// What: Draw a single media card.
///
/// Details:
/// - Rounded block titled with the display title, then score/format/episodes,
///   season and status, genres, popularity and a swatch of the cover colour.
fn render_card(f: &mut Frame, item: &MediaItem, rect: Rect, selected: bool, th: &Theme) {
    let accent = if selected { th.sapphire } else { th.surface1 };
    let inner_w = usize::from(rect.width.saturating_sub(2));
    let title_style = if selected {
        Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(th.text).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            format!(
                " {} ",
                truncate_to_width(item.display_title(), inner_w.saturating_sub(2))
            ),
            title_style,
        ))
        .style(Style::default().bg(th.mantle));

    let fit = |s: &str| truncate_to_width(s, inner_w);
    let mut lines = vec![
        Line::from(Span::styled(
            fit(&item.summary_line()),
            Style::default().fg(th.green),
        )),
        Line::from(Span::styled(
            fit(&item.season_line()),
            Style::default().fg(th.subtext0),
        )),
        Line::from(Span::styled(
            fit(&item.genres.join(" · ")),
            Style::default().fg(th.lavender),
        )),
    ];
    lines.push(item.popularity.map_or_else(Line::default, |p| {
        Line::from(Span::styled(
            fit(&format!("♥ {}", compact_count(p))),
            Style::default().fg(th.yellow),
        ))
    }));
    if let Some(raw) = item.cover_image.color.as_deref()
        && let Some(color) = parse_color_value(raw)
    {
        lines.push(Line::from(vec![
            Span::styled("■■■ ", Style::default().fg(color)),
            Span::styled(fit(raw), Style::default().fg(th.overlay1)),
        ]));
    }
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
