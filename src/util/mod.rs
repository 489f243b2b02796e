//! Small helpers for text layout and time formatting shared by the UI, the
//! `--list` printer and the log timer.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What: Cut `s` so it occupies at most `max` terminal cells.
///
/// Inputs:
/// - `s`: Text to fit.
/// - `max`: Available width in cells.
///
/// Output:
/// - `s` unchanged when it fits, otherwise a prefix ending in `…` whose display width is `<= max`.
///
/// Details:
/// - Uses display width, not byte length, so CJK titles (two cells per glyph) are cut correctly.
#[must_use]
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut used = 0usize;
    let mut out = String::with_capacity(s.len().min(max * 4));
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// What: Render a large count compactly (`950`, `12.3k`, `1.2M`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compact_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format!("{:.1}k", n as f64 / 1_000.0),
        _ => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}

/// What: Current local time as `YYYY-MM-DD-T HH:MM:SS`, the log line prefix.
#[must_use]
pub fn log_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string()
}
