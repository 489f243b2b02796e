use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Color;

use super::types::{KeyChord, Theme};

/// Named keys accepted in `keybind_*` values (matched case-insensitively).
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("tab", KeyCode::Tab),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pgup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("space", KeyCode::Char(' ')),
];

/// What: Turn one key token (`F5`, `Esc`, `PgDn`, `r`) into a [`KeyCode`].
///
/// Output:
/// - `None` for empty, multi-character or unknown tokens.
///
/// Details:
/// - Letters are stored lowercase; chord matching ignores case.
pub(crate) fn parse_key_identifier(s: &str) -> Option<KeyCode> {
    let token = s.trim();
    if let Some(n) = token
        .strip_prefix(['F', 'f'])
        .and_then(|rest| rest.parse::<u8>().ok())
    {
        return Some(KeyCode::F(n));
    }
    if let Some((_, code)) = NAMED_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
    {
        return Some(*code);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(KeyCode::Char(ch.to_ascii_lowercase())),
        _ => None,
    }
}

/// What: Parse a full key chord such as "Ctrl+R" or "Alt+F5" into a [`KeyChord`].
///
/// Inputs:
/// - `spec`: Optional modifiers joined with `+`, followed by a key token.
///
/// Output:
/// - `Some(KeyChord)` when parsing succeeds; `None` when the key token is missing or unknown.
pub(crate) fn parse_key_chord(spec: &str) -> Option<KeyChord> {
    let mut mods = KeyModifiers::empty();
    let mut key_part: Option<&str> = None;
    for part in spec.split('+') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        match p.to_ascii_uppercase().as_str() {
            "CTRL" | "CONTROL" => mods |= KeyModifiers::CONTROL,
            "ALT" => mods |= KeyModifiers::ALT,
            "SHIFT" => mods |= KeyModifiers::SHIFT,
            "SUPER" | "META" | "WIN" => mods |= KeyModifiers::SUPER,
            _ => key_part = Some(p),
        }
    }
    let code = parse_key_identifier(key_part?)?;
    Some(KeyChord { code, mods })
}

/// What: Parse a color literal from configuration text into a [`Color`].
///
/// Inputs:
/// - `s`: Value text; a trailing inline comment is ignored.
///
/// Output:
/// - `Some(Color)` for `#RRGGBB`, `RRGGBB` or `R,G,B`; `None` otherwise.
pub(crate) fn parse_color_value(s: &str) -> Option<Color> {
    let t = strip_inline_comment(s);
    if t.is_empty() {
        return None;
    }
    let h = t.strip_prefix('#').unwrap_or(t);
    if h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&h[0..2], 16).ok()?;
        let g = u8::from_str_radix(&h[2..4], 16).ok()?;
        let b = u8::from_str_radix(&h[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    let parts: Vec<&str> = t.split(',').map(str::trim).collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }
    None
}

/// What: Remove inline comments from a configuration value while preserving leading hex markers.
///
/// Inputs:
/// - `s`: Raw configuration value that may include inline comments.
///
/// Output:
/// - Comment-free & trimmed substring of the input.
///
/// Details:
/// - A comment starts at `//` or `#` that opens the value or follows whitespace, so
///   `#RRGGBB` colours and URLs such as `https://host/graphql` survive intact.
/// - A leading `#` is part of the value.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let s = s.trim();
    let starts_comment = |i: usize| i == 0 || s[..i].ends_with(char::is_whitespace);
    let slash = s
        .match_indices("//")
        .map(|(i, _)| i)
        .find(|&i| starts_comment(i));
    let hash = s
        .match_indices('#')
        .map(|(i, _)| i)
        .find(|&i| i > 0 && starts_comment(i));
    let cut = match (slash, hash) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    cut.map_or(s, |i| &s[..i]).trim()
}

/// What: Split configuration text into normalized `(key, value, line_no)` triples.
///
/// Details:
/// - Skips blank lines, `#`/`//` comment lines and lines without `=`.
/// - Keys are lowercased with `.`, `-` and spaces folded to `_`.
pub(crate) fn config_entries(content: &str) -> impl Iterator<Item = (String, &str, usize)> {
    content.lines().enumerate().filter_map(|(idx, line)| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            return None;
        }
        let (raw_key, raw_val) = trimmed.split_once('=')?;
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        Some((key, strip_inline_comment(raw_val.trim()), idx + 1))
    })
}

/// What: Map a normalized theme key to the palette slot it sets.
///
/// Output:
/// - Mutable reference to the slot, or `None` for unknown keys.
fn theme_slot<'a>(theme: &'a mut Theme, key: &str) -> Option<&'a mut Color> {
    Some(match key {
        "base" | "background" | "background_base" => &mut theme.base,
        "mantle" | "background_mantle" => &mut theme.mantle,
        "crust" | "background_crust" => &mut theme.crust,
        "surface1" | "surface_level1" => &mut theme.surface1,
        "surface2" | "surface_level2" => &mut theme.surface2,
        "overlay1" | "overlay_primary" | "border_primary" => &mut theme.overlay1,
        "overlay2" | "overlay_secondary" | "border_secondary" => &mut theme.overlay2,
        "text" | "text_primary" => &mut theme.text,
        "subtext0" | "text_secondary" => &mut theme.subtext0,
        "subtext1" | "text_tertiary" => &mut theme.subtext1,
        "sapphire" | "accent_interactive" | "accent_selection" => &mut theme.sapphire,
        "mauve" | "accent_heading" => &mut theme.mauve,
        "green" | "semantic_success" | "score" => &mut theme.green,
        "yellow" | "semantic_warning" | "loading" => &mut theme.yellow,
        "red" | "semantic_error" | "error" => &mut theme.red,
        "lavender" | "accent_emphasis" | "accent_border" => &mut theme.lavender,
        _ => return None,
    })
}

/// What: Apply `theme.conf` overrides on top of the default palette.
///
/// Inputs:
/// - `content`: File contents (`key = color` lines).
///
/// Output:
/// - The resulting theme plus one diagnostic line per rejected entry.
pub(crate) fn parse_theme(content: &str) -> (Theme, Vec<String>) {
    let mut theme = Theme::default();
    let mut errors = Vec::new();
    for (key, value, line_no) in config_entries(content) {
        let Some(slot) = theme_slot(&mut theme, &key) else {
            errors.push(format!("- Unknown key '{key}' on line {line_no}"));
            continue;
        };
        match parse_color_value(value) {
            Some(c) => *slot = c,
            None => errors.push(format!(
                "- Invalid color for '{key}' on line {line_no} (use #RRGGBB or R,G,B)"
            )),
        }
    }
    (theme, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Key tokens and chords from `keybind_*` values.
    ///
    /// Inputs:
    /// - Tokens `F5`, `?`, `Backspace`, `PgDn`; chords `Ctrl+R`, `alt + home`, `Ctrl+`.
    ///
    /// Output:
    /// - Expected key codes and modifiers; a chord without a key is rejected.
    fn keybind_tokens_and_chords() {
        assert_eq!(parse_key_identifier("PgDn"), Some(KeyCode::PageDown));
        assert_eq!(parse_key_identifier("enter!"), None);
        assert_eq!(parse_key_identifier("F5"), Some(KeyCode::F(5)));
        assert_eq!(parse_key_identifier("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key_identifier("Backspace"), Some(KeyCode::Backspace));
        let kc = parse_key_chord("Ctrl+R").expect("chord");
        assert_eq!(kc.code, KeyCode::Char('r'));
        assert!(kc.mods.contains(KeyModifiers::CONTROL));
        let home = parse_key_chord("alt + home").expect("chord");
        assert_eq!(home.code, KeyCode::Home);
        assert!(home.mods.contains(KeyModifiers::ALT));
        assert!(parse_key_chord("Ctrl+").is_none());
    }

    #[test]
    /// What: Validate colour parsing for hex and decimal forms.
    fn parsing_color_values() {
        assert_eq!(parse_color_value("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_color_value("255,0,10"), Some(Color::Rgb(255, 0, 10)));
        assert_eq!(parse_color_value("#00ff00 // green"), Some(Color::Rgb(0, 255, 0)));
        assert!(parse_color_value("256,0,0").is_none());
        assert!(parse_color_value("").is_none());
    }

    #[test]
    /// What: Check inline comment stripping keeps colour literals while removing trailing annotations.
    fn parsing_strip_inline_comment_variants() {
        assert_eq!(strip_inline_comment("#foo"), "#foo");
        assert_eq!(strip_inline_comment("abc // hi"), "abc");
        assert_eq!(strip_inline_comment("#ff00ff # tail"), "#ff00ff");
        assert_eq!(strip_inline_comment("20 # per page"), "20");
        assert_eq!(
            strip_inline_comment("https://graphql.anilist.co // public"),
            "https://graphql.anilist.co"
        );
    }

    #[test]
    /// What: Theme overrides apply by canonical and alias names and report bad lines.
    ///
    /// Inputs:
    /// - One valid alias, one invalid colour, one unknown key.
    ///
    /// Output:
    /// - Overridden `red`, defaults elsewhere, two diagnostics with line numbers.
    fn theme_overrides_and_diagnostics() {
        let (theme, errors) =
            parse_theme("semantic_error = #ff0000\n# comment\ntext = nope\nsparkle = #000000\n");
        assert_eq!(theme.red, Color::Rgb(255, 0, 0));
        assert_eq!(theme.base, Theme::default().base);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("line 3"));
        assert!(errors[1].contains("Unknown key 'sparkle'"));
    }
}
