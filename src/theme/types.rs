use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Color;

use crate::state::MediaSort;

/// Application theme palette used by rendering code.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widgets and styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Slightly lighter background layer used behind panels.
    pub mantle: Color,
    /// Darkest background shade for deep contrast areas.
    pub crust: Color,
    /// Subtle surface color for component backgrounds (level 1).
    pub surface1: Color,
    /// Subtle surface color for component backgrounds (level 2).
    pub surface2: Color,
    /// Muted overlay line/border color (primary).
    pub overlay1: Color,
    /// Muted overlay line/border color (secondary).
    pub overlay2: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext0: Color,
    /// Tertiary text for captions and low-emphasis content.
    pub subtext1: Color,
    /// Accent color for the selected card and interactive highlights.
    pub sapphire: Color,
    /// Accent color for headings.
    pub mauve: Color,
    /// Scores and positive states.
    pub green: Color,
    /// Loading and attention states.
    pub yellow: Color,
    /// Error messages.
    pub red: Color,
    /// Accent color for subtle emphasis and borders.
    pub lavender: Color,
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self {
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            mantle: Color::Rgb(0x18, 0x18, 0x25),
            crust: Color::Rgb(0x11, 0x11, 0x1b),
            surface1: Color::Rgb(0x45, 0x47, 0x5a),
            surface2: Color::Rgb(0x58, 0x5b, 0x70),
            overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
            overlay2: Color::Rgb(0x93, 0x99, 0xb2),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            subtext1: Color::Rgb(0xba, 0xc2, 0xde),
            sapphire: Color::Rgb(0x74, 0xc7, 0xec),
            mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
        }
    }
}

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// GraphQL endpoint of the media catalog.
    pub api_endpoint: String,
    /// Number of items requested per page.
    pub per_page: u32,
    /// Sort keys sent with every request, in priority order.
    pub sort: Vec<MediaSort>,
    /// Quiet period before typed search text is sent, in milliseconds.
    pub search_debounce_ms: u64,
    /// Card rows below the visible grid that already count as "near the end".
    pub sentinel_margin_rows: usize,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Whether the key hint footer is shown.
    pub show_keybinds_footer: bool,
    /// Configurable key bindings.
    pub keymap: KeyMap,
}

/// Largest page size the catalog accepts.
pub const MAX_PER_PAGE: u32 = 50;

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: crate::sources::DEFAULT_ENDPOINT.to_string(),
            per_page: 20,
            sort: MediaSort::DEFAULT_ORDER.to_vec(),
            search_debounce_ms: 500,
            sentinel_margin_rows: 1,
            request_timeout_secs: 15,
            show_keybinds_footer: true,
            keymap: KeyMap::default(),
        }
    }
}

/// A single keyboard chord (modifiers + key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Key code.
    pub code: KeyCode,
    /// Required modifiers.
    pub mods: KeyModifiers,
}

impl KeyChord {
    /// What: Build a chord without modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }

    /// What: Build a `Ctrl+<ch>` chord.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            mods: KeyModifiers::CONTROL,
        }
    }

    /// What: Check whether a key event matches this chord.
    ///
    /// Details:
    /// - Character keys compare case-insensitively; `Shift` is ignored for them.
    #[must_use]
    pub fn matches(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        match (self.code, code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                a.eq_ignore_ascii_case(&b)
                    && self.mods.difference(KeyModifiers::SHIFT)
                        == mods.difference(KeyModifiers::SHIFT)
            }
            (a, b) => a == b && self.mods == mods,
        }
    }

    /// Return a short display label such as "Ctrl+R", "F5", "Esc".
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts: Vec<&'static str> = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        if self.mods.contains(KeyModifiers::SUPER) {
            parts.push("Super");
        }
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(ch) => ch.to_ascii_uppercase().to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };
        if parts.is_empty() {
            key
        } else {
            format!("{}+{}", parts.join("+"), key)
        }
    }
}

/// Configurable actions and the chords bound to them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    /// Leave the application.
    pub exit: Vec<KeyChord>,
    /// Re-issue the last request after a failure.
    pub retry: Vec<KeyChord>,
    /// Empty the search box.
    pub clear_search: Vec<KeyChord>,
    /// Jump to the first card.
    pub jump_top: Vec<KeyChord>,
    /// Jump to the last loaded card.
    pub jump_bottom: Vec<KeyChord>,
    /// Show or hide the key hint footer.
    pub toggle_footer: Vec<KeyChord>,
    /// Re-read `theme.conf`.
    pub reload_theme: Vec<KeyChord>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            exit: vec![KeyChord::ctrl('c'), KeyChord::plain(KeyCode::Esc)],
            retry: vec![KeyChord::plain(KeyCode::F(5)), KeyChord::ctrl('r')],
            clear_search: vec![KeyChord::ctrl('u')],
            jump_top: vec![KeyChord::plain(KeyCode::Home)],
            jump_bottom: vec![KeyChord::plain(KeyCode::End)],
            toggle_footer: vec![KeyChord::plain(KeyCode::F(1))],
            reload_theme: vec![KeyChord::ctrl('t')],
        }
    }
}

/// What: Check whether any chord in `chords` matches the key event.
#[must_use]
pub fn any_matches(chords: &[KeyChord], code: KeyCode, mods: KeyModifiers) -> bool {
    chords.iter().any(|c| c.matches(code, mods))
}
