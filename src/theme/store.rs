use std::fs;
use std::sync::{OnceLock, RwLock};

use super::parsing::parse_theme;
use super::paths::resolve_theme_config_path;
use super::types::Theme;

/// Global theme store with live-reload capability.
static THEME_STORE: OnceLock<RwLock<Theme>> = OnceLock::new();

/// What: Read `theme.conf` if present, logging rejected entries.
///
/// Output:
/// - The configured palette, or the default palette when no file exists.
fn load_theme() -> Theme {
    let Some(path) = resolve_theme_config_path() else {
        return Theme::default();
    };
    match fs::read_to_string(&path) {
        Ok(content) => {
            let (theme, errors) = parse_theme(&content);
            for e in &errors {
                tracing::warn!(path = %path.display(), problem = %e, "theme entry ignored");
            }
            tracing::info!(path = %path.display(), "loaded theme configuration");
            theme
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "theme.conf unreadable, using defaults");
            Theme::default()
        }
    }
}

/// Return the application's theme palette, loading from `theme.conf` on first use.
///
/// Format: key = value, one per line; values are colors as "#RRGGBB" or "R,G,B".
pub fn theme() -> Theme {
    let lock = THEME_STORE.get_or_init(|| RwLock::new(load_theme()));
    lock.read().map_or_else(|poisoned| *poisoned.into_inner(), |t| *t)
}

/// Reload the theme from disk without restarting the app.
pub fn reload_theme() {
    let new_theme = load_theme();
    let lock = THEME_STORE.get_or_init(|| RwLock::new(new_theme));
    if let Ok(mut guard) = lock.write() {
        *guard = new_theme;
    }
}
