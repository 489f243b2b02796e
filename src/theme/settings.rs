use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::state::MediaSort;
use crate::theme::parsing::{config_entries, parse_key_chord};
use crate::theme::paths::resolve_settings_config_path;
use crate::theme::types::{KeyChord, MAX_PER_PAGE, Settings};

/// What: Interpret a boolean settings value.
fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Replace the bindings of one action when the chord parses.
fn assign_keybind(chord: Option<KeyChord>, target: &mut Vec<KeyChord>) {
    if let Some(ch) = chord {
        *target = vec![ch];
    }
}

/// What: Parse `settings.conf` content into `settings`.
///
/// Inputs:
/// - `content`: File contents.
/// - `settings`: Settings to update in place; keys not present keep their value.
///
/// Output:
/// - Diagnostics for values that could not be applied.
///
/// Details:
/// - `per_page` is clamped to `1..=50`; `sort` takes a comma-separated list of sort keys.
/// - `keybind_<action>` entries take one chord each (e.g. `keybind_retry = Ctrl+R`).
pub fn parse_settings(content: &str, settings: &mut Settings) -> Vec<String> {
    let mut problems = Vec::new();
    for (key, val, line_no) in config_entries(content) {
        let applied = match key.as_str() {
            "api_endpoint" | "endpoint" => {
                if val.is_empty() {
                    false
                } else {
                    settings.api_endpoint = val.to_string();
                    true
                }
            }
            "per_page" | "page_size" => val
                .parse::<u32>()
                .map(|v| settings.per_page = v.clamp(1, MAX_PER_PAGE))
                .is_ok(),
            "sort" | "sort_order" => {
                let parsed: Option<Vec<MediaSort>> = val
                    .split(',')
                    .filter(|t| !t.trim().is_empty())
                    .map(MediaSort::from_config_key)
                    .collect();
                match parsed {
                    Some(v) if !v.is_empty() => {
                        settings.sort = v;
                        true
                    }
                    _ => false,
                }
            }
            "search_debounce_ms" | "debounce_ms" => val
                .parse::<u64>()
                .map(|v| settings.search_debounce_ms = v)
                .is_ok(),
            "sentinel_margin_rows" | "prefetch_rows" => val
                .parse::<usize>()
                .map(|v| settings.sentinel_margin_rows = v)
                .is_ok(),
            "request_timeout_secs" | "timeout_secs" => val
                .parse::<u64>()
                .map(|v| settings.request_timeout_secs = v.max(1))
                .is_ok(),
            "show_keybinds_footer" | "keybinds_visible" => parse_bool(val)
                .map(|b| settings.show_keybinds_footer = b)
                .is_some(),
            k if k.starts_with("keybind_") => {
                let chord = parse_key_chord(val);
                let km = &mut settings.keymap;
                let target = match k {
                    "keybind_exit" | "keybind_quit" => Some(&mut km.exit),
                    "keybind_retry" | "keybind_refetch" => Some(&mut km.retry),
                    "keybind_clear_search" => Some(&mut km.clear_search),
                    "keybind_jump_top" | "keybind_top" => Some(&mut km.jump_top),
                    "keybind_jump_bottom" | "keybind_bottom" => Some(&mut km.jump_bottom),
                    "keybind_toggle_footer" | "keybind_help" => Some(&mut km.toggle_footer),
                    "keybind_reload_theme" => Some(&mut km.reload_theme),
                    _ => None,
                };
                match target {
                    Some(t) if chord.is_some() => {
                        assign_keybind(chord, t);
                        true
                    }
                    _ => false,
                }
            }
            _ => {
                problems.push(format!("- Unknown key '{key}' on line {line_no}"));
                continue;
            }
        };
        if !applied {
            problems.push(format!("- Invalid value for '{key}' on line {line_no}"));
        }
    }
    problems
}

/// What: Load settings from a specific file, falling back to defaults.
///
/// Inputs:
/// - `path`: Path to a `settings.conf`.
///
/// Output:
/// - Defaults overlaid with every valid entry in the file.
#[must_use]
pub fn load_settings_from(path: &Path) -> Settings {
    let mut out = Settings::default();
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "[Config] Loaded settings.conf");
            for problem in parse_settings(&content, &mut out) {
                warn!(path = %path.display(), problem = %problem, "[Config] settings entry ignored");
            }
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "[Config] settings.conf unreadable, using defaults"
            );
        }
    }
    out
}

/// What: Load user settings from `settings.conf` under HOME/XDG.
///
/// Output:
/// - A `Settings` value; `Settings::default()` when no file exists.
#[must_use]
pub fn settings() -> Settings {
    resolve_settings_config_path().map_or_else(
        || {
            debug!("[Config] no settings.conf found, using defaults");
            Settings::default()
        },
        |p| load_settings_from(&p),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    /// What: Every supported key is applied and values are normalized.
    ///
    /// Inputs:
    /// - A settings file setting all keys, with comments and mixed-case keys.
    ///
    /// Output:
    /// - Matching `Settings` fields; `per_page` clamped to 50.
    fn parse_all_keys() {
        let mut s = Settings::default();
        let problems = parse_settings(
            "# Anisea settings\n\
             API_Endpoint = http://localhost:8080/graphql\n\
             per_page = 80 # too big\n\
             sort = score, newest\n\
             search-debounce-ms = 250\n\
             sentinel_margin_rows = 3\n\
             request_timeout_secs = 5\n\
             show_keybinds_footer = off\n\
             keybind_retry = Ctrl+R\n\
             keybind_exit = Ctrl+Q\n",
            &mut s,
        );
        assert!(problems.is_empty(), "{problems:?}");
        assert_eq!(s.api_endpoint, "http://localhost:8080/graphql");
        assert_eq!(s.per_page, 50);
        assert_eq!(s.sort, vec![MediaSort::ScoreDesc, MediaSort::StartDateDesc]);
        assert_eq!(s.search_debounce_ms, 250);
        assert_eq!(s.sentinel_margin_rows, 3);
        assert_eq!(s.request_timeout_secs, 5);
        assert!(!s.show_keybinds_footer);
        assert_eq!(
            s.keymap.retry,
            vec![KeyChord {
                code: KeyCode::Char('r'),
                mods: KeyModifiers::CONTROL
            }]
        );
        assert_eq!(s.keymap.exit.len(), 1);
    }

    #[test]
    /// What: Invalid and unknown entries are reported and leave defaults in place.
    ///
    /// Inputs:
    /// - Bad number, unknown sort key, unknown setting.
    ///
    /// Output:
    /// - Three diagnostics; defaults unchanged.
    fn invalid_entries_keep_defaults() {
        let mut s = Settings::default();
        let problems = parse_settings(
            "per_page = lots\nsort = trending, sideways\ncolour_scheme = dark\n",
            &mut s,
        );
        assert_eq!(problems.len(), 3);
        assert_eq!(s, Settings::default());
    }

    #[test]
    /// What: Loading from a file on disk overlays defaults; a missing file yields defaults.
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        std::fs::write(&path, "per_page = 10\n").expect("write");
        assert_eq!(load_settings_from(&path).per_page, 10);
        assert_eq!(
            load_settings_from(&dir.path().join("missing.conf")),
            Settings::default()
        );
    }
}
