//! Core value types used by Anisea state.

use serde::{Deserialize, Deserializer, Serialize};

use crate::sources::FetchFailed;

/// What: Deserialize a value that the catalog may send as `null`, falling back to `Default`.
///
/// Inputs:
/// - `deserializer`: Serde deserializer positioned at the field value.
///
/// Output:
/// - The decoded value, or `T::default()` when the field is `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Localised titles of a media entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTitle {
    /// Romanised title.
    pub romaji: Option<String>,
    /// Official English title, when licensed.
    pub english: Option<String>,
    /// Title in the original script.
    pub native: Option<String>,
}

/// Cover art reference for a media entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    /// URL of the large cover image.
    pub large: Option<String>,
    /// Dominant colour of the cover as `#RRGGBB`.
    pub color: Option<String>,
}

/// Display record for one catalog entry, rendered as a card in the grid.
///
/// Nothing in the pagination logic looks inside an item; the fields only feed
/// the card renderer and the `--list` output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Catalog identifier.
    pub id: u64,
    /// Titles in the available languages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: MediaTitle,
    /// Cover art.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_image: CoverImage,
    /// Weighted average score (0-100).
    #[serde(default)]
    pub average_score: Option<u32>,
    /// Number of users with the entry on their list.
    #[serde(default)]
    pub popularity: Option<u64>,
    /// Release format (`TV`, `MOVIE`, `OVA`, ...).
    #[serde(default)]
    pub format: Option<String>,
    /// Episode count when known.
    #[serde(default)]
    pub episodes: Option<u32>,
    /// Release season (`WINTER`, `SPRING`, ...).
    #[serde(default)]
    pub season: Option<String>,
    /// Release year of the season.
    #[serde(default)]
    pub season_year: Option<i32>,
    /// Genre names.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    /// Release status (`RELEASING`, `FINISHED`, ...).
    #[serde(default)]
    pub status: Option<String>,
}

impl MediaItem {
    /// What: Pick the title shown on cards.
    ///
    /// Output:
    /// - English title when present, otherwise romaji, otherwise native, otherwise `"Untitled"`.
    #[must_use]
    pub fn display_title(&self) -> &str {
        [&self.title.english, &self.title.romaji, &self.title.native]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }

    /// What: Build the one-line summary of score, format and episode count.
    ///
    /// Output:
    /// - e.g. `"84%  TV  24 eps"`; unknown parts are skipped.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(score) = self.average_score {
            parts.push(format!("{score}%"));
        }
        if let Some(format) = &self.format {
            parts.push(humanize_enum(format));
        }
        match self.episodes {
            Some(1) => parts.push("1 ep".to_string()),
            Some(n) => parts.push(format!("{n} eps")),
            None => {}
        }
        parts.join("  ")
    }

    /// What: Build the season/status line, e.g. `"Spring 2024 · Releasing"`.
    #[must_use]
    pub fn season_line(&self) -> String {
        let season = match (&self.season, self.season_year) {
            (Some(s), Some(y)) => format!("{} {y}", humanize_enum(s)),
            (Some(s), None) => humanize_enum(s),
            (None, Some(y)) => y.to_string(),
            (None, None) => String::new(),
        };
        match (&self.status, season.is_empty()) {
            (Some(st), true) => humanize_enum(st),
            (Some(st), false) => format!("{season} · {}", humanize_enum(st)),
            (None, _) => season,
        }
    }
}

/// What: Turn a catalog enum value such as `NOT_YET_RELEASED` into `"Not yet released"`.
///
/// Details:
/// - Short all-caps acronyms used as formats (`TV`, `OVA`, `ONA`) are kept as-is.
#[must_use]
pub fn humanize_enum(raw: &str) -> String {
    if raw.len() <= 3 || raw == "TV_SHORT" {
        return raw.replace('_', " ");
    }
    let lower = raw.replace('_', " ").to_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Pagination metadata returned with every page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based index of the page this metadata belongs to.
    pub current_page: u32,
    /// Whether the catalog has another page after this one.
    pub has_next_page: bool,
}

/// One page of results as returned by the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Items on this page in service order.
    pub items: Vec<MediaItem>,
    /// Position of this page within the result set.
    pub page_info: PageInfo,
}

/// Sort keys understood by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaSort {
    /// Currently trending first.
    TrendingDesc,
    /// Most popular first.
    PopularityDesc,
    /// Highest average score first.
    ScoreDesc,
    /// Most favourited first.
    FavouritesDesc,
    /// Newest first.
    StartDateDesc,
}

impl MediaSort {
    /// Sort order used when settings do not override it.
    pub const DEFAULT_ORDER: [Self; 2] = [Self::TrendingDesc, Self::PopularityDesc];

    /// What: Return the key used in `settings.conf` for this sort.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::TrendingDesc => "trending",
            Self::PopularityDesc => "popularity",
            Self::ScoreDesc => "score",
            Self::FavouritesDesc => "favourites",
            Self::StartDateDesc => "newest",
        }
    }

    /// What: Parse a sort key from settings, accepting the catalog's own names too.
    ///
    /// Inputs:
    /// - `s`: Config token, case-insensitive (e.g. `trending` or `TRENDING_DESC`).
    ///
    /// Output:
    /// - `Some(MediaSort)` when recognized; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trending" | "trending_desc" => Some(Self::TrendingDesc),
            "popularity" | "popular" | "popularity_desc" => Some(Self::PopularityDesc),
            "score" | "score_desc" => Some(Self::ScoreDesc),
            "favourites" | "favorites" | "favourites_desc" => Some(Self::FavouritesDesc),
            "newest" | "start_date_desc" => Some(Self::StartDateDesc),
            _ => None,
        }
    }
}

/// Variables sent with every catalog query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    /// Search term; `None` lists the whole catalog.
    pub search: Option<String>,
    /// 1-based page to fetch.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Sort keys in priority order.
    pub sort: Vec<MediaSort>,
}

/// The search the view is currently showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    /// Active search term; `None` means no filter.
    pub search_term: Option<String>,
    /// Page of the most recently issued request (always >= 1).
    pub current_page: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            search_term: None,
            current_page: 1,
        }
    }
}

impl SearchState {
    /// What: Switch to a new search term and go back to the first page.
    pub fn reset(&mut self, search_term: Option<String>) {
        self.search_term = search_term;
        self.current_page = 1;
    }
}

/// Request status of the paginated view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// No request in flight.
    #[default]
    Idle,
    /// A request has been issued and no response has arrived yet.
    Loading,
    /// The last request failed; the message is shown to the user.
    Error(FetchFailed),
}

/// Outcome of a catalog request, tagged with the variables that produced it.
#[derive(Clone, Debug)]
pub struct PageResult {
    /// Variables of the originating request.
    pub variables: QueryVariables,
    /// Page on success; the failure otherwise.
    pub result: Result<Page, FetchFailed>,
}
