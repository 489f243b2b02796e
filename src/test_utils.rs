//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use crate::state::{CoverImage, MediaItem, MediaTitle};

/// What: Build a minimal catalog entry for tests.
///
/// Inputs:
/// - `id`: Catalog id; also used in the romaji title (`"Title {id}"`).
///
/// Output:
/// - `MediaItem` with a title, a TV format and nothing else set.
#[must_use]
pub fn media_item(id: u64) -> MediaItem {
    MediaItem {
        id,
        title: MediaTitle {
            romaji: Some(format!("Title {id}")),
            english: None,
            native: None,
        },
        cover_image: CoverImage::default(),
        average_score: None,
        popularity: None,
        format: Some("TV".to_string()),
        episodes: None,
        season: None,
        season_year: None,
        genres: Vec::new(),
        status: None,
    }
}

/// What: Build `n` consecutive test items with ids starting at `start`.
#[must_use]
pub fn media_items(start: u64, n: u64) -> Vec<MediaItem> {
    (start..start + n).map(media_item).collect()
}
