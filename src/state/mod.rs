//! Application state and the value types it is built from.

pub mod app_state;
pub mod types;

pub use app_state::{AppState, CARD_HEIGHT};
pub use types::{
    CoverImage, FetchStatus, MediaItem, MediaSort, MediaTitle, Page, PageInfo, PageResult,
    QueryVariables, SearchState, humanize_enum,
};
