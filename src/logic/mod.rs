//! Core non-UI logic: pagination state machine, input debounce, end-of-grid
//! trigger, navigation and request plumbing.

pub mod debounce;
pub mod navigation;
pub mod pagination;
pub mod query;
pub mod sentinel;

pub use pagination::PaginatedSearchView;
pub use query::{apply_search, check_sentinel, send_fetch, send_query};
pub use sentinel::{GridViewport, Sentinel};
