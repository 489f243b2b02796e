//! Remote media catalog access.

use std::future::Future;

use crate::state::{Page, QueryVariables};

mod anilist;
mod error;

pub use anilist::{AniListClient, DEFAULT_ENDPOINT, MEDIA_PAGE_QUERY, decode_response};
pub use error::FetchFailed;

/// A catalog that serves paginated, sorted media records.
///
/// The runtime only talks to the catalog through this trait, so tests can swap in
/// an in-memory source.
pub trait MediaSource: Send + Sync + 'static {
    /// What: Fetch one page of results.
    ///
    /// Inputs:
    /// - `vars`: Search term, page, page size and sort keys.
    ///
    /// Output:
    /// - The decoded page, or a [`FetchFailed`] carrying a readable message.
    fn fetch_page(
        &self,
        vars: &QueryVariables,
    ) -> impl Future<Output = Result<Page, FetchFailed>> + Send;
}
