//! Incremental pagination and search-merge state for the results grid.
//!
//! [`PaginatedSearchView`] owns the accumulated result list and decides which
//! request to issue next. It performs no IO: every operation that wants a fetch
//! returns the [`QueryVariables`] to send, and the runtime hands them to the
//! fetch worker. Responses come back through [`PaginatedSearchView::on_page_received`]
//! or [`PaginatedSearchView::on_fetch_failed`].

use crate::sources::FetchFailed;
use crate::state::{FetchStatus, MediaItem, MediaSort, Page, PageInfo, QueryVariables, SearchState};

/// Accumulated results plus the request state machine (`Idle`, `Loading`, `Error`).
///
/// Invariants:
/// - `search.current_page >= 1`, and a new search term always resets it to 1.
/// - `items` is only changed by the merge rule in [`Self::on_page_received`].
/// - `page_info`, when set, belongs to a page of the current search term.
#[derive(Clone, Debug)]
pub struct PaginatedSearchView {
    /// Items of every page received for the current search, in arrival order.
    items: Vec<MediaItem>,
    /// Search term and page of the latest issued request.
    search: SearchState,
    /// Page size for every request.
    per_page: u32,
    /// Sort keys for every request.
    sort: Vec<MediaSort>,
    /// Most recently issued request.
    last_request: Option<QueryVariables>,
    /// Pagination metadata of the most recently received page.
    page_info: Option<PageInfo>,
    /// Request status.
    status: FetchStatus,
}

impl PaginatedSearchView {
    /// What: Create an idle view with an empty list.
    ///
    /// Inputs:
    /// - `per_page`: Page size (clamped to at least 1).
    /// - `sort`: Sort keys sent with every request.
    #[must_use]
    pub fn new(per_page: u32, sort: Vec<MediaSort>) -> Self {
        Self {
            items: Vec::new(),
            search: SearchState::default(),
            per_page: per_page.max(1),
            sort,
            last_request: None,
            page_info: None,
            status: FetchStatus::Idle,
        }
    }

    /// What: Preset the search term used by [`Self::mount`].
    ///
    /// Details:
    /// - Blank terms are treated as no search term.
    #[must_use]
    pub fn with_initial_search(mut self, text: Option<&str>) -> Self {
        self.search.reset(text.and_then(normalize_term));
        self
    }

    /// What: Issue the first request when the view is shown.
    ///
    /// Output:
    /// - Variables for page 1 of the current search term (none by default).
    pub fn mount(&mut self) -> QueryVariables {
        self.search.current_page = 1;
        self.page_info = None;
        let vars = self.variables_for(self.search.search_term.clone(), 1);
        self.issue(vars)
    }

    /// What: Start a new search from the (already debounced) input text.
    ///
    /// Inputs:
    /// - `text`: Search box contents; blank text clears the search term.
    ///
    /// Output:
    /// - Variables for page 1 of the new term.
    ///
    /// Details:
    /// - Does not cancel a request that is already in flight; its response is
    ///   filtered out later by [`Self::accepts`].
    /// - Forgets the previous term's page info, so no next page can be requested
    ///   until page 1 of the new term has arrived.
    pub fn on_search_input(&mut self, text: &str) -> QueryVariables {
        let term = normalize_term(text);
        self.search.reset(term.clone());
        self.page_info = None;
        let vars = self.variables_for(term, 1);
        self.issue(vars)
    }

    /// What: React to the end-of-grid sentinel becoming visible.
    ///
    /// Output:
    /// - `Some(vars)` for the next page when nothing is loading and the last received
    ///   page reported `has_next_page`; `None` otherwise.
    ///
    /// Details:
    /// - The next page number is taken from the last *received* page, and every other
    ///   variable from the last *issued* request.
    pub fn on_sentinel_visible(&mut self) -> Option<QueryVariables> {
        if self.is_loading() {
            return None;
        }
        let info = self.page_info?;
        if !info.has_next_page {
            return None;
        }
        let mut vars = self.last_request.clone()?;
        vars.page = info.current_page.saturating_add(1).max(1);
        self.search.current_page = vars.page;
        Some(self.issue(vars))
    }

    /// What: Merge a received page into the accumulated list.
    ///
    /// Inputs:
    /// - `page`: Page returned by the catalog.
    ///
    /// Details:
    /// - Page 1 replaces the list (first load and new searches alike); any later page
    ///   is appended as-is. Items repeated across pages are kept.
    /// - Moves the view back to `Idle`.
    pub fn on_page_received(&mut self, page: Page) {
        if page.page_info.current_page == 1 {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.page_info = Some(page.page_info);
        self.status = FetchStatus::Idle;
    }

    /// What: Record a failed request.
    ///
    /// Details:
    /// - The list keeps whatever it held before; nothing is retried.
    pub fn on_fetch_failed(&mut self, err: FetchFailed) {
        self.status = FetchStatus::Error(err);
    }

    /// What: Re-issue the last request (manual retry).
    ///
    /// Output:
    /// - The same variables as the last issued request, or the mount request if none was issued.
    pub fn refetch(&mut self) -> QueryVariables {
        match self.last_request.clone() {
            Some(vars) => self.issue(vars),
            None => self.mount(),
        }
    }

    /// What: Decide whether a response still belongs to what the view is showing.
    ///
    /// Inputs:
    /// - `vars`: Variables of the request that produced the response.
    ///
    /// Output:
    /// - `true` when the response is for the current search term.
    #[must_use]
    pub fn accepts(&self, vars: &QueryVariables) -> bool {
        self.last_request
            .as_ref()
            .is_none_or(|last| last.search == vars.search)
    }

    /// Accumulated items in display order.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Current request status.
    #[must_use]
    pub const fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    /// Failure of the last request, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchFailed> {
        match &self.status {
            FetchStatus::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Metadata of the last received page.
    #[must_use]
    pub const fn page_info(&self) -> Option<PageInfo> {
        self.page_info
    }

    /// Search term and page of the latest request.
    #[must_use]
    pub const fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Most recently issued request.
    #[must_use]
    pub const fn last_request(&self) -> Option<&QueryVariables> {
        self.last_request.as_ref()
    }

    /// Page size used for requests.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// What: Build variables for `page` of `search` with the view's fixed size and sort.
    fn variables_for(&self, search: Option<String>, page: u32) -> QueryVariables {
        QueryVariables {
            search,
            page,
            per_page: self.per_page,
            sort: self.sort.clone(),
        }
    }

    /// What: Enter `Loading` and remember `vars` as the last issued request.
    fn issue(&mut self, vars: QueryVariables) -> QueryVariables {
        self.status = FetchStatus::Loading;
        self.last_request = Some(vars.clone());
        vars
    }
}

/// What: Map raw search box text to a search term.
///
/// Output:
/// - `None` for blank text, otherwise the trimmed text.
fn normalize_term(text: &str) -> Option<String> {
    let t = text.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What: Build `n` distinct items with ids starting at `start`.
    fn items(start: u64, n: u64) -> Vec<MediaItem> {
        (start..start + n)
            .map(|id| MediaItem {
                id,
                title: crate::state::MediaTitle {
                    romaji: Some(format!("Title {id}")),
                    english: None,
                    native: None,
                },
                cover_image: crate::state::CoverImage::default(),
                average_score: None,
                popularity: None,
                format: None,
                episodes: None,
                season: None,
                season_year: None,
                genres: Vec::new(),
                status: None,
            })
            .collect()
    }

    /// What: Build a page for `current_page` with the given items.
    fn page(current_page: u32, has_next_page: bool, items: Vec<MediaItem>) -> Page {
        Page {
            items,
            page_info: PageInfo {
                current_page,
                has_next_page,
            },
        }
    }

    fn new_view() -> PaginatedSearchView {
        PaginatedSearchView::new(20, MediaSort::DEFAULT_ORDER.to_vec())
    }

    #[test]
    /// What: A fresh view is idle and empty; mounting requests page 1 with no search term.
    ///
    /// Inputs:
    /// - New view with `per_page = 20`.
    ///
    /// Output:
    /// - Mount variables `{search: None, page: 1, perPage: 20}` and `Loading` status.
    fn mount_requests_first_page() {
        let mut view = new_view();
        assert_eq!(view.status(), &FetchStatus::Idle);
        assert!(view.items().is_empty());
        let vars = view.mount();
        assert_eq!(vars.search, None);
        assert_eq!(vars.page, 1);
        assert_eq!(vars.per_page, 20);
        assert_eq!(vars.sort, MediaSort::DEFAULT_ORDER.to_vec());
        assert!(view.is_loading());
        assert_eq!(view.search_state().current_page, 1);
    }

    #[test]
    /// What: Pages received after a page-1 start concatenate in call order.
    ///
    /// Inputs:
    /// - Pages 1, 2 and 3 with 3, 2 and 4 items.
    ///
    /// Output:
    /// - List is exactly the concatenation of the three pages.
    fn pages_concatenate_in_order() {
        let mut view = new_view();
        let _ = view.mount();
        let p1 = items(0, 3);
        let p2 = items(100, 2);
        let p3 = items(200, 4);
        view.on_page_received(page(1, true, p1.clone()));
        view.on_page_received(page(2, true, p2.clone()));
        view.on_page_received(page(3, false, p3.clone()));
        let expected: Vec<MediaItem> = p1.into_iter().chain(p2).chain(p3).collect();
        assert_eq!(view.items(), expected.as_slice());
        assert_eq!(view.status(), &FetchStatus::Idle);
    }

    #[test]
    /// What: Duplicated items across pages are kept.
    ///
    /// Inputs:
    /// - Page 2 repeating an item from page 1.
    ///
    /// Output:
    /// - The repeated item appears twice.
    fn append_keeps_duplicates() {
        let mut view = new_view();
        let _ = view.mount();
        let p1 = items(0, 2);
        view.on_page_received(page(1, true, p1.clone()));
        view.on_page_received(page(2, false, p1[1..].to_vec()));
        assert_eq!(view.items().len(), 3);
        assert_eq!(view.items()[1], view.items()[2]);
    }

    #[test]
    /// What: The sentinel never fetches while a request is loading.
    ///
    /// Inputs:
    /// - Mounted view (loading), then a received page with more pages followed by a
    ///   second sentinel trigger while the page-2 request is still loading.
    ///
    /// Output:
    /// - `None` while loading; exactly one page-2 request overall.
    fn sentinel_blocked_while_loading() {
        let mut view = new_view();
        let _ = view.mount();
        assert!(view.on_sentinel_visible().is_none());
        view.on_page_received(page(1, true, items(0, 20)));
        let next = view.on_sentinel_visible().expect("page 2 requested");
        assert_eq!(next.page, 2);
        assert!(view.on_sentinel_visible().is_none());
    }

    #[test]
    /// What: The sentinel never fetches past the last page.
    ///
    /// Inputs:
    /// - Page 1 reporting `has_next_page = false`.
    ///
    /// Output:
    /// - `None` and the view stays idle.
    fn sentinel_blocked_without_next_page() {
        let mut view = new_view();
        let _ = view.mount();
        view.on_page_received(page(1, false, items(0, 5)));
        assert!(view.on_sentinel_visible().is_none());
        assert_eq!(view.status(), &FetchStatus::Idle);
    }

    #[test]
    /// What: Next-page requests keep every variable of the last issued request except the page.
    ///
    /// Inputs:
    /// - Search for "naruto", page 1 received with more pages.
    ///
    /// Output:
    /// - `{search: "naruto", page: 2}` with the same size and sort.
    fn next_page_keeps_search_term() {
        let mut view = new_view();
        let _ = view.mount();
        let first = view.on_search_input("naruto");
        view.on_page_received(page(1, true, items(0, 20)));
        let next = view.on_sentinel_visible().expect("next page");
        assert_eq!(next.search.as_deref(), Some("naruto"));
        assert_eq!(next.page, 2);
        assert_eq!(next.per_page, first.per_page);
        assert_eq!(next.sort, first.sort);
        assert_eq!(view.search_state().current_page, 2);
    }

    #[test]
    /// What: Initial load then infinite scroll to the end.
    ///
    /// Inputs:
    /// - `per_page = 20`; page 1 has 20 items and more pages; page 2 has 15 items and none.
    ///
    /// Output:
    /// - 20 items after page 1, 35 after page 2, and no further request.
    fn scroll_to_end_scenario() {
        let mut view = new_view();
        let _ = view.mount();
        view.on_page_received(page(1, true, items(0, 20)));
        assert_eq!(view.items().len(), 20);
        let next = view.on_sentinel_visible().expect("page 2");
        assert_eq!(next.page, 2);
        view.on_page_received(page(2, false, items(20, 15)));
        assert_eq!(view.items().len(), 35);
        assert!(view.on_sentinel_visible().is_none());
    }

    #[test]
    /// What: A new search replaces the accumulated list with exactly its page-1 items.
    ///
    /// Inputs:
    /// - 35 accumulated items, then a search for "naruto" answered with 5 items.
    ///
    /// Output:
    /// - Request `{search: "naruto", page: 1}` and a list of exactly those 5 items.
    fn new_search_replaces_list() {
        let mut view = new_view();
        let _ = view.mount();
        view.on_page_received(page(1, true, items(0, 20)));
        let _ = view.on_sentinel_visible();
        view.on_page_received(page(2, false, items(20, 15)));
        assert_eq!(view.items().len(), 35);

        let vars = view.on_search_input("naruto");
        assert_eq!(vars.search.as_deref(), Some("naruto"));
        assert_eq!(vars.page, 1);
        assert_eq!(view.search_state().current_page, 1);
        let naruto = items(500, 5);
        view.on_page_received(page(1, false, naruto.clone()));
        assert_eq!(view.items(), naruto.as_slice());
    }

    #[test]
    /// What: A failed request keeps the list and surfaces the message; a new fetch leaves `Error`.
    ///
    /// Inputs:
    /// - Page 1 received, page 2 fails, then the sentinel fires again.
    ///
    /// Output:
    /// - List unchanged, `Error` status with the message, then `Loading` for page 2 again.
    fn failure_keeps_list_and_allows_new_fetch() {
        let mut view = new_view();
        let _ = view.mount();
        view.on_page_received(page(1, true, items(0, 20)));
        let _ = view.on_sentinel_visible();
        view.on_fetch_failed(FetchFailed::new("Too Many Requests."));
        assert_eq!(view.items().len(), 20);
        assert_eq!(
            view.error().map(FetchFailed::message),
            Some("Too Many Requests.")
        );
        assert!(!view.is_loading());
        let retry = view.on_sentinel_visible().expect("new fetch from error");
        assert_eq!(retry.page, 2);
        assert!(view.is_loading());
    }

    #[test]
    /// What: A failed new search cannot page on with the previous term's page info.
    ///
    /// Inputs:
    /// - Two default pages with more to come, then "naruto" whose page 1 fails,
    ///   then the sentinel fires again.
    ///
    /// Output:
    /// - No request; the old list stays; a retry asks for "naruto" page 1 and its
    ///   answer replaces the list.
    fn failed_new_search_does_not_continue_old_pages() {
        let mut view = new_view();
        let _ = view.mount();
        view.on_page_received(page(1, true, items(0, 20)));
        let _ = view.on_sentinel_visible().expect("page 2");
        view.on_page_received(page(2, true, items(20, 20)));

        let _ = view.on_search_input("naruto");
        assert_eq!(view.page_info(), None);
        view.on_fetch_failed(FetchFailed::new("offline"));
        assert_eq!(view.on_sentinel_visible(), None);
        assert_eq!(view.items().len(), 40);
        assert_eq!(view.search_state().current_page, 1);

        let retry = view.refetch();
        assert_eq!(retry.search.as_deref(), Some("naruto"));
        assert_eq!(retry.page, 1);
        view.on_page_received(page(1, false, items(500, 3)));
        assert_eq!(view.items(), items(500, 3).as_slice());
    }

    #[test]
    /// What: Blank search text clears the search term.
    ///
    /// Inputs:
    /// - `"   "` typed into the search box.
    ///
    /// Output:
    /// - Page-1 request with `search: None`.
    fn blank_search_clears_term() {
        let mut view = new_view();
        let vars = view.on_search_input("   ");
        assert_eq!(vars.search, None);
        assert_eq!(view.search_state().search_term, None);
    }

    #[test]
    /// What: Responses for a superseded search term are not accepted.
    ///
    /// Inputs:
    /// - Page-2 request for the default list, then a search for "naruto".
    ///
    /// Output:
    /// - The old page-2 variables are rejected; "naruto" variables are accepted.
    fn accepts_only_current_search() {
        let mut view = new_view();
        let _ = view.mount();
        view.on_page_received(page(1, true, items(0, 20)));
        let old = view.on_sentinel_visible().expect("page 2");
        let current = view.on_search_input("naruto");
        assert!(!view.accepts(&old));
        assert!(view.accepts(&current));
    }

    #[test]
    /// What: `refetch` repeats the last issued request.
    ///
    /// Inputs:
    /// - Failed search for "bleach".
    ///
    /// Output:
    /// - Identical variables and `Loading` status.
    fn refetch_repeats_last_request() {
        let mut view = new_view();
        let vars = view.on_search_input("bleach");
        view.on_fetch_failed(FetchFailed::new("offline"));
        let again = view.refetch();
        assert_eq!(again, vars);
        assert!(view.is_loading());
    }

    #[test]
    /// What: Initial search presets the mount request and a zero page size is clamped.
    fn initial_search_and_page_size_clamp() {
        let mut view = PaginatedSearchView::new(0, vec![MediaSort::ScoreDesc])
            .with_initial_search(Some(" one piece "));
        let vars = view.mount();
        assert_eq!(vars.search.as_deref(), Some("one piece"));
        assert_eq!(vars.per_page, 1);
    }
}
