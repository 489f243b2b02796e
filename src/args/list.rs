//! Non-interactive listing: print catalog pages to stdout.

use std::io::Write;

use crate::logic::PaginatedSearchView;
use crate::sources::MediaSource;
use crate::theme::Settings;
use crate::ui::sentinel_label;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Print up to `pages` pages of results, driving the same view state machine as the TUI.
///
/// Inputs:
/// - `source`: Catalog to query.
/// - `settings`: Page size and sort order.
/// - `search`: Optional search term; `None` lists the trending entries.
/// - `pages`: Maximum number of pages to fetch.
/// - `out`: Destination for the listing.
///
/// Output:
/// - Number of entries printed, or the catalog/IO error.
///
/// Details:
/// - Each further page is requested the way the grid does when its end comes into view,
///   so listing stops early once the catalog reports no next page.
/// - Ends with the same end-of-list label the grid shows.
///
/// # Errors
/// - Returns `Err` with the catalog's message when a page fails, or when writing to `out` fails.
pub async fn handle_list<S: MediaSource, W: Write>(
    source: &S,
    settings: &Settings,
    search: Option<&str>,
    pages: u32,
    out: &mut W,
) -> Result<usize> {
    let mut view = PaginatedSearchView::new(settings.per_page, settings.sort.clone())
        .with_initial_search(search);
    let mut next = Some(view.mount());
    let mut fetched = 0u32;
    tracing::info!(search = ?search, pages, "listing requested from CLI");

    while let Some(vars) = next.take() {
        if fetched >= pages {
            break;
        }
        match source.fetch_page(&vars).await {
            Ok(page) => view.on_page_received(page),
            Err(e) => {
                tracing::error!(page = vars.page, error = %e, "listing fetch failed");
                view.on_fetch_failed(e.clone());
                return Err(e.into());
            }
        }
        fetched += 1;
        next = view.on_sentinel_visible();
    }

    for (i, item) in view.items().iter().enumerate() {
        let summary = item.summary_line();
        let season = item.season_line();
        write!(out, "{:>4}. {}", i + 1, item.display_title())?;
        if !summary.is_empty() {
            write!(out, "  [{summary}]")?;
        }
        if !season.is_empty() {
            write!(out, "  {season}")?;
        }
        writeln!(out)?;
    }
    let label = sentinel_label(&view);
    if !label.is_empty() {
        writeln!(out, "-- {label} --")?;
    }
    out.flush()?;
    Ok(view.items().len())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::sources::FetchFailed;
    use crate::state::{Page, PageInfo, QueryVariables};

    /// Two-page catalog: 20 entries then 15, recording every request.
    struct TwoPages {
        seen: Mutex<Vec<QueryVariables>>,
    }

    impl MediaSource for TwoPages {
        async fn fetch_page(&self, vars: &QueryVariables) -> std::result::Result<Page, FetchFailed> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(vars.clone());
            }
            let (n, has_next) = if vars.page == 1 { (20, true) } else { (15, false) };
            Ok(Page {
                items: crate::test_utils::media_items(u64::from(vars.page) * 100, n),
                page_info: PageInfo {
                    current_page: vars.page,
                    has_next_page: has_next,
                },
            })
        }
    }

    struct Failing;

    impl MediaSource for Failing {
        async fn fetch_page(&self, _vars: &QueryVariables) -> std::result::Result<Page, FetchFailed> {
            Err(FetchFailed::new("HTTP 500 Internal Server Error"))
        }
    }

    #[tokio::test]
    /// What: Listing follows `hasNextPage` and stops at the last page.
    ///
    /// Inputs:
    /// - A two-page catalog and a budget of five pages.
    ///
    /// Output:
    /// - 35 entries printed, two requests issued, "End of results" trailer.
    async fn list_pages_until_end() {
        let source = TwoPages {
            seen: Mutex::new(Vec::new()),
        };
        let mut out = Vec::new();
        let n = handle_list(&source, &Settings::default(), Some("naruto"), 5, &mut out)
            .await
            .expect("listing succeeds");
        assert_eq!(n, 35);
        let seen = source.seen.lock().expect("lock").clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].page, 2);
        assert_eq!(seen[1].search.as_deref(), Some("naruto"));
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("   1. Title 100  [TV]"));
        assert!(text.contains("  35. Title 214"));
        assert!(text.trim_end().ends_with("-- End of results --"));
    }

    #[tokio::test]
    /// What: The page budget caps the number of requests.
    async fn list_respects_page_budget() {
        let source = TwoPages {
            seen: Mutex::new(Vec::new()),
        };
        let mut out = Vec::new();
        let n = handle_list(&source, &Settings::default(), None, 1, &mut out)
            .await
            .expect("listing succeeds");
        assert_eq!(n, 20);
        assert_eq!(source.seen.lock().expect("lock").len(), 1);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("-- Scroll for more --"));
    }

    #[tokio::test]
    /// What: A failed page is reported with the catalog's message.
    async fn list_reports_failure() {
        let mut out = Vec::new();
        let err = handle_list(&Failing, &Settings::default(), None, 3, &mut out)
            .await
            .expect_err("fetch fails");
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");
    }
}
