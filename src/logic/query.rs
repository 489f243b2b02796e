use tokio::sync::mpsc;

use crate::state::{AppState, QueryVariables};

/// What: Push the current search box text to the debounce worker.
///
/// Inputs:
/// - `app`: Application state holding the input line.
/// - `query_tx`: Raw (not yet debounced) input channel.
///
/// Details:
/// - Every keystroke goes through here; the debounce worker collapses bursts.
pub fn send_query(app: &AppState, query_tx: &mpsc::UnboundedSender<String>) {
    let _ = query_tx.send(app.input.clone());
}

/// What: Hand request variables produced by the paginated view to the fetch worker.
///
/// Inputs:
/// - `vars`: Variables returned by one of the view operations.
/// - `fetch_tx`: Fetch worker channel.
pub fn send_fetch(vars: QueryVariables, fetch_tx: &mpsc::UnboundedSender<QueryVariables>) {
    tracing::debug!(search = ?vars.search, page = vars.page, per_page = vars.per_page, "issuing fetch");
    if fetch_tx.send(vars).is_err() {
        tracing::warn!("fetch worker is gone; request dropped");
    }
}

/// What: Apply debounced search text to the view and issue the page-1 request.
///
/// Inputs:
/// - `app`: Application state.
/// - `text`: Debounced search box text.
/// - `fetch_tx`: Fetch worker channel.
///
/// Details:
/// - Selection and scroll reset when the page-1 result arrives, not here, so the
///   old list stays browsable while the new search loads.
pub fn apply_search(
    app: &mut AppState,
    text: &str,
    fetch_tx: &mpsc::UnboundedSender<QueryVariables>,
) {
    let vars = app.view.on_search_input(text);
    tracing::info!(search = ?vars.search, "new search");
    send_fetch(vars, fetch_tx);
}

/// What: Check the sentinel against the last drawn grid and request the next page.
///
/// Inputs:
/// - `app`: Application state with the recorded grid viewport.
/// - `fetch_tx`: Fetch worker channel.
///
/// Output:
/// - `true` when a next-page request was issued.
///
/// Details:
/// - The sentinel fires only on a hidden -> visible transition; the view's own guard
///   (nothing loading, more pages exist) decides whether a request is made.
pub fn check_sentinel(
    app: &mut AppState,
    fetch_tx: &mpsc::UnboundedSender<QueryVariables>,
) -> bool {
    let Some(vp) = app.grid_viewport else {
        return false;
    };
    if !app.sentinel.observe(vp) {
        return false;
    }
    match app.view.on_sentinel_visible() {
        Some(vars) => {
            tracing::debug!(page = vars.page, "sentinel visible; loading next page");
            send_fetch(vars, fetch_tx);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sentinel::GridViewport;
    use crate::state::{Page, PageInfo};

    #[tokio::test]
    /// What: `send_query` forwards the current input text.
    async fn send_query_forwards_input() {
        let app = AppState {
            input: "hello".into(),
            ..Default::default()
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        send_query(&app, &tx);
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    }

    #[test]
    /// What: The sentinel issues a next-page request once per visibility transition.
    ///
    /// Inputs:
    /// - Page 1 received with more pages, grid end on screen; checked twice.
    ///
    /// Output:
    /// - One page-2 request; the second check issues nothing.
    fn sentinel_requests_next_page_once() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        send_fetch(app.view.mount(), &tx);
        app.view.on_page_received(Page {
            items: crate::test_utils::media_items(0, 3),
            page_info: PageInfo {
                current_page: 1,
                has_next_page: true,
            },
        });
        app.grid_viewport = Some(GridViewport {
            first_row: 0,
            visible_rows: 4,
            total_rows: 1,
        });
        assert!(check_sentinel(&mut app, &tx));
        assert!(!check_sentinel(&mut app, &tx));
        assert_eq!(rx.try_recv().map(|v| v.page).ok(), Some(1));
        assert_eq!(rx.try_recv().map(|v| v.page).ok(), Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    /// What: Without a recorded viewport nothing is requested.
    fn sentinel_needs_viewport() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(!check_sentinel(&mut app, &tx));
        assert!(rx.try_recv().is_err());
    }
}
