use tokio::sync::mpsc;

use crate::logic::apply_search;
use crate::state::{AppState, PageResult, QueryVariables};

/// What: Apply a completed catalog request to the application state.
///
/// Inputs:
/// - `app`: Application state.
/// - `res`: Result tagged with the variables that produced it.
///
/// Details:
/// - Responses for a search term that has since been replaced are dropped and counted.
/// - A page-1 response moves the selection back to the first card.
/// - Every received page re-arms the sentinel, so if the end of the grid is still on
///   screen after the merge the next page is requested on the following draw.
/// - Failures leave the list untouched and are not retried.
pub fn handle_page_result(app: &mut AppState, res: PageResult) {
    let PageResult { variables, result } = res;
    if !app.view.accepts(&variables) {
        app.stale_responses += 1;
        tracing::debug!(
            search = ?variables.search,
            page = variables.page,
            current = ?app.view.search_state().search_term,
            "dropping response for superseded search"
        );
        return;
    }
    match result {
        Ok(page) => {
            let first_page = page.page_info.current_page == 1;
            tracing::info!(
                search = ?variables.search,
                page = page.page_info.current_page,
                received = page.items.len(),
                has_next_page = page.page_info.has_next_page,
                "page received"
            );
            app.view.on_page_received(page);
            if first_page {
                app.reset_selection();
            } else {
                app.selected = app.selected.min(app.view.items().len().saturating_sub(1));
            }
            app.sentinel.rearm();
        }
        Err(err) => {
            app.view.on_fetch_failed(err);
        }
    }
}

/// What: Start a new search from debounced input text.
///
/// Inputs:
/// - `app`: Application state.
/// - `text`: Search text after the quiet period.
/// - `fetch_tx`: Fetch worker channel.
pub fn handle_debounced_query(
    app: &mut AppState,
    text: &str,
    fetch_tx: &mpsc::UnboundedSender<QueryVariables>,
) {
    apply_search(app, text, fetch_tx);
}
