use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::{select, sync::mpsc};

use crate::sources::MediaSource;
use crate::state::{PageResult, QueryVariables};

/// What: Spawn the background worker that executes catalog requests.
///
/// Inputs:
/// - `source`: Catalog to query.
/// - `req_rx`: Requests issued by the paginated view.
/// - `res_tx`: Receives one [`PageResult`] per executed request.
///
/// Details:
/// - Requests run concurrently; results are sent in completion order, tagged with
///   the variables that produced them.
/// - A request whose variables equal one already in flight is dropped, so the
///   caller gets exactly one result for it.
/// - When `req_rx` closes, requests already in flight still complete and are reported.
pub fn spawn_fetch_worker<S: MediaSource>(
    source: Arc<S>,
    mut req_rx: mpsc::UnboundedReceiver<QueryVariables>,
    res_tx: mpsc::UnboundedSender<PageResult>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut in_flight: HashSet<QueryVariables> = HashSet::new();
        let mut pending = FuturesUnordered::new();
        loop {
            select! {
                req = req_rx.recv() => {
                    let Some(vars) = req else { break; };
                    if !in_flight.insert(vars.clone()) {
                        tracing::debug!(
                            search = ?vars.search,
                            page = vars.page,
                            "identical request already in flight; not sending again"
                        );
                        continue;
                    }
                    let src = Arc::clone(&source);
                    pending.push(async move {
                        let result = src.fetch_page(&vars).await;
                        (vars, result)
                    });
                }
                Some((variables, result)) = pending.next(), if !pending.is_empty() => {
                    in_flight.remove(&variables);
                    if let Err(e) = &result {
                        tracing::warn!(
                            search = ?variables.search,
                            page = variables.page,
                            error = %e,
                            "catalog request failed"
                        );
                    }
                    if res_tx.send(PageResult { variables, result }).is_err() {
                        return;
                    }
                }
            }
        }
        while let Some((variables, result)) = pending.next().await {
            let _ = res_tx.send(PageResult { variables, result });
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::time::{Duration, sleep};

    use super::*;
    use crate::sources::FetchFailed;
    use crate::state::{MediaSort, Page, PageInfo};

    /// Catalog stub that records calls and answers after a fixed delay.
    struct SlowSource {
        calls: Mutex<Vec<QueryVariables>>,
        delay: Duration,
    }

    impl MediaSource for SlowSource {
        async fn fetch_page(&self, vars: &QueryVariables) -> Result<Page, FetchFailed> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(vars.clone());
            }
            sleep(self.delay).await;
            if vars.search.as_deref() == Some("boom") {
                return Err(FetchFailed::new("Internal Server Error"));
            }
            Ok(Page {
                items: crate::test_utils::media_items(u64::from(vars.page) * 100, 2),
                page_info: PageInfo {
                    current_page: vars.page,
                    has_next_page: true,
                },
            })
        }
    }

    fn vars(search: Option<&str>, page: u32) -> QueryVariables {
        QueryVariables {
            search: search.map(str::to_string),
            page,
            per_page: 20,
            sort: MediaSort::DEFAULT_ORDER.to_vec(),
        }
    }

    fn call_count(source: &SlowSource) -> usize {
        source.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    #[tokio::test(start_paused = true)]
    /// What: Identical requests issued while one is in flight are collapsed.
    ///
    /// Inputs:
    /// - The same page-1 request sent twice back to back, then a different request.
    ///
    /// Output:
    /// - The source is called twice in total and two results arrive.
    async fn identical_in_flight_requests_are_deduplicated() {
        let source = Arc::new(SlowSource {
            calls: Mutex::new(Vec::new()),
            delay: Duration::from_millis(200),
        });
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (res_tx, mut res_rx) = mpsc::unbounded_channel();
        let _worker = spawn_fetch_worker(Arc::clone(&source), req_rx, res_tx);
        req_tx.send(vars(None, 1)).expect("send");
        req_tx.send(vars(None, 1)).expect("send");
        req_tx.send(vars(Some("naruto"), 1)).expect("send");
        let a = res_rx.recv().await.expect("result");
        let b = res_rx.recv().await.expect("result");
        assert!(a.result.is_ok() && b.result.is_ok());
        sleep(Duration::from_millis(500)).await;
        assert!(res_rx.try_recv().is_err());
        assert_eq!(call_count(&source), 2);
    }

    #[tokio::test(start_paused = true)]
    /// What: Once a request has completed, the same variables can be fetched again.
    async fn completed_request_can_repeat() {
        let source = Arc::new(SlowSource {
            calls: Mutex::new(Vec::new()),
            delay: Duration::from_millis(10),
        });
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (res_tx, mut res_rx) = mpsc::unbounded_channel();
        let _worker = spawn_fetch_worker(Arc::clone(&source), req_rx, res_tx);
        req_tx.send(vars(None, 2)).expect("send");
        let first = res_rx.recv().await.expect("result");
        req_tx.send(vars(None, 2)).expect("send");
        let second = res_rx.recv().await.expect("result");
        assert_eq!(first.variables, second.variables);
        assert_eq!(call_count(&source), 2);
    }

    #[tokio::test(start_paused = true)]
    /// What: Failures are reported with their variables, and closing the request channel
    /// still delivers in-flight results.
    async fn failure_reported_and_drained_on_close() {
        let source = Arc::new(SlowSource {
            calls: Mutex::new(Vec::new()),
            delay: Duration::from_millis(50),
        });
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (res_tx, mut res_rx) = mpsc::unbounded_channel();
        let worker = spawn_fetch_worker(source, req_rx, res_tx);
        req_tx.send(vars(Some("boom"), 1)).expect("send");
        drop(req_tx);
        let res = res_rx.recv().await.expect("result");
        assert_eq!(res.variables.search.as_deref(), Some("boom"));
        assert_eq!(
            res.result.expect_err("failure").message(),
            "Internal Server Error"
        );
        worker.await.expect("worker exits");
    }
}
