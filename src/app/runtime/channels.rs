use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::logic::debounce::spawn_debounce_worker;
use crate::sources::MediaSource;
use crate::state::{PageResult, QueryVariables};

use super::workers::spawn_fetch_worker;

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Holds the senders and receivers used between the main event loop, the
///   terminal event thread, the search debounce worker and the fetch worker.
pub struct Channels {
    /// Terminal events from the event thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Receiving side of terminal events.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Set on exit so the event thread stops polling.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Raw search box text, one message per edit.
    pub query_tx: mpsc::UnboundedSender<String>,
    /// Search text after the quiet period.
    pub debounced_rx: mpsc::UnboundedReceiver<String>,
    /// Requests for the fetch worker.
    pub fetch_tx: mpsc::UnboundedSender<QueryVariables>,
    /// Completed requests from the fetch worker.
    pub results_rx: mpsc::UnboundedReceiver<PageResult>,
}

impl Channels {
    /// What: Create all channels and spawn the workers behind them.
    ///
    /// Inputs:
    /// - `source`: Catalog the fetch worker queries.
    /// - `debounce`: Quiet period for search input.
    ///
    /// Output:
    /// - A `Channels` struct with every sender and receiver initialized.
    ///
    /// Details:
    /// - Must be called inside a tokio runtime; both workers are `tokio::spawn`ed.
    pub fn new<S: MediaSource>(source: Arc<S>, debounce: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let event_thread_cancelled = Arc::new(AtomicBool::new(false));
        let (query_tx, query_rx) = mpsc::unbounded_channel::<String>();
        let (debounced_tx, debounced_rx) = mpsc::unbounded_channel::<String>();
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel::<QueryVariables>();
        let (results_tx, results_rx) = mpsc::unbounded_channel::<PageResult>();

        spawn_debounce_worker(query_rx, debounced_tx, debounce);
        spawn_fetch_worker(source, fetch_rx, results_tx);

        Self {
            event_tx,
            event_rx,
            event_thread_cancelled,
            query_tx,
            debounced_rx,
            fetch_tx,
            results_rx,
        }
    }
}
