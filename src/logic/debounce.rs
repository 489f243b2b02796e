//! Trailing-edge debounce over a tokio channel.

use tokio::{
    select,
    sync::mpsc,
    time::{Duration, sleep},
};

/// Quiescence window used for search input unless settings override it.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What: Wait for the next value and collapse any burst that follows it.
///
/// Inputs:
/// - `rx`: Channel of raw values.
/// - `window`: Quiet period that must pass without a new value.
///
/// Output:
/// - `Some(latest)` once `window` elapses after the last value of a burst; `None` when
///   the channel is closed and drained.
///
/// Details:
/// - Every new value restarts the timer and replaces the pending one.
/// - If the channel closes mid-burst the pending value is still returned.
pub async fn next_debounced<T>(rx: &mut mpsc::UnboundedReceiver<T>, window: Duration) -> Option<T> {
    let mut latest = rx.recv().await?;
    loop {
        select! {
            next = rx.recv() => match next {
                Some(v) => latest = v,
                None => return Some(latest),
            },
            () = sleep(window) => return Some(latest),
        }
    }
}

/// What: Spawn a task forwarding debounced values from `input_rx` to `output_tx`.
///
/// Inputs:
/// - `input_rx`: Raw values (search box text on every keystroke).
/// - `output_tx`: Receives one value per quiet period.
/// - `window`: Quiet period.
///
/// Details:
/// - Exits when the input channel closes or the receiver of `output_tx` is dropped.
pub fn spawn_debounce_worker<T: Send + 'static>(
    mut input_rx: mpsc::UnboundedReceiver<T>,
    output_tx: mpsc::UnboundedSender<T>,
    window: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(value) = next_debounced(&mut input_rx, window).await {
            if output_tx.send(value).is_err() {
                tracing::debug!("debounce output closed; stopping worker");
                break;
            }
        }
    })
}
