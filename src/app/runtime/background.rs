use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

/// What: Spawn the thread that reads terminal events and forwards them to the event loop.
///
/// Inputs:
/// - `headless`: When `true`, no thread is started.
/// - `event_tx`: Sender for terminal events.
/// - `event_thread_cancelled`: Flag set by the runtime on exit.
///
/// Details:
/// - Polls with a 50 ms timeout so the cancellation flag is seen promptly.
/// - Exits when the flag is set or the receiving side is dropped; transient read
///   errors are ignored.
pub fn spawn_event_thread(
    headless: bool,
    event_tx: mpsc::UnboundedSender<CEvent>,
    event_thread_cancelled: Arc<AtomicBool>,
) {
    if headless {
        return;
    }
    std::thread::spawn(move || {
        while !event_thread_cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => {
                    let Ok(ev) = crossterm::event::read() else {
                        continue;
                    };
                    if event_thread_cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err()
                    {
                        break;
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
        tracing::debug!("[Runtime] event thread stopped");
    });
}
