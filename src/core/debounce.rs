//! Input debouncer for the search box.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Coalesces a stream of raw input values into settled ones.
///
/// A value settles once no newer value has arrived for the whole quiescence
/// window; every input, changed or not, restarts the window. Dropping the
/// handle aborts the worker, so nothing settles after teardown.
pub struct Debouncer {
    input: mpsc::UnboundedSender<String>,
    worker: JoinHandle<()>,
}

impl Debouncer {
    /// Spawn the debounce worker. Settled values arrive on the returned
    /// receiver.
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        let worker = tokio::spawn(async move {
            let mut pending: Option<String> = None;
            loop {
                if let Some(value) = pending.take() {
                    tokio::select! {
                        next = input_rx.recv() => match next {
                            // Newer input supersedes the held value and
                            // restarts the window.
                            Some(next) => pending = Some(next),
                            None => break,
                        },
                        _ = sleep(window) => {
                            if settled_tx.send(value).is_err() {
                                break;
                            }
                        }
                    }
                } else {
                    match input_rx.recv().await {
                        Some(next) => pending = Some(next),
                        None => break,
                    }
                }
            }
        });

        (
            Self {
                input: input_tx,
                worker,
            },
            settled_rx,
        )
    }

    /// Feed one raw input value.
    pub fn update<S: Into<String>>(&self, value: S) {
        // The worker only goes away with the handle, so a failed send just
        // means teardown already started.
        let _ = self.input.send(value.into());
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
