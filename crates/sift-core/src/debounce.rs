//! Trailing-edge debounce on a Tokio task.
//!
//! Every [`Debounce::handle`] call replaces the pending value and restarts
//! the quiet-period timer; the sink only sees the last value of a burst.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct Debounce<V> {
    tx: watch::Sender<Option<V>>,
    task: JoinHandle<()>,
}

impl<V> Debounce<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Spawn the debounce task. Must be called within a Tokio runtime.
    pub fn spawn(delay: Duration, mut sink: impl FnMut(V) + Send + 'static) -> Self {
        let (tx, mut rx) = watch::channel(None::<V>);

        let task = tokio::spawn(async move {
            // Outer loop: wait for the first value of a burst.
            while rx.changed().await.is_ok() {
                // Inner loop: restart the timer on every newer value. A closed
                // channel ends the wait early so the pending value is flushed.
                loop {
                    tokio::select! {
                        changed = rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                        _ = tokio::time::sleep(delay) => break,
                    }
                }
                let value = rx.borrow_and_update().clone();
                if let Some(value) = value {
                    sink(value);
                }
            }
            tracing::trace!("debounce task finished");
        });

        Self { tx, task }
    }

    /// Replace the pending value and restart the timer.
    pub fn handle(&self, value: V) {
        self.tx.send_replace(Some(value));
    }

    /// Flush any pending value immediately and wait for the task to end.
    pub async fn shutdown(self) {
        let Debounce { tx, task } = self;
        drop(tx);
        if let Err(e) = task.await {
            tracing::error!(error = %e, "debounce task failed");
        }
    }
}

impl<V> std::fmt::Debug for Debounce<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounce")
            .field("finished", &self.task.is_finished())
            .finish_non_exhaustive()
    }
}
