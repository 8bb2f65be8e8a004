//! Screen lifetime and cancellation of in-flight loads
//!
//! Every screen owns a [`ViewScope`]. Loads started for the screen run
//! under [`ViewScope::guard`]; once the scope is closed the pending future
//! is dropped and any result that arrives late is discarded.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Cancellation handle shared by everything a screen starts
#[derive(Clone)]
pub struct ViewScope {
    sender: broadcast::Sender<()>,
    closed: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Tear the screen down. Idempotent.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("View scope closed");
            let _ = self.sender.send(());
        }
    }

    /// Run `fut` for this screen.
    ///
    /// Returns `None` when the scope is closed before or while the future
    /// runs; the result is never handed back after teardown.
    pub async fn guard<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        // subscribe before checking the flag so a concurrent close is not missed
        let mut closed = self.sender.subscribe();
        if self.is_closed() {
            return None;
        }

        tokio::select! {
            biased;
            _ = closed.recv() => {
                debug!("Discarding load for closed view");
                None
            }
            out = fut => {
                if self.is_closed() {
                    None
                } else {
                    Some(out)
                }
            }
        }
    }

    /// Close the scope when the operator presses Ctrl+C.
    pub fn close_on_ctrl_c(&self) -> JoinHandle<()> {
        let scope = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, cancelling");
                    scope.close();
                }
                Err(e) => warn!(error = %e, "Failed to install Ctrl+C handler"),
            }
        })
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────
