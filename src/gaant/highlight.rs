// src/gaant/highlight.rs

//! Hovered-time channel.
//!
//! Markers and log rows publish the timestamp under the pointer; the chart
//! subscribes and draws a guide line. The channel is created and owned by
//! whoever hosts both views.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

/// Publishing side. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HighlightSender {
    tx: Arc<watch::Sender<Option<i64>>>,
}

/// Subscribing side. Each clone tracks changes independently.
#[derive(Debug, Clone)]
pub struct HighlightReceiver {
    rx: watch::Receiver<Option<i64>>,
}

/// Create a channel with nothing highlighted.
pub fn highlight_channel() -> (HighlightSender, HighlightReceiver) {
    let (tx, rx) = watch::channel(None);
    (HighlightSender { tx: Arc::new(tx) }, HighlightReceiver { rx })
}

impl HighlightSender {
    /// Highlight `ms`, or clear with `None`. Works with no subscribers.
    pub fn set(&self, ms: Option<i64>) {
        trace!(?ms, "highlighted time changed");
        self.tx.send_replace(ms);
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn subscribe(&self) -> HighlightReceiver {
        HighlightReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl HighlightReceiver {
    pub fn current(&self) -> Option<i64> {
        *self.rx.borrow()
    }

    /// Wait for the next change and return the new value.
    ///
    /// Returns `None` once every sender is gone.
    pub async fn changed(&mut self) -> Option<Option<i64>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
