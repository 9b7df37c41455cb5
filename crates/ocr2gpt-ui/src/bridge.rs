use kanal::{AsyncReceiver, AsyncSender, Receiver, Sender};
use ocr2gpt_types::AppEvent;

/// Bridge between async backend and sync UI thread
pub struct UiBridge {
    to_ui_tx: AsyncSender<AppEvent>,
    from_ui_rx: AsyncReceiver<AppEvent>,
}

/// UI-thread end; never awaited, only polled
pub struct UiBridgeHandle {
    pub to_ui_rx: Receiver<AppEvent>,
    pub from_ui_tx: Sender<AppEvent>,
}

impl UiBridge {
    pub fn new() -> (Self, UiBridgeHandle) {
        let (to_ui_tx, to_ui_rx) = kanal::bounded(128);
        let (from_ui_tx, from_ui_rx) = kanal::bounded(64);

        (
            UiBridge {
                to_ui_tx: to_ui_tx.to_async(),
                from_ui_rx: from_ui_rx.to_async(),
            },
            UiBridgeHandle {
                to_ui_rx,
                from_ui_tx,
            },
        )
    }

    pub async fn forward_from_backend(&self, app_to_ui_rx: AsyncReceiver<AppEvent>) {
        while let Ok(event) = app_to_ui_rx.recv().await {
            if self.to_ui_tx.send(event).await.is_err() {
                tracing::debug!("UI side of the bridge closed");
                break;
            }
        }
    }

    pub async fn forward_to_backend(&self, ui_to_app_tx: AsyncSender<AppEvent>) {
        while let Ok(event) = self.from_ui_rx.recv().await {
            if ui_to_app_tx.send(event).await.is_err() {
                tracing::debug!("Backend side of the bridge closed");
                break;
            }
        }
    }
}

impl UiBridgeHandle {
    /// Non-blocking send from the UI thread. `false` if the queue is full or closed.
    pub fn post(&self, event: AppEvent) -> bool {
        match self.from_ui_tx.try_send(event) {
            Ok(sent) => sent,
            Err(e) => {
                tracing::error!("Failed to post event to backend: {e}");
                false
            }
        }
    }

    /// Take every queued backend event without blocking.
    /// `Err` once the backend side is gone and nothing is left to deliver.
    pub fn drain(&self) -> Result<Vec<AppEvent>, kanal::ReceiveError> {
        let mut events = Vec::new();
        loop {
            match self.to_ui_rx.try_recv() {
                Ok(Some(event)) => events.push(event),
                Ok(None) => return Ok(events),
                Err(e) if events.is_empty() => return Err(e),
                Err(_) => return Ok(events),
            }
        }
    }
}
