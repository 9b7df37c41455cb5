use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use ocr2gpt_capture::ScreenSource;
use ocr2gpt_recognizer::Recognizer;
use ocr2gpt_types::AppEvent;
use ocr2gpt_ui::bridge::UiBridge;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::capture_context::CaptureContext;
use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the backend loop and both bridge forwarders on the current runtime
    pub fn spawn_tasks(
        &self,
        bridge: UiBridge,
        screen: Arc<dyn ScreenSource>,
        recognizer: Option<Arc<dyn Recognizer>>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let bridge = Arc::new(bridge);

        let ctx = CaptureContext::new(
            self.state.clone(),
            self.channels.app_to_ui.0.clone(),
            screen,
            recognizer,
        );

        // Event loop
        tasks.spawn(event_loop(
            ctx,
            self.channels.ui_to_app.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Backend -> UI
        {
            let bridge = bridge.clone();
            let rx = self.channels.app_to_ui.1.clone();
            let cancel = self.cancel_token.child_token();
            tasks.spawn(async move {
                tokio::select! {
                    _ = bridge.forward_from_backend(rx) => {}
                    _ = cancel.cancelled() => {}
                }
                Ok(())
            });
        }

        // UI -> backend
        {
            let tx = self.channels.ui_to_app.0.clone();
            let cancel = self.cancel_token.child_token();
            tasks.spawn(async move {
                tokio::select! {
                    _ = bridge.forward_to_backend(tx) => {}
                    _ = cancel.cancelled() => {}
                }
                Ok(())
            });
        }

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
