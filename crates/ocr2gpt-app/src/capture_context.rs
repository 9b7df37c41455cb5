use std::sync::Arc;

use kanal::AsyncSender;
use ocr2gpt_capture::ScreenSource;
use ocr2gpt_recognizer::Recognizer;
use ocr2gpt_types::{AppEvent, BackendKind};

use crate::state::AppState;

/// Shared dependencies of the capture pipeline
#[derive(Clone)]
pub struct CaptureContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub screen: Arc<dyn ScreenSource>,
    /// `None` runs in screenshot-only mode
    pub recognizer: Option<Arc<dyn Recognizer>>,
}

impl CaptureContext {
    pub fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        screen: Arc<dyn ScreenSource>,
        recognizer: Option<Arc<dyn Recognizer>>,
    ) -> Self {
        Self {
            state,
            event_tx,
            screen,
            recognizer,
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.recognizer
            .as_ref()
            .map(|r| r.metadata().kind)
            .unwrap_or(BackendKind::None)
    }
}
