use ocr2gpt_types::CaptureId;

const IDLE_LABEL: &str = "Take Screenshot";
const BUSY_LABEL: &str = "Processing OCR...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Main window hidden, waiting for the grab and the write to disk
    Capturing { id: CaptureId },
    Recognizing { id: CaptureId },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a capture is already in progress")]
    Busy,
}

/// Capture lifecycle; doubles as the processing flag guarding re-entry.
///
/// Events for a capture other than the current one leave the state untouched.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_processing() {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// Idle -> Capturing. Rejected while anything is outstanding.
    pub fn request_capture(&mut self) -> Result<CaptureId, SessionError> {
        if self.is_processing() {
            return Err(SessionError::Busy);
        }

        let id = CaptureId::new();
        self.state = SessionState::Capturing { id };
        Ok(id)
    }

    pub fn capture_saved(&mut self, id: CaptureId, recognizing: bool) {
        if !self.is_current(id) {
            tracing::warn!("capture_saved for stale capture {id}");
            return;
        }

        self.state = if recognizing {
            SessionState::Recognizing { id }
        } else {
            SessionState::Idle
        };
    }

    pub fn capture_failed(&mut self, id: CaptureId) {
        if self.is_current(id) {
            self.state = SessionState::Idle;
        }
    }

    pub fn recognition_finished(&mut self, id: CaptureId) {
        if self.is_current(id) {
            self.state = SessionState::Idle;
        } else {
            tracing::warn!("recognition_finished for stale capture {id}");
        }
    }

    fn is_current(&self, id: CaptureId) -> bool {
        match self.state {
            SessionState::Idle => false,
            SessionState::Capturing { id: current } | SessionState::Recognizing { id: current } => {
                current == id
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
