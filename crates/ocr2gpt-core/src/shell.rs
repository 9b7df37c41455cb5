use ocr2gpt_types::{AppEvent, BackendKind, CaptureId};

use crate::log::{self, ResultLog};
use crate::session::{Session, SessionError};

/// What the view has to refresh after an event was applied
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShellUpdate {
    pub log_changed: bool,
    pub button_changed: bool,
    pub show_main: bool,
    /// Keep the newest block in view
    pub scroll_to_end: bool,
}

/// UI-thread application state, handed to every slint callback
pub struct Shell {
    session: Session,
    log: ResultLog,
    copy_suffix: String,
    backend: Option<BackendKind>,
}

impl Shell {
    pub fn new(placeholder: impl Into<String>, copy_suffix: impl Into<String>) -> Self {
        Self {
            session: Session::new(),
            log: ResultLog::new(placeholder),
            copy_suffix: copy_suffix.into(),
            backend: None,
        }
    }

    /// Backend has announced itself
    pub fn is_ready(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_processing(&self) -> bool {
        self.session.is_processing()
    }

    pub fn button_label(&self) -> &'static str {
        self.session.button_label()
    }

    pub fn log_text(&self) -> &str {
        self.log.text()
    }

    pub fn press_capture(&mut self) -> Result<CaptureId, SessionError> {
        self.session.request_capture()
    }

    pub fn apply(&mut self, event: &AppEvent) -> ShellUpdate {
        match event {
            AppEvent::BackendReady { backend } => {
                self.backend = Some(*backend);
                ShellUpdate {
                    button_changed: true,
                    ..Default::default()
                }
            }
            AppEvent::CaptureSaved {
                capture_id,
                file_name,
                taken_at,
                recognizing,
                ..
            } => {
                let running = if *recognizing {
                    self.backend.and_then(|b| b.running_label())
                } else {
                    None
                };
                self.log
                    .append(&log::capture_header(taken_at, file_name, running));
                self.session.capture_saved(*capture_id, *recognizing);
                ShellUpdate {
                    log_changed: true,
                    button_changed: true,
                    show_main: true,
                    scroll_to_end: true,
                }
            }
            AppEvent::CaptureFailed {
                capture_id,
                message,
            } => {
                self.log.append(&log::capture_error_block(message));
                self.session.capture_failed(*capture_id);
                ShellUpdate {
                    log_changed: true,
                    button_changed: true,
                    show_main: true,
                    scroll_to_end: true,
                }
            }
            AppEvent::RecognitionFinished {
                capture_id,
                outcome,
                finished_at,
            } => {
                self.log.append(&log::outcome_block(finished_at, outcome));
                self.session.recognition_finished(*capture_id);
                ShellUpdate {
                    log_changed: true,
                    button_changed: true,
                    show_main: false,
                    scroll_to_end: true,
                }
            }
            AppEvent::Shutdown | AppEvent::CaptureRequested { .. } => ShellUpdate::default(),
        }
    }

    /// Text for "Copy All Text"
    pub fn copy_text(&self) -> String {
        self.log.export_all(&self.copy_suffix)
    }

    pub fn clear(&mut self) -> ShellUpdate {
        self.log.clear();
        ShellUpdate {
            log_changed: true,
            scroll_to_end: true,
            ..Default::default()
        }
    }
}
