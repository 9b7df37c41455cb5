use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// UI is closing; the backend loop stops
    Shutdown,
    /// UI asks the backend to grab the screen; the window is already hidden
    CaptureRequested {
        capture_id: CaptureId,
    },
    CaptureSaved {
        capture_id: CaptureId,
        file_name: String,
        path: PathBuf,
        taken_at: DateTime<Local>,
        /// Whether a recognition call follows this capture
        recognizing: bool,
    },
    CaptureFailed {
        capture_id: CaptureId,
        message: String,
    },
    RecognitionFinished {
        capture_id: CaptureId,
        outcome: RecognitionOutcome,
        finished_at: DateTime<Local>,
    },
    BackendReady {
        backend: BackendKind,
    },
}

/// Correlates the events of one capture across the channel hand-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureId(Uuid);

impl CaptureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CaptureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    Text(String),
    /// The backend ran fine but found nothing to read
    NoText,
    Failed(String),
}

impl RecognitionOutcome {
    /// Map raw backend output onto an outcome. Blank output is not an error.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Self::NoText
        } else {
            Self::Text(text.to_string())
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Screenshot only
    None,
    #[default]
    Tesseract,
    Vision,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::None => "none",
            BackendKind::Tesseract => "tesseract",
            BackendKind::Vision => "vision",
        }
    }

    /// Label shown in the "Running ..." line of the result log
    pub fn running_label(&self) -> Option<&'static str> {
        match self {
            BackendKind::None => None,
            BackendKind::Tesseract => Some("OCR"),
            BackendKind::Vision => Some("vision model"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "screenshot" => Ok(BackendKind::None),
            "tesseract" | "ocr" => Ok(BackendKind::Tesseract),
            "vision" | "api" => Ok(BackendKind::Vision),
            other => Err(format!("unknown recognition backend: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_output_is_no_text() {
        assert_eq!(RecognitionOutcome::from_text(""), RecognitionOutcome::NoText);
        assert_eq!(
            RecognitionOutcome::from_text("  \n\t "),
            RecognitionOutcome::NoText
        );
    }

    #[test]
    fn text_output_is_trimmed() {
        assert_eq!(
            RecognitionOutcome::from_text("\nhello\n"),
            RecognitionOutcome::Text("hello".to_string())
        );
    }

    #[test]
    fn backend_kind_parses_aliases() {
        assert_eq!("OCR".parse::<BackendKind>(), Ok(BackendKind::Tesseract));
        assert_eq!("api".parse::<BackendKind>(), Ok(BackendKind::Vision));
        assert_eq!("none".parse::<BackendKind>(), Ok(BackendKind::None));
        assert!("gpu".parse::<BackendKind>().is_err());
    }

    #[test]
    fn capture_ids_are_unique() {
        assert_ne!(CaptureId::new(), CaptureId::new());
    }
}
