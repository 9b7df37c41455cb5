use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ocr2gpt_types::BackendKind;
use tokio::process::Command;

use crate::{BackendMetadata, RecognitionError, Recognizer};

/// Local OCR through the `tesseract` executable
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: PathBuf,
    languages: Vec<String>,
}

impl TesseractRecognizer {
    pub fn new(command: impl Into<PathBuf>, languages: Vec<String>) -> Self {
        Self {
            command: command.into(),
            languages,
        }
    }

    /// `eng+jpn` style language argument
    pub fn language_arg(&self) -> String {
        self.languages.join("+")
    }
}

#[async_trait]
impl Recognizer for TesseractRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<String, RecognitionError> {
        let mut command = Command::new(&self.command);
        command.arg(image_path).arg("stdout");
        if !self.languages.is_empty() {
            command.arg("-l").arg(self.language_arg());
        }

        tracing::debug!(
            "Running {} on {} ({})",
            self.command.display(),
            image_path.display(),
            self.language_arg()
        );

        let output = command.output().await.map_err(|e| {
            RecognitionError::Engine(format!("failed to run {}: {e}", self.command.display()))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("tesseract exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(RecognitionError::Engine(message));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        Ok(clean_lines(&raw))
    }

    fn metadata(&self) -> BackendMetadata {
        BackendMetadata {
            kind: BackendKind::Tesseract,
            name: format!("Tesseract ({})", self.language_arg()),
            requires_api_key: false,
        }
    }
}

/// Trim every line and drop the blank ones
pub fn clean_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
