use std::path::Path;

use ocr2gpt_types::BackendKind;

mod tesseract;
mod vision;

pub use tesseract::{TesseractRecognizer, clean_lines};
pub use vision::VisionRecognizer;

/// Turns a saved screenshot into text
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize the text in the image at `image_path`.
    ///
    /// An image without text yields `Ok` with an empty string, never an error.
    async fn recognize(&self, image_path: &Path) -> Result<String, RecognitionError>;

    /// Provider metadata
    fn metadata(&self) -> BackendMetadata;
}

#[derive(Debug, Clone)]
pub struct BackendMetadata {
    pub kind: BackendKind,
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR engine error: {0}")]
    Engine(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
