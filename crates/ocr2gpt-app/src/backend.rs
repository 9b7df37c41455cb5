use std::sync::Arc;

use ocr2gpt_config::recognition::RecognitionConfig;
use ocr2gpt_recognizer::{Recognizer, TesseractRecognizer, VisionRecognizer};
use ocr2gpt_types::BackendKind;

/// Build the configured recognition backend; `None` means screenshot only
pub fn build_recognizer(config: &RecognitionConfig) -> Option<Arc<dyn Recognizer>> {
    let recognizer: Arc<dyn Recognizer> = match config.backend {
        BackendKind::None => return None,
        BackendKind::Tesseract => Arc::new(TesseractRecognizer::new(
            config.tesseract.command.clone(),
            config.tesseract.languages.clone(),
        )),
        BackendKind::Vision => Arc::new(VisionRecognizer::new(
            config.vision.api_url.clone(),
            config.vision.api_key.clone(),
            config.vision.model.clone(),
            config.vision.prompt.clone(),
            config.vision.max_tokens,
        )),
    };

    if missing_api_key(recognizer.as_ref(), config) {
        tracing::warn!(
            "{} needs an API key but none is configured, set API_KEY",
            recognizer.metadata().name
        );
    }

    Some(recognizer)
}

/// The backend wants a credential and the config has none
pub fn missing_api_key(recognizer: &dyn Recognizer, config: &RecognitionConfig) -> bool {
    recognizer.metadata().requires_api_key && config.vision.api_key.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_selection_follows_config() {
        let mut config = RecognitionConfig::default();

        config.backend = BackendKind::None;
        assert!(build_recognizer(&config).is_none());

        config.backend = BackendKind::Tesseract;
        let tesseract = build_recognizer(&config).unwrap();
        assert_eq!(tesseract.metadata().kind, BackendKind::Tesseract);
        assert!(!tesseract.metadata().requires_api_key);

        config.backend = BackendKind::Vision;
        let vision = build_recognizer(&config).unwrap();
        assert_eq!(vision.metadata().kind, BackendKind::Vision);
        assert!(vision.metadata().requires_api_key);
    }

    #[test]
    fn only_keyed_backends_report_missing_key() {
        let mut config = RecognitionConfig::default();
        config.vision.api_key.clear();

        config.backend = BackendKind::Tesseract;
        let tesseract = build_recognizer(&config).unwrap();
        assert!(!missing_api_key(tesseract.as_ref(), &config));

        config.backend = BackendKind::Vision;
        let vision = build_recognizer(&config).unwrap();
        assert!(missing_api_key(vision.as_ref(), &config));

        config.vision.api_key = "sk-test".to_string();
        assert!(!missing_api_key(vision.as_ref(), &config));
    }
}
