use std::env;
use std::fmt;
use std::str::FromStr;

use ocr2gpt_types::BackendKind;
use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::recognition::RecognitionConfig;
use self::ui::UiConfig;

pub mod capture;
pub mod recognition;
pub mod ui;

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub recognition: RecognitionConfig,
    pub ui: UiConfig,

    /// Fallback filter when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Config {
    /// Build the config from environment variables, falling back to defaults
    pub fn new() -> Self {
        let log_filter = env::var("LOG_FILTER").unwrap_or_else(|_| default_log_filter());

        Config {
            capture: CaptureConfig::new(),
            recognition: RecognitionConfig::new(),
            ui: UiConfig::new(),
            log_filter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            recognition: RecognitionConfig::default(),
            ui: UiConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Read and parse an env var, ignoring values that fail to parse
pub(crate) fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Env vars that are set but were replaced by defaults because they don't parse.
///
/// `Config::new` runs before logging is up, so the binary reports these afterwards.
pub fn env_diagnostics() -> Vec<String> {
    [
        rejected::<BackendKind>("RECOGNITION_BACKEND", env::var("RECOGNITION_BACKEND").ok()),
        rejected::<u64>("CAPTURE_DELAY_MS", env::var("CAPTURE_DELAY_MS").ok()),
        rejected::<u32>("VISION_MAX_TOKENS", env::var("VISION_MAX_TOKENS").ok()),
        rejected::<u64>("UI_POLL_INTERVAL_MS", env::var("UI_POLL_INTERVAL_MS").ok()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn rejected<T>(key: &str, value: Option<String>) -> Option<String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = value?;
    match value.parse::<T>() {
        Ok(_) => None,
        Err(e) => Some(format!("{key}={value:?} ignored, using the default: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capture.screenshot_dir, "screenshots");
        assert_eq!(config.capture.hide_delay_ms, 500);
        assert_eq!(config.recognition.backend, BackendKind::Tesseract);
        assert_eq!(config.recognition.tesseract.languages, vec!["eng", "jpn"]);
        assert_eq!(config.ui.placeholder, "OCR results will be displayed here.\n");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "recognition": { "backend": "vision", "vision": { "model": "m" } } }"#,
        )
        .unwrap();
        assert_eq!(config.recognition.backend, BackendKind::Vision);
        assert_eq!(config.recognition.vision.model, "m");
        assert_eq!(config.recognition.vision.max_tokens, 1000);
        assert!(config.recognition.vision.api_key.is_empty());
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = Config::default();
        config.ui.copy_suffix = "\nExplain this.".to_string();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ui.copy_suffix, "\nExplain this.");
    }

    #[test]
    fn misspelled_backend_is_reported() {
        let problem = rejected::<BackendKind>("RECOGNITION_BACKEND", Some("visoin".to_string()))
            .unwrap();
        assert!(problem.contains("RECOGNITION_BACKEND=\"visoin\""));
        assert!(problem.contains("unknown recognition backend: visoin"));
    }

    #[test]
    fn valid_or_unset_values_are_not_reported() {
        assert!(rejected::<BackendKind>("RECOGNITION_BACKEND", Some("Vision".to_string())).is_none());
        assert!(rejected::<u64>("CAPTURE_DELAY_MS", Some("750".to_string())).is_none());
        assert!(rejected::<u64>("CAPTURE_DELAY_MS", None).is_none());
        assert!(rejected::<u64>("CAPTURE_DELAY_MS", Some("soon".to_string())).is_some());
    }
}
