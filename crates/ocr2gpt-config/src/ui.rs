use std::env;

use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_placeholder() -> String {
    "OCR results will be displayed here.\n".to_string()
}

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_feedback_ms() -> u64 {
    2000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Text the result pane shows when empty
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Appended to the pane text on "Copy All Text"
    #[serde(default)]
    pub copy_suffix: String,
    /// How often the UI thread drains backend events
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// How long the copy confirmation stays visible
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
}

impl UiConfig {
    pub fn new() -> Self {
        let copy_suffix = env::var("PROMPT").unwrap_or_default();

        let poll_interval_ms =
            env_parse("UI_POLL_INTERVAL_MS").unwrap_or_else(default_poll_interval_ms);

        Self {
            copy_suffix,
            poll_interval_ms,
            ..Self::default()
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            copy_suffix: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
            feedback_ms: default_feedback_ms(),
        }
    }
}
