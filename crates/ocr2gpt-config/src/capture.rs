use std::env;

use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_screenshot_dir() -> String {
    "screenshots".to_string()
}

fn default_hide_delay_ms() -> u64 {
    500
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory screenshots are written to, relative to the working directory
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: String,
    /// Wait after hiding the main window before grabbing the screen.
    /// The window manager gives no hide acknowledgment, so this is a heuristic.
    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,
}

impl CaptureConfig {
    pub fn new() -> Self {
        let screenshot_dir =
            env::var("SCREENSHOT_DIR").unwrap_or_else(|_| default_screenshot_dir());

        let hide_delay_ms = env_parse("CAPTURE_DELAY_MS").unwrap_or_else(default_hide_delay_ms);

        Self {
            screenshot_dir,
            hide_delay_ms,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: default_screenshot_dir(),
            hide_delay_ms: default_hide_delay_ms(),
        }
    }
}
