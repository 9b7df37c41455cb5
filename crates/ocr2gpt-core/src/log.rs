//! Append-only result pane text.
//!
//! The pane is only ever mutated from the UI thread; blocks are formatted here so
//! the slint side just mirrors `ResultLog::text`.

use chrono::{DateTime, Local};
use ocr2gpt_types::RecognitionOutcome;

const HEADER_RULE_WIDTH: usize = 65;
const RESULT_RULE_WIDTH: usize = 50;

pub struct ResultLog {
    text: String,
    placeholder: String,
}

impl ResultLog {
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            text: placeholder.clone(),
            placeholder,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn append(&mut self, block: &str) {
        self.text.push_str(block);
    }

    /// Reset to the placeholder; the pane is never left empty
    pub fn clear(&mut self) {
        self.text.clone_from(&self.placeholder);
    }

    /// Everything in the pane, trimmed, followed by `suffix` verbatim
    pub fn export_all(&self, suffix: &str) -> String {
        let mut out = self.text.trim().to_string();
        out.push_str(suffix);
        out
    }
}

fn clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Block appended once a screenshot is on disk
pub fn capture_header(at: &DateTime<Local>, file_name: &str, running: Option<&str>) -> String {
    let rule = "=".repeat(HEADER_RULE_WIDTH);
    let mut block = format!("\n{rule}\n[{}] Screenshot saved: {file_name}\n", clock(at));
    if let Some(label) = running {
        block.push_str(&format!("Running {label}...\n{rule}\n\n"));
    }
    block
}

/// Block appended when recognition for a capture completes
pub fn outcome_block(at: &DateTime<Local>, outcome: &RecognitionOutcome) -> String {
    let rule = "-".repeat(RESULT_RULE_WIDTH);
    match outcome {
        RecognitionOutcome::Text(text) => {
            format!("[{}] OCR Result:\n{text}\n{rule}\n", clock(at))
        }
        RecognitionOutcome::NoText => {
            format!("[{}] OCR Result: No text detected.\n{rule}\n", clock(at))
        }
        RecognitionOutcome::Failed(reason) => {
            format!("Error: OCR processing failed: {reason}\n")
        }
    }
}

pub fn capture_error_block(reason: &str) -> String {
    format!("Error: Failed to take screenshot: {reason}\n")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const PLACEHOLDER: &str = "OCR results will be displayed here.\n";

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 17, 9, 3, 7).single().unwrap()
    }

    #[test]
    fn new_log_shows_placeholder() {
        let log = ResultLog::new(PLACEHOLDER);
        assert_eq!(log.text(), PLACEHOLDER);
    }

    #[test]
    fn clear_restores_exactly_the_placeholder() {
        let mut log = ResultLog::new(PLACEHOLDER);
        log.append("first\n");
        log.append("second\n");
        log.clear();
        assert_eq!(log.text(), PLACEHOLDER);

        // Clearing twice is still just the placeholder
        log.clear();
        assert_eq!(log.text(), PLACEHOLDER);
    }

    #[test]
    fn export_appends_suffix_verbatim() {
        let mut log = ResultLog::new("");
        log.append("\n  line one\nline two  \n\n");
        assert_eq!(
            log.export_all("\nSummarize the above."),
            "line one\nline two\nSummarize the above."
        );
        assert_eq!(log.export_all(""), "line one\nline two");
    }

    #[test]
    fn header_without_backend_omits_running_line() {
        let block = capture_header(&at(), "screenshot_20240517_090307.png", None);
        assert_eq!(
            block,
            format!(
                "\n{}\n[09:03:07] Screenshot saved: screenshot_20240517_090307.png\n",
                "=".repeat(65)
            )
        );
    }

    #[test]
    fn header_with_backend_announces_run() {
        let block = capture_header(&at(), "a.png", Some("OCR"));
        assert!(block.ends_with(&format!("Running OCR...\n{}\n\n", "=".repeat(65))));
    }

    #[test]
    fn outcome_blocks() {
        let text = outcome_block(&at(), &RecognitionOutcome::Text("hello\nworld".into()));
        assert_eq!(
            text,
            format!("[09:03:07] OCR Result:\nhello\nworld\n{}\n", "-".repeat(50))
        );

        let empty = outcome_block(&at(), &RecognitionOutcome::NoText);
        assert!(empty.starts_with("[09:03:07] OCR Result: No text detected.\n"));

        let failed = outcome_block(&at(), &RecognitionOutcome::Failed("boom".into()));
        assert_eq!(failed, "Error: OCR processing failed: boom\n");
    }
}
