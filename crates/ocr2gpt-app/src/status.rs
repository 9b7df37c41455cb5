use chrono::{DateTime, Local};

/// Capture counters, logged after every capture
#[derive(Clone, Debug, Default)]
pub struct CaptureStatus {
    pub last_capture_time: Option<DateTime<Local>>,
    pub capture_count: u64,
    pub error_count: u64,
}

impl CaptureStatus {
    pub fn record_success(&mut self, at: DateTime<Local>) {
        self.capture_count += 1;
        self.last_capture_time = Some(at);
    }

    pub fn record_error(&mut self) {
        self.error_count += 1;
    }
}
