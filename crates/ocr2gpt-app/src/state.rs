use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ocr2gpt_config::Config;
use tokio::sync::RwLock;

use crate::status::CaptureStatus;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub status: RwLock<CaptureStatus>,
    capture_in_flight: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            status: RwLock::new(CaptureStatus::default()),
            capture_in_flight: AtomicBool::new(false),
        }
    }

    /// Claim the single capture slot; `None` while another capture is outstanding
    pub fn try_begin_capture(self: &Arc<Self>) -> Option<InFlightGuard> {
        if self.capture_in_flight.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(InFlightGuard {
            state: Arc::clone(self),
        })
    }

    pub fn capture_in_flight(&self) -> bool {
        self.capture_in_flight.load(Ordering::SeqCst)
    }
}

/// Releases the capture slot when dropped, including on panic or early return
pub struct InFlightGuard {
    state: Arc<AppState>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.capture_in_flight.store(false, Ordering::SeqCst);
    }
}
