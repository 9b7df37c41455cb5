use xcap::Monitor;

/// In-memory RGBA screen grab
pub type Bitmap = image::RgbaImage;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No monitor found")]
    NoMonitor,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),
}

/// Something that can produce a screen bitmap.
///
/// Callers hide their own windows before grabbing; nothing here checks for that.
pub trait ScreenSource: Send + Sync {
    fn grab(&self) -> Result<Bitmap, CaptureError>;
}

/// The primary monitor, or the first one if none reports as primary
pub struct PrimaryMonitor;

impl ScreenSource for PrimaryMonitor {
    fn grab(&self) -> Result<Bitmap, CaptureError> {
        capture_primary_screen()
    }
}

/// Capture the entire primary monitor
pub fn capture_primary_screen() -> Result<Bitmap, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;

    let index = monitors.iter().position(|m| m.is_primary()).unwrap_or(0);
    let monitor = monitors.get(index).ok_or(CaptureError::NoMonitor)?;

    tracing::debug!(
        "Capturing monitor '{}' ({}x{})",
        monitor.name(),
        monitor.width(),
        monitor.height()
    );

    monitor
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))
}
