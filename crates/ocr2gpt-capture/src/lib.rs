mod capture;
mod persist;

pub use capture::{Bitmap, CaptureError, PrimaryMonitor, ScreenSource, capture_primary_screen};
pub use persist::{PersistError, SavedScreenshot, save_screenshot, screenshot_file_name};
