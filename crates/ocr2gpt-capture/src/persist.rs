use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::ImageFormat;

use crate::capture::Bitmap;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to create directory {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Debug, Clone)]
pub struct SavedScreenshot {
    pub path: PathBuf,
    pub file_name: String,
}

/// `screenshot_YYYYMMDD_HHMMSS.png`; second resolution, so same-second captures collide
pub fn screenshot_file_name(at: DateTime<Local>) -> String {
    format!("screenshot_{}.png", at.format("%Y%m%d_%H%M%S"))
}

/// Write `bitmap` as PNG into `dir`, creating the directory if needed.
/// An existing file with the same name is overwritten.
pub fn save_screenshot(
    bitmap: &Bitmap,
    dir: &Path,
    at: DateTime<Local>,
) -> Result<SavedScreenshot, PersistError> {
    fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let file_name = screenshot_file_name(at);
    let path = dir.join(&file_name);

    bitmap
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!("Screenshot saved: {}", path.display());
    Ok(SavedScreenshot { path, file_name })
}
