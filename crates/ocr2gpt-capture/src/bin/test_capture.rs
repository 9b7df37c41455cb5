//! Manual capture check - run with: cargo run -p ocr2gpt-capture --bin test_capture

use anyhow::Result;

fn main() -> Result<()> {
    println!("=== Capture Test ===");

    let start = std::time::Instant::now();
    let bitmap = ocr2gpt_capture::capture_primary_screen()?;
    println!(
        "Captured {}x{} in {:?}",
        bitmap.width(),
        bitmap.height(),
        start.elapsed()
    );

    let saved = ocr2gpt_capture::save_screenshot(
        &bitmap,
        std::path::Path::new("screenshots"),
        chrono::Local::now(),
    )?;
    println!("Saved to {}", saved.path.display());

    Ok(())
}
