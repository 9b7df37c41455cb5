use anyhow::Context;
use arboard::Clipboard;

/// Clipboard handle owned by the UI thread.
///
/// On X11 the copied text is served by this process, so the handle has to stay
/// alive for as long as other apps may paste it.
pub struct ClipboardWriter {
    clipboard: Clipboard,
}

impl ClipboardWriter {
    pub fn new() -> anyhow::Result<Self> {
        let clipboard = Clipboard::new().context("Failed to open clipboard")?;
        Ok(Self { clipboard })
    }

    pub fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.clipboard
            .set_text(text.to_owned())
            .context("Failed to write clipboard")?;
        tracing::debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}
