use std::cell::RefCell;
use std::rc::Rc;

use ocr2gpt_core::Shell;
use ocr2gpt_io::clipboard::ClipboardWriter;

/// UI-thread state shared by the slint callbacks
#[derive(Clone)]
pub struct UiState {
    pub shell: Rc<RefCell<Shell>>,
    /// Opened on first copy so a missing clipboard doesn't block startup
    pub clipboard: Rc<RefCell<Option<ClipboardWriter>>>,
}

impl UiState {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell: Rc::new(RefCell::new(shell)),
            clipboard: Rc::new(RefCell::new(None)),
        }
    }

    pub fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
        let mut slot = self.clipboard.borrow_mut();
        if slot.is_none() {
            *slot = Some(ClipboardWriter::new()?);
        }
        match slot.as_mut() {
            Some(clipboard) => clipboard.set_text(text),
            None => anyhow::bail!("Clipboard unavailable"),
        }
    }
}
