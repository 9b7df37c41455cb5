use ocr2gpt_core::{Shell, ShellUpdate};
use ocr2gpt_types::AppEvent;
use slint::{ComponentHandle, Weak};

use crate::{CaptureWindow, ResultsWindow};

/// Apply one backend event to the shell and mirror the result into the windows
pub fn handle_event(
    event: AppEvent,
    shell: &mut Shell,
    main_weak: &Weak<CaptureWindow>,
    results_weak: &Weak<ResultsWindow>,
) {
    match &event {
        AppEvent::BackendReady { backend } => {
            tracing::info!("[SLINT] Backend ready: {backend}");
        }
        AppEvent::CaptureSaved { path, .. } => {
            tracing::debug!("[SLINT] Capture saved: {}", path.display());
        }
        AppEvent::CaptureFailed { message, .. } => {
            tracing::debug!("[SLINT] Capture failed: {message}");
        }
        AppEvent::RecognitionFinished { outcome, .. } => {
            tracing::debug!("[SLINT] Recognition finished (failed: {})", outcome.is_failure());
        }
        AppEvent::Shutdown | AppEvent::CaptureRequested { .. } => {}
    }

    let update = shell.apply(&event);
    render(shell, update, main_weak, results_weak);
}

pub fn render(
    shell: &Shell,
    update: ShellUpdate,
    main_weak: &Weak<CaptureWindow>,
    results_weak: &Weak<ResultsWindow>,
) {
    if let Some(results) = results_weak.upgrade() {
        if update.log_changed {
            results.set_log_text(shell.log_text().into());
        }
        if update.scroll_to_end {
            results.invoke_scroll_to_end();
        }
    }

    if let Some(main) = main_weak.upgrade() {
        if update.button_changed {
            sync_button(shell, &main);
        }
        if update.show_main
            && let Err(e) = main.show()
        {
            tracing::error!("[SLINT] Failed to show main window: {e}");
        }
    }
}

pub fn sync_button(shell: &Shell, main: &CaptureWindow) {
    main.set_button_label(shell.button_label().into());
    main.set_busy(shell.is_processing());
    main.set_is_ready(shell.is_ready());
}
