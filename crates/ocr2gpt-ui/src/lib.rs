use std::time::Duration;

use ocr2gpt_config::ui::UiConfig;
use ocr2gpt_core::Shell;
use ocr2gpt_types::AppEvent;
use slint::{CloseRequestResponse, ComponentHandle, Timer, TimerMode};

pub mod bridge;
pub mod events;
pub mod state;

use bridge::UiBridgeHandle;
use events::{handle_event, render, sync_button};
use state::UiState;

slint::include_modules!();

const COPY_FEEDBACK: &str = "✓ Text copied to clipboard.";

/// Runs the slint event loop on the calling thread until the main window closes
pub fn run_ui(bridge: UiBridgeHandle, config: UiConfig, hide_delay: Duration) -> anyhow::Result<()> {
    let main = CaptureWindow::new()?;
    let results = ResultsWindow::new()?;
    let main_weak = main.as_weak();
    let results_weak = results.as_weak();

    let bridge = std::rc::Rc::new(bridge);
    let state = UiState::new(Shell::new(config.placeholder.clone(), config.copy_suffix.clone()));

    {
        let shell = state.shell.borrow();
        results.set_log_text(shell.log_text().into());
        sync_button(&shell, &main);
    }

    // Take screenshot: flag, hide, wait, then hand off to the backend
    {
        let state = state.clone();
        let bridge = bridge.clone();
        let main_weak = main_weak.clone();
        let results_weak = results_weak.clone();
        main.on_take_screenshot(move || {
            let capture_id = match state.shell.borrow_mut().press_capture() {
                Ok(id) => id,
                Err(e) => {
                    tracing::debug!("[SLINT] Ignoring button press: {e}");
                    return;
                }
            };

            if let Some(main) = main_weak.upgrade() {
                sync_button(&state.shell.borrow(), &main);
                main.hide().ok();
            }
            if let Some(results) = results_weak.upgrade() {
                results.show().ok();
            }

            let state = state.clone();
            let bridge = bridge.clone();
            let main_weak = main_weak.clone();
            let results_weak = results_weak.clone();
            Timer::single_shot(hide_delay, move || {
                tracing::debug!("[SLINT] Requesting capture {capture_id}");
                if !bridge.post(AppEvent::CaptureRequested { capture_id }) {
                    let failed = AppEvent::CaptureFailed {
                        capture_id,
                        message: "backend is not accepting requests".to_string(),
                    };
                    handle_event(failed, &mut state.shell.borrow_mut(), &main_weak, &results_weak);
                }
            });
        });
    }

    {
        let state = state.clone();
        let results_weak = results_weak.clone();
        let feedback_delay = Duration::from_millis(config.feedback_ms);
        results.on_copy_all(move || {
            let text = state.shell.borrow().copy_text();
            match state.copy_to_clipboard(&text) {
                Ok(()) => {
                    if let Some(results) = results_weak.upgrade() {
                        results.set_feedback(COPY_FEEDBACK.into());
                    }
                    let results_weak = results_weak.clone();
                    Timer::single_shot(feedback_delay, move || {
                        if let Some(results) = results_weak.upgrade() {
                            results.set_feedback("".into());
                        }
                    });
                }
                Err(e) => tracing::error!("[SLINT] Copy error: {e:#}"),
            }
        });
    }

    {
        let state = state.clone();
        let main_weak = main_weak.clone();
        let results_weak = results_weak.clone();
        results.on_clear(move || {
            let mut shell = state.shell.borrow_mut();
            let update = shell.clear();
            render(&shell, update, &main_weak, &results_weak);
        });
    }

    // Closing the results window only hides it; closing the main window quits
    results
        .window()
        .on_close_requested(|| CloseRequestResponse::HideWindow);
    main.window().on_close_requested(|| {
        slint::quit_event_loop().ok();
        CloseRequestResponse::HideWindow
    });

    // Drain backend events on the UI thread every tick
    let drain_timer = Timer::default();
    {
        let state = state.clone();
        let bridge = bridge.clone();
        let main_weak = main_weak.clone();
        let results_weak = results_weak.clone();
        drain_timer.start(
            TimerMode::Repeated,
            Duration::from_millis(config.poll_interval_ms.max(1)),
            move || match bridge.drain() {
                Ok(events) => {
                    for event in events {
                        handle_event(event, &mut state.shell.borrow_mut(), &main_weak, &results_weak);
                    }
                }
                Err(e) => {
                    tracing::error!("[SLINT] Backend channel closed: {e}");
                    slint::quit_event_loop().ok();
                }
            },
        );
    }

    main.show()?;
    results.show()?;

    slint::run_event_loop_until_quit()?;
    drain_timer.stop();

    tracing::info!("[SLINT] Event loop finished");
    bridge.post(AppEvent::Shutdown);

    Ok(())
}
