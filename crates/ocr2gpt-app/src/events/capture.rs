use std::path::PathBuf;

use chrono::Local;
use ocr2gpt_capture::save_screenshot;
use ocr2gpt_types::{AppEvent, CaptureId, RecognitionOutcome};

use crate::capture_context::CaptureContext;

/// Grab, persist, then recognize one capture, reporting each step to the UI.
///
/// Per-capture failures become events; `Err` only means the UI channel is gone.
pub async fn handle_capture(ctx: &CaptureContext, capture_id: CaptureId) -> anyhow::Result<()> {
    let screenshot_dir = {
        let config = ctx.state.config.read().await;
        PathBuf::from(&config.capture.screenshot_dir)
    };

    let screen = ctx.screen.clone();
    let grabbed = tokio::task::spawn_blocking(move || {
        let bitmap = screen.grab()?;
        let taken_at = Local::now();
        let saved = save_screenshot(&bitmap, &screenshot_dir, taken_at)?;
        Ok::<_, anyhow::Error>((saved, taken_at))
    })
    .await;

    let (saved, taken_at) = match grabbed {
        Ok(Ok(saved)) => saved,
        Ok(Err(e)) => {
            tracing::error!("[CAPTURE] {capture_id} failed: {e}");
            ctx.state.status.write().await.record_error();
            ctx.event_tx
                .send(AppEvent::CaptureFailed {
                    capture_id,
                    message: e.to_string(),
                })
                .await?;
            return Ok(());
        }
        Err(e) => {
            tracing::error!("[CAPTURE] {capture_id} task error: {e}");
            ctx.state.status.write().await.record_error();
            ctx.event_tx
                .send(AppEvent::CaptureFailed {
                    capture_id,
                    message: "capture task panicked".to_string(),
                })
                .await?;
            return Ok(());
        }
    };

    ctx.state.status.write().await.record_success(taken_at);

    let recognizer = ctx.recognizer.clone();
    ctx.event_tx
        .send(AppEvent::CaptureSaved {
            capture_id,
            file_name: saved.file_name.clone(),
            path: saved.path.clone(),
            taken_at,
            recognizing: recognizer.is_some(),
        })
        .await?;

    let Some(recognizer) = recognizer else {
        return Ok(());
    };

    tracing::debug!(
        "[CAPTURE] {capture_id} recognizing with {}",
        recognizer.metadata().name
    );
    let outcome = match recognizer.recognize(&saved.path).await {
        Ok(text) => {
            tracing::debug!("[CAPTURE] {capture_id} got {} chars", text.len());
            RecognitionOutcome::from_text(&text)
        }
        Err(e) => {
            tracing::error!("[CAPTURE] {capture_id} recognition failed: {e}");
            ctx.state.status.write().await.record_error();
            RecognitionOutcome::Failed(e.to_string())
        }
    };

    ctx.event_tx
        .send(AppEvent::RecognitionFinished {
            capture_id,
            outcome,
            finished_at: Local::now(),
        })
        .await?;

    let status = ctx.state.status.read().await;
    tracing::info!(
        "[CAPTURE] {capture_id} done ({} captures, {} errors)",
        status.capture_count,
        status.error_count
    );

    Ok(())
}
