use kanal::AsyncReceiver;
use ocr2gpt_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::capture_context::CaptureContext;

pub mod capture;

use capture::handle_capture;

/// Backend main loop
pub async fn event_loop(
    ctx: CaptureContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let backend = ctx.backend();
    ctx.event_tx.send(AppEvent::BackendReady { backend }).await?;

    tracing::info!("[EVENT_LOOP] Backend '{backend}' ready, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        match event {
            AppEvent::CaptureRequested { capture_id } => {
                let Some(guard) = ctx.state.try_begin_capture() else {
                    tracing::warn!("[EVENT_LOOP] Capture {capture_id} rejected, one is in flight");
                    ctx.event_tx
                        .send(AppEvent::CaptureFailed {
                            capture_id,
                            message: "a capture is already in progress".to_string(),
                        })
                        .await?;
                    continue;
                };

                let ctx = ctx.clone();
                tokio::spawn(async move {
                    let _guard = guard;
                    if let Err(e) = handle_capture(&ctx, capture_id).await {
                        tracing::error!("[CAPTURE] {capture_id} aborted: {e:#}");
                    }
                });
            }
            AppEvent::Shutdown => {
                tracing::info!("[EVENT_LOOP] Shutdown requested by UI");
                break;
            }
            // Backend -> UI events, nothing to do here
            AppEvent::CaptureSaved { .. }
            | AppEvent::CaptureFailed { .. }
            | AppEvent::RecognitionFinished { .. }
            | AppEvent::BackendReady { .. } => {}
        }
    }

    Ok(())
}
