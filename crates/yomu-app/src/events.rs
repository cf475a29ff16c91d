use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use yomu_types::AppEvent;

use crate::state::AppState;

pub mod lookup;
pub mod ocr_lookup;
pub mod reload;

use lookup::handle_lookup;
use ocr_lookup::handle_ocr_lookup;
use reload::handle_reload;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("Event loop started");

    loop {
        let event = tokio::select! {
            biased;
            event = input_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        if matches!(event, AppEvent::Shutdown) {
            tracing::info!("Shutdown event received");
            cancel.cancel();
            break;
        }

        handle_events(&state, &output_tx, event).await?;
    }

    tracing::debug!("Event loop stopped");
    Ok(())
}

async fn handle_events(
    state: &Arc<AppState>,
    output_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Lookup {
            text,
            offset,
            source,
            generation,
        } => {
            tracing::debug!(offset, ?source, generation, "Lookup requested");
            handle_lookup(state, &text, offset, generation, output_tx).await?;
        }
        AppEvent::OcrLookup { x, y, generation } => {
            tracing::debug!(x, y, generation, "OCR lookup requested");
            handle_ocr_lookup(state, x, y, generation, output_tx).await?;
        }
        AppEvent::ReloadDictionary => {
            handle_reload(state, output_tx).await?;
        }
        AppEvent::ShowResults { .. } | AppEvent::StatusUpdate { .. } => {
            // Output-only events, ignore in backend
        }
        AppEvent::Shutdown => {}
    }

    Ok(())
}
