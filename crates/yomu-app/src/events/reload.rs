use std::sync::Arc;

use anyhow::Context;
use kanal::AsyncSender;
use yomu_types::AppEvent;

use crate::state::{AppState, load_processor};

/// Rebuild the dictionary off the async runtime and swap it in. On failure
/// the current dictionary stays in place.
pub async fn handle_reload(
    state: &Arc<AppState>,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let config = state.config.read().await.clone();

    let loaded = tokio::task::spawn_blocking(move || load_processor(&config))
        .await
        .context("Dictionary reload task panicked")?;

    let status = match loaded {
        Ok(processor) => {
            let entries = processor.lexicon().entry_count();
            state.processor.swap(processor);
            tracing::info!("Dictionary reloaded with {entries} entries");
            format!("Dictionary reloaded ({entries} entries)")
        }
        Err(e) => {
            tracing::error!("Reload failed, keeping current dictionary: {e:#}");
            format!("Reload failed: {e}")
        }
    };

    output_tx.send(AppEvent::StatusUpdate { status }).await?;
    Ok(())
}
