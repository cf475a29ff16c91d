use kanal::AsyncSender;
use yomu_ocr::OcrText;
use yomu_types::{AppEvent, TextSource};

use crate::state::AppState;

use super::lookup::handle_lookup;

/// Recognize the configured region, find the character under `(x, y)` and
/// look it up
pub async fn handle_ocr_lookup(
    state: &AppState,
    x: f32,
    y: f32,
    generation: u64,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let region = {
        let config = state.config.read().await;
        config.ocr.capture_region.unwrap_or_default()
    };

    let paragraphs = match state.ocr.recognize(region).await {
        Ok(paragraphs) => paragraphs,
        Err(e) => {
            tracing::error!("[OCR] {} failed: {e:#}", state.ocr.name());
            output_tx
                .send(AppEvent::StatusUpdate {
                    status: format!("OCR failed: {e}"),
                })
                .await?;
            return Ok(());
        }
    };

    let text = OcrText::from_paragraphs(&paragraphs);
    let Some(offset) = text.hit_test(x, y) else {
        tracing::debug!("[OCR] No character at ({x}, {y})");
        output_tx
            .send(AppEvent::StatusUpdate {
                status: "No text under cursor".to_string(),
            })
            .await?;
        return Ok(());
    };

    tracing::debug!(offset, source = ?TextSource::Ocr, "[OCR] Hit character");
    handle_lookup(state, &text.text(), offset, generation, output_tx).await
}
