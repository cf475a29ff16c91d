use std::sync::Arc;

use kanal::AsyncReceiver;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use yomu_types::{AppEvent, DisplayResult};

use crate::state::AppState;

#[derive(Serialize)]
#[serde(untagged)]
enum OutputLine<'a> {
    Results {
        generation: u64,
        results: &'a [DisplayResult],
    },
    Status {
        status: &'a str,
    },
}

/// Writes results and status updates as JSON lines
pub async fn output_loop<W>(
    state: Arc<AppState>,
    output_rx: AsyncReceiver<AppEvent>,
    mut output: W,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    loop {
        let event = tokio::select! {
            biased;
            event = output_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        let line = match &event {
            AppEvent::ShowResults {
                generation,
                results,
            } => {
                // A newer request arrived while this one was being resolved
                if !state.is_current(*generation) {
                    tracing::debug!(generation, "Dropping stale results");
                    continue;
                }
                OutputLine::Results {
                    generation: *generation,
                    results,
                }
            }
            AppEvent::StatusUpdate { status } => OutputLine::Status { status },
            _ => continue,
        };

        let mut json = serde_json::to_vec(&line)?;
        json.push(b'\n');
        output.write_all(&json).await?;
        output.flush().await?;
    }

    Ok(())
}
