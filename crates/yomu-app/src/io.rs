use std::sync::Arc;

use anyhow::{Context, bail};
use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;
use yomu_types::{AppEvent, TextSource};

use crate::state::AppState;

/// Reads one command per line and forwards it to the event loop.
///
/// Every lookup claims a new generation as it is read, so anything still in
/// flight for an older request is discarded when it completes.
pub async fn watcher_io<R>(
    state: Arc<AppState>,
    input: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(input).lines();
    tracing::info!("Listening for commands on input");

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Input watcher stopping");
                break;
            }
            line = lines.next_line() => line.context("Failed to read input")?,
        };

        let Some(line) = line else {
            tracing::info!("Input closed");
            event_tx.send(AppEvent::Shutdown).await?;
            break;
        };

        match parse_command(&line, || state.next_generation()) {
            Ok(Some(event)) => event_tx.send(event).await?,
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring input line {line:?}: {e:#}"),
        }
    }

    Ok(())
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// Commands: `lookup <offset> <text>`, `ocr <x> <y>`, `reload`, `quit`.
pub fn parse_command(line: &str, next_generation: impl FnOnce() -> u64) -> anyhow::Result<Option<AppEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim_start();

    let event = match command {
        "lookup" => {
            let (offset, text) = rest
                .split_once(' ')
                .context("usage: lookup <offset> <text>")?;
            let offset = offset
                .parse()
                .with_context(|| format!("invalid offset {offset:?}"))?;
            AppEvent::Lookup {
                text: text.to_string(),
                offset,
                source: TextSource::Manual,
                generation: next_generation(),
            }
        }
        "ocr" => {
            let mut coords = rest.split_whitespace().map(str::parse::<f32>);
            let (Some(Ok(x)), Some(Ok(y)), None) = (coords.next(), coords.next(), coords.next()) else {
                bail!("usage: ocr <x> <y>");
            };
            AppEvent::OcrLookup {
                x,
                y,
                generation: next_generation(),
            }
        }
        "reload" => AppEvent::ReloadDictionary,
        "quit" | "exit" => AppEvent::Shutdown,
        other => bail!("unknown command {other:?}"),
    };

    Ok(Some(event))
}
