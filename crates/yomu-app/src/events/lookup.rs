use kanal::AsyncSender;
use yomu_core::LookupResult;
use yomu_core::dictionary::DictionaryEntry;
use yomu_core::language::LanguageProcessor;
use yomu_lang_japanese::JMdictEntry;
use yomu_types::{AppEvent, DisplayResult};

use crate::state::AppState;

pub async fn handle_lookup(
    state: &AppState,
    text: &str,
    offset: usize,
    generation: u64,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let processor = state.processor.load();

    let result = match processor.lookup(text, offset) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Rejected lookup: {e}");
            output_tx
                .send(AppEvent::StatusUpdate {
                    status: e.to_string(),
                })
                .await?;
            return Ok(());
        }
    };

    if !state.is_current(generation) {
        tracing::debug!(generation, "Dropping stale lookup result");
        return Ok(());
    }

    let results = display_results(&result);
    tracing::debug!("Lookup produced {} display results", results.len());

    output_tx
        .send(AppEvent::ShowResults {
            generation,
            results,
        })
        .await?;

    Ok(())
}

/// Flatten a ranked result for display, primary first
pub fn display_results(result: &LookupResult<JMdictEntry>) -> Vec<DisplayResult> {
    result
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let entry = &candidate.entry;
            let definition = entry
                .senses
                .iter()
                .filter(|sense| entry.sense_applies(sense, candidate.form))
                .map(|sense| sense.glosses.join(", "))
                .collect::<Vec<_>>()
                .join("; ");

            DisplayResult {
                sequence_id: entry.seq,
                term: entry
                    .form_text(candidate.form)
                    .map_or_else(|| entry.headword(), str::to_string),
                reading: entry.reading_for(candidate.form).unwrap_or_default().to_string(),
                definition,
                matched: candidate.matched.clone(),
                span_len: candidate.span_len,
                conjugation: (!candidate.chain.is_empty()).then(|| candidate.chain.join(" → ")),
                is_primary: i == 0,
            }
        })
        .collect()
}
