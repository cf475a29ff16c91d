use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, bail};
use tokio::sync::RwLock;
use yomu_config::Config;
use yomu_config::ocr::OcrConfig;
use yomu_core::Snapshot;
use yomu_lang_japanese::{JapaneseProcessor, LoadPolicy, LookupOptions, ProcessorSources};
use yomu_ocr::{OcrProvider, OwocrFileProvider, StaticProvider};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub processor: Snapshot<JapaneseProcessor>,
    pub ocr: Arc<dyn OcrProvider>,
    /// Generation of the most recent lookup request; older results are stale
    pub latest_generation: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let processor = load_processor(&config)?;
        let ocr = ocr_provider(&config.ocr)?;
        Ok(Self::with_parts(config, processor, ocr))
    }

    pub fn with_parts(config: Config, processor: JapaneseProcessor, ocr: Arc<dyn OcrProvider>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            processor: Snapshot::new(processor),
            ocr,
            latest_generation: AtomicU64::new(0),
        }
    }

    /// Claim the next generation; it becomes the only current one
    pub fn next_generation(&self) -> u64 {
        self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest_generation.load(Ordering::SeqCst) == generation
    }
}

pub fn processor_sources(config: &Config) -> ProcessorSources {
    ProcessorSources {
        dictionary_paths: config.dictionary.paths.iter().map(PathBuf::from).collect(),
        rules_path: config.dictionary.rules_path.as_ref().map(PathBuf::from),
        priority_path: config.dictionary.priority_path.as_ref().map(PathBuf::from),
        policy: if config.dictionary.skip_invalid_entries {
            LoadPolicy::SkipInvalid
        } else {
            LoadPolicy::Strict
        },
        max_chain_depth: Some(config.lookup.max_chain_depth),
        options: LookupOptions {
            max_span_chars: config.lookup.max_span_chars,
            max_alternates: config.lookup.max_alternates,
        },
    }
}

/// Build a processor from the configured files. Blocking.
pub fn load_processor(config: &Config) -> anyhow::Result<JapaneseProcessor> {
    let (processor, report) = JapaneseProcessor::load(&processor_sources(config))
        .context("Failed to build dictionary index")?;

    for skipped in &report.skipped {
        tracing::warn!("Skipped entry in {}: {}", skipped.source, skipped.error);
    }
    tracing::info!(
        entries = report.loaded,
        skipped = report.skipped_count(),
        rules = processor.deconjugator().rules().len(),
        "Dictionary ready"
    );

    Ok(processor)
}

pub fn ocr_provider(config: &OcrConfig) -> anyhow::Result<Arc<dyn OcrProvider>> {
    let provider: Arc<dyn OcrProvider> = match config.provider.as_str() {
        "static" => Arc::new(StaticProvider::empty()),
        "owocr-file" => {
            let path = config
                .owocr_dump_path
                .as_ref()
                .context("owocr-file provider needs ocr.owocr_dump_path")?;
            Arc::new(OwocrFileProvider::new(path))
        }
        other => bail!("Unknown OCR provider: {other}"),
    };

    tracing::info!("Using OCR provider: {}", provider.name());
    Ok(provider)
}
