use std::path::Path;

use yomu_core::BuildError;

use crate::dictionary::JMdictEntry;
use crate::lexicon::Lexicon;

/// What to do with a malformed source entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Abort the build on the first malformed entry
    #[default]
    Strict,
    /// Skip malformed entries and count them in the report
    SkipInvalid,
}

#[derive(Debug)]
pub struct SkippedEntry {
    pub source: String,
    pub error: BuildError,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

pub struct JMdictLoader {
    policy: LoadPolicy,
}

impl JMdictLoader {
    pub fn new(policy: LoadPolicy) -> Self {
        Self { policy }
    }

    /// Build an index from one JSON array held in memory
    pub fn from_json_str(&self, json: &str) -> Result<(Lexicon, LoadReport), BuildError> {
        let mut report = LoadReport::default();
        let entries = self.parse_entries(json, "<memory>", &mut report)?;
        Ok((self.finish(entries, &mut report), report))
    }

    /// Load dictionary from file path
    pub fn load_from_file(&self, path: &Path) -> Result<(Lexicon, LoadReport), BuildError> {
        self.load_from_files(&[path])
    }

    /// Load and merge several files; a later file overrides an earlier one
    /// entry by entry (same `seq`).
    pub fn load_from_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<(Lexicon, LoadReport), BuildError> {
        let mut report = LoadReport::default();
        let mut entries = Vec::new();

        if paths.is_empty() {
            tracing::warn!("No dictionary files configured, starting with empty dictionary");
        }

        for path in paths {
            let path = path.as_ref();
            tracing::info!("Loading JMdict from file: {}", path.display());
            let json = std::fs::read_to_string(path)?;
            let source = path.display().to_string();
            entries.extend(self.parse_entries(&json, &source, &mut report)?);
        }

        Ok((self.finish(entries, &mut report), report))
    }

    fn parse_entries(
        &self,
        json: &str,
        source: &str,
        report: &mut LoadReport,
    ) -> Result<Vec<JMdictEntry>, BuildError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(values.len());

        for (position, value) in values.into_iter().enumerate() {
            match JMdictEntry::from_value(position, value) {
                Ok(entry) => entries.push(entry),
                Err(error) if self.policy == LoadPolicy::SkipInvalid => {
                    tracing::debug!("Skipping malformed entry in {source}: {error}");
                    report.skipped.push(SkippedEntry {
                        source: source.to_string(),
                        error,
                    });
                }
                Err(error) => {
                    tracing::error!("Malformed entry in {source}: {error}");
                    return Err(error);
                }
            }
        }

        Ok(entries)
    }

    fn finish(&self, entries: Vec<JMdictEntry>, report: &mut LoadReport) -> Lexicon {
        let lexicon = Lexicon::build(entries);
        report.loaded = lexicon.entry_count();

        tracing::info!("Loaded {} dictionary entries", report.loaded);
        if report.skipped_count() > 0 {
            tracing::warn!("Skipped {} malformed dictionary entries", report.skipped_count());
        }

        lexicon
    }
}

impl Default for JMdictLoader {
    fn default() -> Self {
        Self::new(LoadPolicy::Strict)
    }
}
