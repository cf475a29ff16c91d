use crate::error::LookupError;
use crate::lookup::LookupResult;

/// Text processing and lookup interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    type Entry;

    /// Language identifier (ISO 639-1 code: "ja", "zh", "ko", etc.)
    fn language_code(&self) -> &str;

    /// Normalize text the way dictionary keys are normalized
    fn normalize(&self, text: &str) -> String;

    /// Resolve the dictionary entry under `offset` (in characters).
    ///
    /// Pure function of its inputs: no I/O, no shared mutation. An offset
    /// outside `text` is rejected; no match is an empty result.
    fn lookup(
        &self,
        text: &str,
        offset: usize,
    ) -> Result<LookupResult<Self::Entry>, LookupError>;
}
