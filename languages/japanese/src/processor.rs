use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use yomu_core::dictionary::IndexHit;
use yomu_core::language::LanguageProcessor;
use yomu_core::preprocess::MappedText;
use yomu_core::{BuildError, CandidateMatch, LookupError, LookupResult, MatchScore};

use crate::deconjugator::{DEFAULT_MAX_DEPTH, JapaneseDeconjugator};
use crate::dictionary::JMdictEntry;
use crate::kana::{is_lookup_char, normalize_key, normalize_window};
use crate::lexicon::Lexicon;
use crate::loader::{JMdictLoader, LoadPolicy, LoadReport};
use crate::priority::PriorityList;
use crate::rules::RuleTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Longest span tried, in normalized characters
    pub max_span_chars: usize,
    /// Ranked candidates kept after the primary one
    pub max_alternates: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            max_span_chars: 25,
            max_alternates: 9,
        }
    }
}

/// Everything needed to assemble a processor from disk
#[derive(Debug, Clone, Default)]
pub struct ProcessorSources {
    pub dictionary_paths: Vec<PathBuf>,
    pub rules_path: Option<PathBuf>,
    pub priority_path: Option<PathBuf>,
    pub policy: LoadPolicy,
    pub max_chain_depth: Option<usize>,
    pub options: LookupOptions,
}

/// Japanese language processor
pub struct JapaneseProcessor {
    lexicon: Arc<Lexicon>,
    deconjugator: Arc<JapaneseDeconjugator>,
    priorities: Arc<PriorityList>,
    options: LookupOptions,
}

impl JapaneseProcessor {
    /// Processor over `lexicon` with the built-in rules and no priority list
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_parts(
            Arc::new(lexicon),
            Arc::new(JapaneseDeconjugator::new()),
            Arc::new(PriorityList::new()),
            LookupOptions::default(),
        )
    }

    pub fn with_parts(
        lexicon: Arc<Lexicon>,
        deconjugator: Arc<JapaneseDeconjugator>,
        priorities: Arc<PriorityList>,
        options: LookupOptions,
    ) -> Self {
        Self {
            lexicon,
            deconjugator,
            priorities,
            options,
        }
    }

    /// Load dictionaries, rules and priorities. Any failure leaves the caller
    /// with nothing, so a running processor is never half replaced.
    pub fn load(sources: &ProcessorSources) -> Result<(Self, LoadReport), BuildError> {
        let (lexicon, report) =
            JMdictLoader::new(sources.policy).load_from_files(&sources.dictionary_paths)?;

        let rules = match &sources.rules_path {
            Some(path) => RuleTable::load_from_file(path)?,
            None => RuleTable::japanese(),
        };
        let depth = sources.max_chain_depth.unwrap_or(DEFAULT_MAX_DEPTH);

        let priorities = match &sources.priority_path {
            Some(path) => PriorityList::load_from_file(path)?,
            None => PriorityList::new(),
        };

        let processor = Self::with_parts(
            Arc::new(lexicon),
            Arc::new(JapaneseDeconjugator::with_rules(rules, depth)),
            Arc::new(priorities),
            sources.options,
        );
        Ok((processor, report))
    }

    /// Convenience for a single dictionary file with defaults
    pub fn from_dictionary_file(path: &Path) -> Result<(Self, LoadReport), BuildError> {
        Self::load(&ProcessorSources {
            dictionary_paths: vec![path.to_path_buf()],
            ..ProcessorSources::default()
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn deconjugator(&self) -> &JapaneseDeconjugator {
        &self.deconjugator
    }

    pub fn options(&self) -> LookupOptions {
        self.options
    }

    /// Longest span worth trying: no key is longer than `max_key_chars`, and
    /// no chain adds more than the deconjugator's growth bound.
    fn span_limit(&self) -> usize {
        let reachable = self.lexicon.max_key_chars() + self.deconjugator.max_growth();
        self.options.max_span_chars.min(reachable)
    }

    fn candidate(
        &self,
        hit: IndexHit<JMdictEntry>,
        matched: String,
        span_len: usize,
        stem: String,
        chain: Vec<String>,
    ) -> CandidateMatch<JMdictEntry> {
        let score = MatchScore {
            span_len,
            chain_len: chain.len(),
            form_priority: hit.entry.form_priority(hit.form),
            entry_priority: hit.entry.best_priority() + self.priorities.score_for(&hit.entry),
            sequence_id: hit.entry.seq,
        };

        CandidateMatch {
            entry: hit.entry,
            form: hit.form,
            matched,
            stem,
            chain,
            span_len,
            score,
        }
    }
}

impl LanguageProcessor for JapaneseProcessor {
    type Entry = JMdictEntry;

    fn language_code(&self) -> &str {
        "ja"
    }

    fn normalize(&self, text: &str) -> String {
        normalize_key(text)
    }

    fn lookup(&self, text: &str, offset: usize) -> Result<LookupResult<JMdictEntry>, LookupError> {
        let chars: Vec<char> = text.chars().collect();
        if offset >= chars.len() {
            return Err(LookupError::OffsetOutOfBounds {
                offset,
                len: chars.len(),
            });
        }

        let limit = self.span_limit();
        if limit == 0 {
            return Ok(LookupResult::empty());
        }

        // At most two source characters fold into one normalized character
        let window_len = limit * 2;
        let window_end = (offset + window_len).min(chars.len());
        let window = normalize_window(&chars, offset, window_len);

        let run_len = window
            .chars()
            .iter()
            .take_while(|&&c| is_lookup_char(c))
            .count()
            .min(limit);
        if run_len == 0 {
            tracing::trace!(offset, "No lookup characters at offset");
            return Ok(LookupResult::empty());
        }
        let run = &window.chars()[..run_len];

        let matched_text = |len: usize| {
            let source_len = source_span(&window, offset, len, window_end);
            let matched: String = chars[offset..offset + source_len].iter().collect();
            (matched, source_len)
        };

        let mut candidates = Vec::new();

        for hit in self.lexicon.lookup_prefix_normalized(run) {
            let (matched, span_len) = matched_text(hit.key_chars);
            let stem: String = run[..hit.key_chars].iter().collect();
            candidates.push(self.candidate(hit, matched, span_len, stem, Vec::new()));
        }

        for len in (1..=run_len).rev() {
            let span: String = run[..len].iter().collect();
            for result in self.deconjugator.deconjugate(&span) {
                if result.is_unconjugated() {
                    continue;
                }
                for hit in self.lexicon.lookup_normalized(&result.base_form) {
                    if !hit.entry.has_pos(hit.form, &result.required_pos) {
                        continue;
                    }
                    let (matched, span_len) = matched_text(len);
                    candidates.push(self.candidate(
                        hit,
                        matched,
                        span_len,
                        result.base_form.clone(),
                        result.chain.clone(),
                    ));
                }
            }
        }

        let found = candidates.len();
        let ranked = rank(candidates);
        tracing::debug!(offset, run_len, found, kept = ranked.len(), "Lookup complete");

        Ok(LookupResult::from_ranked(ranked, self.options.max_alternates))
    }
}

/// Best first, one candidate per entry. The sort is stable so equal scores
/// keep discovery order.
fn rank(mut candidates: Vec<CandidateMatch<JMdictEntry>>) -> Vec<CandidateMatch<JMdictEntry>> {
    candidates.sort_by(|a, b| a.score.cmp(&b.score));
    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.entry.seq));
    candidates
}

/// Source characters covered by the first `len` normalized characters of
/// `window`, including voiced marks that were composed into the last one.
fn source_span(window: &MappedText, offset: usize, len: usize, window_end: usize) -> usize {
    let Some(last) = window.source_of(len - 1) else {
        return len;
    };
    let end = match window.source_of(len) {
        Some(next) if next > last => next,
        Some(_) => last + 1,
        None => window_end.max(last + 1),
    };
    end - offset
}
