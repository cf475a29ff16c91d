use std::cmp::Ordering;
use std::sync::Arc;

use crate::dictionary::FormRef;

/// Ranking signals for one candidate. Ordering puts the better candidate
/// first: longer span, then shorter chain, then higher form priority, then
/// higher entry priority, then lower sequence id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    pub span_len: usize,
    pub chain_len: usize,
    pub form_priority: u32,
    pub entry_priority: u32,
    pub sequence_id: u64,
}

impl Ord for MatchScore {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .span_len
            .cmp(&self.span_len)
            .then_with(|| self.chain_len.cmp(&other.chain_len))
            .then_with(|| other.form_priority.cmp(&self.form_priority))
            .then_with(|| other.entry_priority.cmp(&self.entry_priority))
            .then_with(|| self.sequence_id.cmp(&other.sequence_id))
    }
}

impl PartialOrd for MatchScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMatch<E> {
    pub entry: Arc<E>,
    /// Form of the entry the stem matched
    pub form: FormRef,
    /// Source text covered by the match
    pub matched: String,
    /// Citation form recovered by deinflection
    pub stem: String,
    /// Conjugations in derivation order, empty for an uninflected match
    pub chain: Vec<String>,
    /// Matched span length in source characters
    pub span_len: usize,
    pub score: MatchScore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult<E> {
    pub primary: Option<CandidateMatch<E>>,
    pub alternates: Vec<CandidateMatch<E>>,
    /// Span of the primary match in source characters, 0 when empty
    pub span_len: usize,
}

impl<E> LookupResult<E> {
    pub fn empty() -> Self {
        Self {
            primary: None,
            alternates: Vec::new(),
            span_len: 0,
        }
    }

    /// Build from candidates already sorted best-first and deduplicated.
    pub fn from_ranked(ranked: Vec<CandidateMatch<E>>, max_alternates: usize) -> Self {
        let mut ranked = ranked.into_iter();
        let Some(primary) = ranked.next() else {
            return Self::empty();
        };

        Self {
            span_len: primary.span_len,
            primary: Some(primary),
            alternates: ranked.take(max_alternates).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    /// Primary first, then alternates in rank order
    pub fn iter(&self) -> impl Iterator<Item = &CandidateMatch<E>> {
        self.primary.iter().chain(self.alternates.iter())
    }

    pub fn len(&self) -> usize {
        self.primary.iter().count() + self.alternates.len()
    }
}
