use std::collections::HashSet;

use crate::rules::RuleTable;

/// Default bound on the number of stacked rules
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// One candidate base form of an inflected span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeconjugationResult {
    pub base_form: String,
    /// Rule labels from the dictionary form outwards
    /// (食べさせられなかった: causative, passive, negative, past)
    pub chain: Vec<String>,
    /// Classes the dictionary entry must carry; empty when nothing was undone
    pub required_pos: Vec<String>,
}

impl DeconjugationResult {
    pub fn is_unconjugated(&self) -> bool {
        self.chain.is_empty()
    }
}

pub struct JapaneseDeconjugator {
    rules: RuleTable,
    max_depth: usize,
}

impl JapaneseDeconjugator {
    pub fn new() -> Self {
        Self::with_rules(RuleTable::japanese(), DEFAULT_MAX_DEPTH)
    }

    pub fn with_rules(rules: RuleTable, max_depth: usize) -> Self {
        Self { rules, max_depth }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Upper bound on how many characters a fully stacked chain can add to a
    /// dictionary form
    pub fn max_growth(&self) -> usize {
        self.rules.max_growth() * self.max_depth
    }

    /// Deconjugate a word to its possible base forms.
    ///
    /// The word itself comes first with an empty chain. Candidates are
    /// produced lazily so callers can stop early.
    pub fn deconjugate<'a>(&'a self, word: &str) -> Deconjugations<'a> {
        Deconjugations {
            rules: &self.rules,
            max_depth: self.max_depth,
            pending: vec![State {
                text: word.to_string(),
                applied: Vec::new(),
            }],
            seen: HashSet::new(),
        }
    }
}

impl Default for JapaneseDeconjugator {
    fn default() -> Self {
        Self::new()
    }
}

struct State {
    text: String,
    /// Rule indices, outermost first
    applied: Vec<usize>,
}

/// Lazy worklist over all reachable base forms
pub struct Deconjugations<'a> {
    rules: &'a RuleTable,
    max_depth: usize,
    pending: Vec<State>,
    seen: HashSet<(String, Vec<String>, Vec<String>)>,
}

impl Deconjugations<'_> {
    fn labels(&self, applied: &[usize]) -> Vec<String> {
        applied
            .iter()
            .rev()
            .filter_map(|&idx| self.rules.get(idx))
            .map(|rule| rule.label.clone())
            .collect()
    }

    fn required_pos(&self, applied: &[usize]) -> Vec<String> {
        applied
            .last()
            .and_then(|&idx| self.rules.get(idx))
            .map(|rule| rule.stem_pos.clone())
            .unwrap_or_default()
    }

    fn expand(&mut self, state: &State) {
        let depth = state.applied.len();
        if depth >= self.max_depth {
            return;
        }

        let previous = state.applied.last().and_then(|&idx| self.rules.get(idx));
        let mut next = Vec::new();

        for (idx, rule) in self.rules.matching(&state.text) {
            if rule.max_depth.is_some_and(|limit| depth >= limit) {
                continue;
            }
            if let Some(previous) = previous {
                if !rule.chains_from(&previous.stem_pos) {
                    continue;
                }
            }

            let prefix = &state.text[..state.text.len() - rule.surface.len()];
            let text = format!("{prefix}{}", rule.stem);
            if text.is_empty() || text == state.text {
                continue;
            }

            let mut applied = state.applied.clone();
            applied.push(idx);
            next.push(State { text, applied });
        }

        // Stack order: the first matching rule is visited first
        self.pending.extend(next.into_iter().rev());
    }
}

impl Iterator for Deconjugations<'_> {
    type Item = DeconjugationResult;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(state) = self.pending.pop() {
            let chain = self.labels(&state.applied);
            let required_pos = self.required_pos(&state.applied);
            let key = (state.text.clone(), chain.clone(), required_pos.clone());
            if !self.seen.insert(key) {
                continue;
            }

            self.expand(&state);

            return Some(DeconjugationResult {
                base_form: state.text,
                chain,
                required_pos,
            });
        }
        None
    }
}
