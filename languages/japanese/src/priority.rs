use std::collections::HashMap;
use std::path::Path;

use yomu_core::BuildError;

use crate::dictionary::JMdictEntry;
use crate::kana::normalize_key;

/// Score of one set of JMdict priority tags (`ke_pri`/`re_pri`).
///
/// `news1`/`ichi1`/`spec1`/`gai1` count 20, their `2` variants 10, and a
/// frequency band `nfNN` counts `50 - NN`.
pub fn tag_score(tags: &[String]) -> u32 {
    tags.iter().map(|tag| single_tag_score(tag)).sum()
}

fn single_tag_score(tag: &str) -> u32 {
    match tag {
        "news1" | "ichi1" | "spec1" | "gai1" => 20,
        "news2" | "ichi2" | "spec2" | "gai2" => 10,
        _ => tag
            .strip_prefix("nf")
            .and_then(|band| band.parse::<u32>().ok())
            .map_or(0, |band| 50u32.saturating_sub(band)),
    }
}

/// External (text, reading) → score list, added to an entry's priority
#[derive(Debug, Clone, Default)]
pub struct PriorityList {
    scores: HashMap<(String, String), u32>,
}

impl PriorityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of `[text, reading, score]` triples
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let triples: Vec<(String, String, u32)> = serde_json::from_str(json)?;
        let mut list = Self::new();
        for (text, reading, score) in triples {
            list.insert(&text, &reading, score);
        }
        Ok(list)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, BuildError> {
        tracing::info!("Loading priority list from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let list = Self::from_json(&json)?;
        tracing::info!("Loaded {} priority pairs", list.len());
        Ok(list)
    }

    /// Insert a pair, keeping the higher score on duplicates
    pub fn insert(&mut self, text: &str, reading: &str, score: u32) {
        let slot = self
            .scores
            .entry((normalize_key(text), normalize_key(reading)))
            .or_insert(0);
        *slot = (*slot).max(score);
    }

    pub fn get(&self, text: &str, reading: &str) -> Option<u32> {
        self.scores
            .get(&(normalize_key(text), normalize_key(reading)))
            .copied()
    }

    /// Highest score over the entry's (kanji, reading) pairs; kana-only
    /// entries use (reading, reading).
    pub fn score_for(&self, entry: &JMdictEntry) -> u32 {
        if self.scores.is_empty() {
            return 0;
        }

        let pairs: Vec<(&str, &str)> = if entry.is_kana_only() {
            entry
                .readings
                .iter()
                .map(|r| (r.text.as_str(), r.text.as_str()))
                .collect()
        } else {
            entry
                .kanji
                .iter()
                .enumerate()
                .flat_map(|(i, k)| {
                    entry
                        .readings_for_kanji(i)
                        .map(move |r| (k.text.as_str(), r.text.as_str()))
                })
                .collect()
        };

        pairs
            .into_iter()
            .filter_map(|(text, reading)| self.get(text, reading))
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
