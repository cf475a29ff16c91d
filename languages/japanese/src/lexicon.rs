use std::collections::HashMap;
use std::sync::Arc;

use yomu_core::dictionary::{Dictionary, FormRef, IndexHit};

use crate::dictionary::JMdictEntry;
use crate::kana::normalize_key;

#[derive(Debug, Clone, Copy)]
struct KeyRef {
    entry: usize,
    form: FormRef,
}

/// Immutable lexical index over JMdict entries.
///
/// Every kanji and reading form is inserted under its normalized key;
/// homographs share a key and keep insertion order.
#[derive(Debug, Default)]
pub struct Lexicon {
    entries: Vec<Arc<JMdictEntry>>,
    by_seq: HashMap<u64, usize>,
    keys: HashMap<String, Vec<KeyRef>>,
    max_key_chars: usize,
}

impl Lexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index. A repeated `seq` replaces the earlier entry in place.
    pub fn build(entries: impl IntoIterator<Item = JMdictEntry>) -> Self {
        let mut ordered: Vec<JMdictEntry> = Vec::new();
        let mut by_seq: HashMap<u64, usize> = HashMap::new();

        for entry in entries {
            match by_seq.get(&entry.seq) {
                Some(&idx) => {
                    tracing::debug!("Entry seq {} replaced by a later definition", entry.seq);
                    ordered[idx] = entry;
                }
                None => {
                    by_seq.insert(entry.seq, ordered.len());
                    ordered.push(entry);
                }
            }
        }

        let mut keys: HashMap<String, Vec<KeyRef>> = HashMap::new();
        let mut max_key_chars = 0;

        for (idx, entry) in ordered.iter().enumerate() {
            for (form, text) in entry.forms() {
                let key = normalize_key(text);
                if key.is_empty() {
                    continue;
                }
                max_key_chars = max_key_chars.max(key.chars().count());
                keys.entry(key)
                    .or_default()
                    .push(KeyRef { entry: idx, form });
            }
        }

        tracing::debug!(
            "Indexed {} entries under {} keys (longest key {} chars)",
            ordered.len(),
            keys.len(),
            max_key_chars
        );

        Self {
            entries: ordered.into_iter().map(Arc::new).collect(),
            by_seq,
            keys,
            max_key_chars,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Longest key in normalized characters
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    pub fn entries(&self) -> impl Iterator<Item = &Arc<JMdictEntry>> {
        self.entries.iter()
    }

    /// Exact lookup of a key that is already normalized
    pub(crate) fn lookup_normalized(&self, key: &str) -> Vec<IndexHit<JMdictEntry>> {
        let Some(refs) = self.keys.get(key) else {
            return Vec::new();
        };
        let key_chars = key.chars().count();

        refs.iter()
            .map(|r| IndexHit {
                entry: Arc::clone(&self.entries[r.entry]),
                form: r.form,
                key_chars,
            })
            .collect()
    }

    /// Prefix lookup over already normalized characters, longest first
    pub(crate) fn lookup_prefix_normalized(&self, chars: &[char]) -> Vec<IndexHit<JMdictEntry>> {
        let longest = chars.len().min(self.max_key_chars);
        let mut hits = Vec::new();
        let mut key = String::new();

        for len in (1..=longest).rev() {
            key.clear();
            key.extend(&chars[..len]);
            hits.extend(self.lookup_normalized(&key));
        }

        hits
    }
}

impl Dictionary for Lexicon {
    type Entry = JMdictEntry;

    fn lookup_exact(&self, query: &str) -> Vec<IndexHit<JMdictEntry>> {
        self.lookup_normalized(&normalize_key(query))
    }

    fn lookup_prefix(&self, query: &str) -> Vec<IndexHit<JMdictEntry>> {
        let chars: Vec<char> = normalize_key(query).chars().collect();
        self.lookup_prefix_normalized(&chars)
    }

    fn get_by_id(&self, id: u64) -> Option<Arc<JMdictEntry>> {
        self.by_seq
            .get(&id)
            .and_then(|&idx| self.entries.get(idx))
            .cloned()
    }
}
