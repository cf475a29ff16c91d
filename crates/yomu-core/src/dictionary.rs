use std::sync::Arc;

/// Dictionary lookup operations
///
/// Implementations are immutable once built. Both lookups normalize the
/// query the same way the index keys were normalized, and report absence as
/// an empty vector.
pub trait Dictionary: Send + Sync {
    type Entry: DictionaryEntry;

    /// Every (entry, form) whose normalized surface equals `query`
    fn lookup_exact(&self, query: &str) -> Vec<IndexHit<Self::Entry>>;

    /// Every (entry, form) whose normalized surface is a prefix of `query`,
    /// longest surface first
    fn lookup_prefix(&self, query: &str) -> Vec<IndexHit<Self::Entry>>;

    /// Get entry by sequence id
    fn get_by_id(&self, id: u64) -> Option<Arc<Self::Entry>>;
}

/// Individual dictionary entry
pub trait DictionaryEntry: Send + Sync {
    /// Stable sequence id from the source dataset
    fn id(&self) -> u64;

    /// Main headword/term
    fn headword(&self) -> String;

    /// Surface text of one of the entry's forms
    fn form_text(&self, form: FormRef) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormKind {
    Kanji,
    Reading,
}

/// Which written or spoken form of an entry a key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormRef {
    pub kind: FormKind,
    pub index: usize,
}

impl FormRef {
    pub fn kanji(index: usize) -> Self {
        Self {
            kind: FormKind::Kanji,
            index,
        }
    }

    pub fn reading(index: usize) -> Self {
        Self {
            kind: FormKind::Reading,
            index,
        }
    }
}

#[derive(Debug)]
pub struct IndexHit<E> {
    pub entry: Arc<E>,
    pub form: FormRef,
    /// Length of the matched key in normalized characters
    pub key_chars: usize,
}

impl<E> Clone for IndexHit<E> {
    fn clone(&self) -> Self {
        Self {
            entry: Arc::clone(&self.entry),
            form: self.form,
            key_chars: self.key_chars,
        }
    }
}
