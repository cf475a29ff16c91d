use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::compose;

/// Normalized text that remembers, for every output character, the index of
/// the source character it came from. Lookups run on the normalized form but
/// report spans in source characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedText {
    chars: Vec<char>,
    sources: Vec<usize>,
}

impl MappedText {
    /// NFKC one source character at a time. A combining voiced or
    /// semi-voiced mark (what half-width ﾞ/ﾟ become) is composed into the
    /// previous character when the pair has a precomposed form.
    pub fn nfkc(text: &str) -> Self {
        Self::nfkc_indexed(text.chars().enumerate())
    }

    /// Like [`MappedText::nfkc`], for characters that carry their own source
    /// index (a window into a longer text).
    pub fn nfkc_indexed(chars: impl IntoIterator<Item = (usize, char)>) -> Self {
        let mut out = Self::default();

        for (source, c) in chars {
            for n in std::iter::once(c).nfkc() {
                if is_combining_kana_mark(n) {
                    if let Some(last) = out.chars.last_mut() {
                        if let Some(composed) = compose(*last, n) {
                            *last = composed;
                            continue;
                        }
                    }
                }
                out.chars.push(n);
                out.sources.push(source);
            }
        }

        out
    }

    /// Rewrite every character in order. The closure sees the previous
    /// rewritten character, if any.
    pub fn map_chars(&mut self, mut f: impl FnMut(Option<char>, char) -> char) {
        let mut prev = None;
        for c in self.chars.iter_mut() {
            *c = f(prev, *c);
            prev = Some(*c);
        }
    }

    /// Drop leading characters that came from sources before `source`.
    pub fn drop_before(&mut self, source: usize) {
        let keep_from = self
            .sources
            .iter()
            .position(|&s| s >= source)
            .unwrap_or(self.sources.len());
        self.chars.drain(..keep_from);
        self.sources.drain(..keep_from);
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn source_of(&self, index: usize) -> Option<usize> {
        self.sources.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

fn is_combining_kana_mark(c: char) -> bool {
    matches!(c, '\u{3099}' | '\u{309A}')
}
