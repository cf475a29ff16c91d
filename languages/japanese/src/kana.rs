//! Script classification and the key normalization policy shared by the
//! index and the lookup path.
//!
//! Per character, in order:
//! 1. NFKC (half-width katakana, full-width ASCII, compatibility ideographs),
//!    composing a trailing voiced/semi-voiced mark into the previous char;
//! 2. katakana folded to hiragana (`ー` is kept);
//! 3. iteration marks expanded: `々` repeats a preceding kanji, `ゝ` repeats
//!    a preceding hiragana, `ゞ` repeats it voiced. A mark with nothing valid
//!    before it is kept as is.
//!
//! The policy is idempotent: nothing it emits triggers a step on a second pass.

use unicode_normalization::char::compose;
use yomu_core::preprocess::MappedText;

const KANJI_ITERATION_MARK: char = '々';
const HIRAGANA_ITERATION_MARK: char = 'ゝ';
const HIRAGANA_VOICED_ITERATION_MARK: char = 'ゞ';
const VOICED_MARK: char = '\u{3099}';

pub fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309F}')
}

pub fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30FA}' | '\u{30FC}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}')
}

pub fn is_kanji(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FFFF}'
        | '々' | '〆' | '〇')
}

/// Characters a dictionary span may contain. Punctuation, the katakana
/// middle dot, Latin and digits end a span.
pub fn is_lookup_char(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_kanji(c)
}

pub fn katakana_to_hiragana(c: char) -> char {
    match c {
        '\u{30A1}'..='\u{30F6}' | '\u{30FD}'..='\u{30FE}' => {
            char::from_u32(c as u32 - 0x60).unwrap_or(c)
        }
        _ => c,
    }
}

pub fn to_hiragana(text: &str) -> String {
    text.chars().map(katakana_to_hiragana).collect()
}

/// Normalize `text` into index-key form.
pub fn normalize_key(text: &str) -> String {
    normalize_mapped(text).as_string()
}

/// Normalize and keep the source index of every output character.
pub fn normalize_mapped(text: &str) -> MappedText {
    let mut mapped = MappedText::nfkc(text);
    fold(&mut mapped);
    mapped
}

/// Normalize the characters of `chars` starting at `start`, using the
/// character before `start` as context for iteration marks.
pub fn normalize_window(chars: &[char], start: usize, len: usize) -> MappedText {
    let from = start.saturating_sub(1);
    let to = (start + len).min(chars.len());
    let window = chars[from..to].iter().enumerate().map(|(i, &c)| (from + i, c));

    let mut mapped = MappedText::nfkc_indexed(window);
    fold(&mut mapped);
    mapped.drop_before(start);
    mapped
}

fn fold(mapped: &mut MappedText) {
    mapped.map_chars(|prev, c| {
        let c = katakana_to_hiragana(c);
        match (c, prev) {
            (KANJI_ITERATION_MARK, Some(p)) if is_kanji(p) && p != KANJI_ITERATION_MARK => p,
            (HIRAGANA_ITERATION_MARK, Some(p)) if is_base_hiragana(p) => p,
            (HIRAGANA_VOICED_ITERATION_MARK, Some(p)) if is_base_hiragana(p) => {
                compose(p, VOICED_MARK).unwrap_or(p)
            }
            _ => c,
        }
    });
}

fn is_base_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn katakana_folds_to_hiragana() {
        assert_eq!(normalize_key("コーヒー"), "こーひー");
        assert_eq!(normalize_key("ｺｰﾋｰ"), "こーひー");
        assert_eq!(normalize_key("ガッコウ"), "がっこう");
    }

    #[test]
    fn iteration_marks_expand() {
        assert_eq!(normalize_key("時々"), "時時");
        assert_eq!(normalize_key("人々"), "人人");
        assert_eq!(normalize_key("いすゞ"), "いすず");
        assert_eq!(normalize_key("こゝろ"), "こころ");
    }

    #[test]
    fn orphan_marks_are_kept() {
        assert_eq!(normalize_key("々"), "々");
        assert_eq!(normalize_key("aゝ"), "aゝ");
    }

    #[test]
    fn normalization_is_idempotent() {
        for text in [
            "食べさせられなかった",
            "ｶﾞｯｺｳ",
            "時々々",
            "々時",
            "ＡＢＣ１２３",
            "ヴァイオリン",
            "いすゞ自動車",
            "「はし」。",
            "㍿",
        ] {
            let once = normalize_key(text);
            assert_eq!(normalize_key(&once), once, "not idempotent for {text}");
        }
    }

    #[test]
    fn window_uses_left_context_for_marks() {
        let chars: Vec<char> = "今日は時々雨".chars().collect();
        let mapped = normalize_window(&chars, 4, 2);
        assert_eq!(mapped.as_string(), "時雨");
        assert_eq!(mapped.source_of(0), Some(4));
        assert_eq!(mapped.source_of(1), Some(5));
    }

    #[test]
    fn punctuation_is_not_lookup_script() {
        for c in ['。', '、', '「', '・', 'A', '1', ' '] {
            assert!(!is_lookup_char(c), "{c} should not be matchable");
        }
        for c in ['あ', 'ア', 'ー', '食', '々', 'ヶ'] {
            assert!(is_lookup_char(c), "{c} should be matchable");
        }
    }
}
