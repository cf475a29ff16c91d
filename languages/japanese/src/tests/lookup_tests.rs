use std::sync::Arc;

use yomu_core::dictionary::{Dictionary, DictionaryEntry};
use yomu_core::language::LanguageProcessor;
use yomu_core::LookupError;

use super::{entries_from, fixture_entries, fixture_processor};
use crate::deconjugator::JapaneseDeconjugator;
use crate::lexicon::Lexicon;
use crate::priority::PriorityList;
use crate::processor::{JapaneseProcessor, LookupOptions};

fn primary_seq(processor: &JapaneseProcessor, text: &str, offset: usize) -> Option<u64> {
    processor
        .lookup(text, offset)
        .expect("offset in bounds")
        .primary
        .map(|m| m.entry.seq)
}

#[test]
fn past_tense_followed_by_other_text() {
    let processor = fixture_processor();
    let result = processor.lookup("食べた昨日", 0).expect("lookup");

    let primary = result.primary.expect("match");
    assert_eq!(primary.entry.seq, 1);
    assert_eq!(primary.chain, vec!["past"]);
    assert_eq!(primary.span_len, 3);
    assert_eq!(primary.matched, "食べた");
    assert_eq!(primary.stem, "食べる");
    assert_eq!(result.span_len, 3);
}

#[test]
fn punctuation_under_cursor_is_a_miss() {
    let processor = fixture_processor();
    for (text, offset) in [("食べた。", 3), ("「橋」", 0), ("abc", 1), ("食べる 橋", 3)] {
        let result = processor.lookup(text, offset).expect("lookup");
        assert!(result.is_empty(), "{text:?} at {offset}");
        assert!(result.alternates.is_empty());
        assert_eq!(result.span_len, 0);
    }
}

#[test]
fn offset_past_the_end_is_rejected() {
    let processor = fixture_processor();
    assert_eq!(
        processor.lookup("橋", 1).unwrap_err(),
        LookupError::OffsetOutOfBounds { offset: 1, len: 1 }
    );
    assert!(processor.lookup("", 0).is_err());
}

#[test]
fn homographs_rank_by_priority() {
    let processor = fixture_processor();
    let result = processor.lookup("はし", 0).expect("lookup");

    assert_eq!(result.primary.as_ref().map(|m| m.entry.seq), Some(2));
    let alternates: Vec<u64> = result.alternates.iter().map(|m| m.entry.seq).collect();
    assert_eq!(alternates, vec![3]);
}

#[test]
fn priority_list_can_reorder_homographs() {
    let mut priorities = PriorityList::new();
    priorities.insert("箸", "はし", 100);

    let processor = JapaneseProcessor::with_parts(
        Arc::new(Lexicon::build(entries_from(fixture_entries()))),
        Arc::new(JapaneseDeconjugator::new()),
        Arc::new(priorities),
        LookupOptions::default(),
    );
    assert_eq!(primary_seq(&processor, "はし", 0), Some(3));
}

#[test]
fn longest_match_wins() {
    let processor = fixture_processor();
    let result = processor.lookup("東京都", 0).expect("lookup");

    let primary = result.primary.as_ref().expect("match");
    assert_eq!(primary.entry.seq, 10);
    assert_eq!(primary.span_len, 2);
    assert!(result.alternates.iter().any(|m| m.entry.seq == 11 && m.span_len == 1));
}

#[test]
fn lookup_starts_at_offset() {
    let processor = fixture_processor();
    assert_eq!(primary_seq(&processor, "昨日は東京", 3), Some(10));
    assert_eq!(primary_seq(&processor, "昨日は東京", 4), None);
}

#[test]
fn stacked_inflections() {
    let processor = fixture_processor();
    let result = processor.lookup("食べさせられなかった", 0).expect("lookup");

    let primary = result.primary.expect("match");
    assert_eq!(primary.entry.seq, 1);
    assert_eq!(primary.span_len, 10);
    assert_eq!(primary.chain, vec!["causative", "passive", "negative", "past"]);
}

#[test]
fn auxiliaries_suru_nouns_and_adjectives() {
    let processor = fixture_processor();

    let result = processor.lookup("読んでいた", 0).expect("lookup");
    let primary = result.primary.expect("match");
    assert_eq!(primary.entry.seq, 40);
    assert_eq!(primary.chain, vec!["te-form", "progressive", "past"]);

    let result = processor.lookup("勉強しました", 0).expect("lookup");
    let primary = result.primary.expect("match");
    assert_eq!(primary.entry.seq, 41);
    assert_eq!(primary.span_len, 6);

    let result = processor.lookup("高くなかった", 0).expect("lookup");
    let primary = result.primary.expect("match");
    assert_eq!(primary.entry.seq, 42);
    assert_eq!(primary.chain, vec!["negative", "past"]);
}

#[test]
fn deinflected_stem_must_have_matching_class() {
    let processor = fixture_processor();
    // 書く is tagged as a noun in the fixture, so 書いた cannot be its past
    let result = processor.lookup("書いた", 0).expect("lookup");
    assert!(result.is_empty());
}

#[test]
fn katakana_and_half_width_queries() {
    let processor = fixture_processor();

    let result = processor.lookup("こーひーを", 0).expect("lookup");
    assert_eq!(result.primary.map(|m| m.entry.seq), Some(20));

    let result = processor.lookup("ｺｰﾋｰ", 0).expect("lookup");
    assert_eq!(result.span_len, 4);

    let result = processor.lookup("ｶﾞﾑ", 0).expect("lookup");
    let primary = result.primary.expect("match");
    assert_eq!(primary.entry.seq, 21);
    assert_eq!(primary.span_len, 3);
    assert_eq!(primary.matched, "ｶﾞﾑ");
}

#[test]
fn iteration_marks_match_expanded_keys() {
    let processor = fixture_processor();
    assert_eq!(primary_seq(&processor, "人々が", 0), Some(30));
    assert_eq!(primary_seq(&processor, "人人", 0), Some(30));
}

#[test]
fn repeated_lookups_are_identical() {
    let processor = fixture_processor();
    for (text, offset) in [("食べさせられなかった", 0), ("はし", 0), ("昨日は東京", 3)] {
        let first = processor.lookup(text, offset).expect("lookup");
        let second = processor.lookup(text, offset).expect("lookup");
        assert_eq!(first, second);
    }
}

#[test]
fn every_form_finds_its_own_entry() {
    let processor = fixture_processor();
    let lexicon = processor.lexicon();

    for entry in lexicon.entries() {
        for (_, form) in entry.forms() {
            let hits = lexicon.lookup_exact(form);
            assert!(hits.iter().any(|h| h.entry.seq == entry.seq), "lookup_exact({form})");

            let result = processor.lookup(form, 0).expect("lookup");
            assert!(result.iter().any(|m| m.entry.seq == entry.seq), "lookup({form})");
        }
    }
}

#[test]
fn alternates_are_capped() {
    let values = (0..15u64)
        .map(|i| {
            serde_json::json!({
                "seq": 100 + i,
                "r_ele": [{"reb": "かみ"}],
                "sense": [{"pos": ["&n;"], "gloss": [format!("sense {i}")]}]
            })
        })
        .collect();
    let processor = JapaneseProcessor::with_parts(
        Arc::new(Lexicon::build(entries_from(values))),
        Arc::new(JapaneseDeconjugator::new()),
        Arc::new(PriorityList::new()),
        LookupOptions {
            max_span_chars: 25,
            max_alternates: 4,
        },
    );

    let result = processor.lookup("かみ", 0).expect("lookup");
    assert_eq!(result.len(), 5);
    // equal scores fall back to sequence order
    assert_eq!(result.primary.map(|m| m.entry.seq), Some(100));
    let alternates: Vec<u64> = result.alternates.iter().map(|m| m.entry.id()).collect();
    assert_eq!(alternates, vec![101, 102, 103, 104]);
}

#[test]
fn empty_dictionary_never_matches() {
    let processor = JapaneseProcessor::new(Lexicon::empty());
    let result = processor.lookup("食べた", 0).expect("lookup");
    assert!(result.is_empty());
}

#[test]
fn ichidan_s_verbs_conjugate() {
    let processor = JapaneseProcessor::new(Lexicon::build(entries_from(vec![serde_json::json!({
        "seq": 1269130,
        "k_ele": [{"keb": "呉れる"}],
        "r_ele": [{"reb": "くれる", "pri": ["ichi1"]}],
        "sense": [{"pos": ["&v1-s;", "&vt;"], "gloss": ["to give"]}]
    })])));

    for (text, chain) in [
        ("くれた", "past"),
        ("くれない", "negative"),
        ("くれて", "te-form"),
        ("くれます", "polite"),
        ("呉れた", "past"),
    ] {
        let primary = processor
            .lookup(text, 0)
            .expect("lookup")
            .primary
            .unwrap_or_else(|| panic!("{text} should match"));
        assert_eq!(primary.entry.seq, 1269130);
        assert_eq!(primary.chain, vec![chain], "{text}");
        assert_eq!(primary.span_len, text.chars().count());
    }

    let imperative = processor.lookup("くれ", 0).expect("lookup").primary.expect("match");
    assert_eq!(imperative.stem, "くれる");
}

