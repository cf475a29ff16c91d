mod loader_tests;
mod lookup_tests;

use serde_json::{Value, json};

use crate::dictionary::JMdictEntry;
use crate::lexicon::Lexicon;
use crate::processor::JapaneseProcessor;

/// Small dictionary covering the lookup scenarios
pub(crate) fn fixture_entries() -> Vec<Value> {
    vec![
        json!({
            "seq": 1,
            "k_ele": [{"keb": "食べる", "pri": ["ichi1"]}],
            "r_ele": [{"reb": "たべる", "pri": ["ichi1"]}],
            "sense": [{"pos": ["&v1;", "&vt;"], "gloss": ["to eat"]}]
        }),
        json!({
            "seq": 2,
            "k_ele": [{"keb": "橋", "pri": ["ichi1", "news1"]}],
            "r_ele": [{"reb": "はし"}],
            "sense": [{"pos": ["&n;"], "gloss": ["bridge"]}]
        }),
        json!({
            "seq": 3,
            "k_ele": [{"keb": "箸"}],
            "r_ele": [{"reb": "はし"}],
            "sense": [{"pos": ["&n;"], "gloss": ["chopsticks"]}]
        }),
        json!({
            "seq": 10,
            "k_ele": [{"keb": "東京", "pri": ["news1"]}],
            "r_ele": [{"reb": "とうきょう"}],
            "sense": [{"pos": ["&n;"], "gloss": ["Tokyo"]}]
        }),
        json!({
            "seq": 11,
            "k_ele": [{"keb": "東"}],
            "r_ele": [{"reb": "ひがし"}],
            "sense": [{"pos": ["&n;"], "gloss": ["east"]}]
        }),
        json!({
            "seq": 20,
            "r_ele": [{"reb": "コーヒー", "pri": ["gai1"]}],
            "sense": [{"pos": ["&n;"], "gloss": ["coffee"]}]
        }),
        json!({
            "seq": 21,
            "r_ele": [{"reb": "ガム"}],
            "sense": [{"pos": ["&n;"], "gloss": ["chewing gum"]}]
        }),
        json!({
            "seq": 30,
            "k_ele": [{"keb": "人々"}],
            "r_ele": [{"reb": "ひとびと"}],
            "sense": [{"pos": ["&n;"], "gloss": ["people"]}]
        }),
        json!({
            "seq": 40,
            "k_ele": [{"keb": "読む"}],
            "r_ele": [{"reb": "よむ"}],
            "sense": [{"pos": ["&v5m;", "&vt;"], "gloss": ["to read"]}]
        }),
        json!({
            "seq": 41,
            "k_ele": [{"keb": "勉強"}],
            "r_ele": [{"reb": "べんきょう"}],
            "sense": [{"pos": ["&n;", "&vs;"], "gloss": ["study"]}]
        }),
        json!({
            "seq": 42,
            "k_ele": [{"keb": "高い"}],
            "r_ele": [{"reb": "たかい"}],
            "sense": [{"pos": ["&adj-i;"], "gloss": ["high", "expensive"]}]
        }),
        json!({
            "seq": 43,
            "k_ele": [{"keb": "書く"}],
            "r_ele": [{"reb": "かく"}],
            "sense": [{"pos": ["&n;"], "gloss": ["mislabelled on purpose"]}]
        }),
    ]
}

pub(crate) fn entries_from(values: Vec<Value>) -> Vec<JMdictEntry> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| JMdictEntry::from_value(i, v).expect("fixture entry"))
        .collect()
}

pub(crate) fn fixture_processor() -> JapaneseProcessor {
    JapaneseProcessor::new(Lexicon::build(entries_from(fixture_entries())))
}
