use std::path::PathBuf;

use serde_json::json;
use yomu_core::BuildError;
use yomu_core::dictionary::Dictionary;
use yomu_core::language::LanguageProcessor;

use crate::loader::{JMdictLoader, LoadPolicy};
use crate::processor::{JapaneseProcessor, ProcessorSources};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("yomu-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write temp file");
    path
}

const WITH_BROKEN_ENTRY: &str = r#"[
    {"seq": 1, "r_ele": [{"reb": "あめ"}], "sense": [{"pos": ["&n;"], "gloss": ["rain"]}]},
    {"r_ele": [{"reb": "くも"}], "sense": [{"gloss": ["cloud"]}]},
    {"seq": 3, "r_ele": [{"reb": "ゆき"}], "sense": [{"pos": ["&n;"], "gloss": ["snow"]}]}
]"#;

#[test]
fn strict_load_stops_at_first_bad_entry() {
    let err = JMdictLoader::default()
        .from_json_str(WITH_BROKEN_ENTRY)
        .expect_err("seq is missing");
    assert!(matches!(
        err,
        BuildError::MissingField {
            position: 1,
            field: "seq",
            ..
        }
    ));
}

#[test]
fn skipping_loader_reports_what_it_dropped() {
    let (lexicon, report) = JMdictLoader::new(LoadPolicy::SkipInvalid)
        .from_json_str(WITH_BROKEN_ENTRY)
        .expect("bad entries are skipped");

    assert_eq!(lexicon.entry_count(), 2);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.skipped[0].source, "<memory>");
    assert!(lexicon.get_by_id(3).is_some());
}

#[test]
fn not_an_array_is_a_build_error() {
    let err = JMdictLoader::default()
        .from_json_str(r#"{"seq": 1}"#)
        .expect_err("top level must be an array");
    assert!(matches!(err, BuildError::Json(_)));
}

#[test]
fn later_files_override_earlier_entries() {
    let base = temp_file(
        "base.json",
        &json!([
            {"seq": 1, "r_ele": [{"reb": "あめ"}], "sense": [{"gloss": ["rain"]}]},
            {"seq": 2, "r_ele": [{"reb": "かぜ"}], "sense": [{"gloss": ["wind"]}]}
        ])
        .to_string(),
    );
    let patch = temp_file(
        "patch.json",
        &json!([
            {"seq": 1, "k_ele": [{"keb": "雨"}], "r_ele": [{"reb": "あめ"}], "sense": [{"gloss": ["rain (patched)"]}]}
        ])
        .to_string(),
    );

    let (lexicon, report) = JMdictLoader::default()
        .load_from_files(&[&base, &patch])
        .expect("both files load");
    let _ = std::fs::remove_file(&base);
    let _ = std::fs::remove_file(&patch);

    assert_eq!(report.loaded, 2);
    let merged = lexicon.get_by_id(1).expect("seq 1");
    assert_eq!(merged.senses[0].glosses, vec!["rain (patched)"]);
    assert_eq!(lexicon.lookup_exact("雨").len(), 1);
    assert_eq!(lexicon.lookup_exact("あめ").len(), 1);
}

#[test]
fn processor_loads_rules_and_priorities_from_disk() {
    let dictionary = temp_file(
        "dict.json",
        &json!([
            {"seq": 7, "k_ele": [{"keb": "見る"}], "r_ele": [{"reb": "みる"}], "sense": [{"pos": ["&v1;"], "gloss": ["to see"]}]}
        ])
        .to_string(),
    );
    let rules = temp_file(
        "rules.json",
        r#"[{"surface": "た", "stem": "る", "stem_pos": ["v1"], "label": "past"}]"#,
    );
    let priorities = temp_file("priority.json", r#"[["見る", "みる", 5]]"#);

    let sources = ProcessorSources {
        dictionary_paths: vec![dictionary.clone()],
        rules_path: Some(rules.clone()),
        priority_path: Some(priorities.clone()),
        ..ProcessorSources::default()
    };
    let loaded = JapaneseProcessor::load(&sources);
    for path in [&dictionary, &rules, &priorities] {
        let _ = std::fs::remove_file(path);
    }

    let (processor, report) = loaded.expect("all sources load");
    assert_eq!(report.loaded, 1);
    assert_eq!(processor.deconjugator().rules().len(), 1);

    let primary = processor
        .lookup("見た", 0)
        .expect("lookup")
        .primary
        .expect("match");
    assert_eq!(primary.chain, vec!["past"]);
    assert_eq!(primary.score.entry_priority, 5);
}

#[test]
fn missing_rule_file_fails_the_whole_load() {
    let sources = ProcessorSources {
        rules_path: Some(std::env::temp_dir().join("yomu-no-such-rules.json")),
        ..ProcessorSources::default()
    };
    let err = JapaneseProcessor::load(&sources)
        .err()
        .expect("rules file is missing");
    assert!(matches!(err, BuildError::Rules(_)));
}
