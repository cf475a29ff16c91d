//! Deinflection rule table.
//!
//! A rule rewrites a trailing `surface` into `stem`. `stem_pos` is the class
//! the rewritten text must have; `surface_pos` is the class of the inflected
//! form itself, which is what lets an outer rule hand over to an inner one
//! (`なかった` is the past of an adj-i, `ない` is the negative of a verb).
//! A rule with an empty `surface_pos` only applies to the raw span.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use yomu_core::RuleError;

use crate::kana::normalize_key;

const V1: &str = "v1";
const V1_S: &str = "v1-s";
const V5U: &str = "v5u";
const V5K: &str = "v5k";
const V5S: &str = "v5s";
const VK: &str = "vk";
const VS: &str = "vs";
const VS_I: &str = "vs-i";
const VS_S: &str = "vs-s";
const ADJ_I: &str = "adj-i";
const ADJ_IX: &str = "adj-ix";
/// Pseudo-class of a te-form waiting for its verb
pub const TE: &str = "te";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionRule {
    pub surface: String,
    pub stem: String,
    pub stem_pos: Vec<String>,
    #[serde(default)]
    pub surface_pos: Vec<String>,
    pub label: String,
    /// Only applicable while the chain is shorter than this
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl InflectionRule {
    fn new(surface: String, stem: &str, stem_pos: &[&str], surface_pos: &[&str], label: &str) -> Self {
        Self {
            surface,
            stem: stem.to_string(),
            stem_pos: stem_pos.iter().map(|p| p.to_string()).collect(),
            surface_pos: surface_pos.iter().map(|p| p.to_string()).collect(),
            label: label.to_string(),
            max_depth: None,
        }
    }

    fn at_most(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Whether this rule may follow a rule that produced `class`
    pub fn chains_from(&self, class: &[String]) -> bool {
        self.surface_pos.iter().any(|p| class.contains(p))
    }
}

/// Rules indexed by the last character of their surface suffix
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<InflectionRule>,
    by_last_char: HashMap<char, Vec<usize>>,
    suffixless: Vec<usize>,
    max_growth: usize,
}

impl RuleTable {
    /// Validate and index an external rule set
    pub fn new(rules: Vec<InflectionRule>) -> Result<Self, RuleError> {
        let invalid = |position: usize, rule: &InflectionRule, reason| RuleError::InvalidRule {
            position,
            label: rule.label.clone(),
            reason,
        };

        let mut normalized = Vec::with_capacity(rules.len());
        for (position, mut rule) in rules.into_iter().enumerate() {
            if rule.label.trim().is_empty() {
                return Err(invalid(position, &rule, "empty label"));
            }
            if rule.stem_pos.is_empty() {
                return Err(invalid(position, &rule, "no stem class"));
            }
            rule.surface = normalize_key(&rule.surface);
            rule.stem = normalize_key(&rule.stem);
            if rule.surface == rule.stem {
                return Err(invalid(position, &rule, "surface and stem are identical"));
            }
            normalized.push(rule);
        }

        Ok(Self::index(normalized))
    }

    /// Parse a JSON array of rules
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let rules: Vec<InflectionRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, RuleError> {
        tracing::info!("Loading deinflection rules from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        tracing::info!("Loaded {} deinflection rules", table.len());
        Ok(table)
    }

    /// Built-in table for standard Japanese verbs and adjectives
    pub fn japanese() -> Self {
        Self::index(default_rules())
    }

    fn index(rules: Vec<InflectionRule>) -> Self {
        let mut by_last_char: HashMap<char, Vec<usize>> = HashMap::new();
        let mut suffixless = Vec::new();
        let mut max_growth = 0;

        for (idx, rule) in rules.iter().enumerate() {
            match rule.surface.chars().last() {
                Some(last) => by_last_char.entry(last).or_default().push(idx),
                None => suffixless.push(idx),
            }
            let growth = rule
                .surface
                .chars()
                .count()
                .saturating_sub(rule.stem.chars().count());
            max_growth = max_growth.max(growth);
        }

        Self {
            rules,
            by_last_char,
            suffixless,
            max_growth,
        }
    }

    /// Rules whose surface suffix ends `text`, in table order, with their
    /// position in the table
    pub fn matching<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (usize, &'a InflectionRule)> {
        let indexed = text
            .chars()
            .last()
            .and_then(|last| self.by_last_char.get(&last))
            .map(Vec::as_slice)
            .unwrap_or_default();

        indexed
            .iter()
            .chain(self.suffixless.iter())
            .map(|&idx| (idx, &self.rules[idx]))
            .filter(move |(_, rule)| text.ends_with(rule.surface.as_str()))
    }

    pub fn get(&self, idx: usize) -> Option<&InflectionRule> {
        self.rules.get(idx)
    }

    pub fn rules(&self) -> &[InflectionRule] {
        &self.rules
    }

    /// Most characters a single rule adds on top of its stem
    pub fn max_growth(&self) -> usize {
        self.max_growth
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::japanese()
    }
}

/// Kana of one godan row
struct GodanRow {
    classes: &'static [&'static str],
    u: &'static str,
    a: &'static str,
    i: &'static str,
    e: &'static str,
    o: &'static str,
    te: &'static str,
    ta: &'static str,
}

#[rustfmt::skip]
const GODAN_ROWS: &[GodanRow] = &[
    GodanRow { classes: &["v5u"], u: "う", a: "わ", i: "い", e: "え", o: "お", te: "って", ta: "った" },
    GodanRow { classes: &["v5u-s"], u: "う", a: "わ", i: "い", e: "え", o: "お", te: "うて", ta: "うた" },
    GodanRow { classes: &["v5k"], u: "く", a: "か", i: "き", e: "け", o: "こ", te: "いて", ta: "いた" },
    GodanRow { classes: &["v5k-s"], u: "く", a: "か", i: "き", e: "け", o: "こ", te: "って", ta: "った" },
    GodanRow { classes: &["v5g"], u: "ぐ", a: "が", i: "ぎ", e: "げ", o: "ご", te: "いで", ta: "いだ" },
    GodanRow { classes: &["v5s"], u: "す", a: "さ", i: "し", e: "せ", o: "そ", te: "して", ta: "した" },
    GodanRow { classes: &["v5t"], u: "つ", a: "た", i: "ち", e: "て", o: "と", te: "って", ta: "った" },
    GodanRow { classes: &["v5n"], u: "ぬ", a: "な", i: "に", e: "ね", o: "の", te: "んで", ta: "んだ" },
    GodanRow { classes: &["v5b"], u: "ぶ", a: "ば", i: "び", e: "べ", o: "ぼ", te: "んで", ta: "んだ" },
    GodanRow { classes: &["v5m"], u: "む", a: "ま", i: "み", e: "め", o: "も", te: "んで", ta: "んだ" },
    GodanRow { classes: &["v5r", "v5r-i", "v5aru"], u: "る", a: "ら", i: "り", e: "れ", o: "ろ", te: "って", ta: "った" },
];

#[derive(Clone, Copy)]
enum Slot {
    A,
    I,
    E,
    O,
    Te,
    Ta,
}

/// (label, base slot, tail, surface class)
#[rustfmt::skip]
const GODAN_FORMS: &[(&str, Slot, &str, &[&str])] = &[
    ("negative", Slot::A, "ない", &[ADJ_I]),
    ("classical negative", Slot::A, "ず", &[]),
    ("passive", Slot::A, "れる", &[V1]),
    ("causative", Slot::A, "せる", &[V1]),
    ("short causative", Slot::A, "す", &[V5S]),
    ("polite", Slot::I, "ます", &[]),
    ("polite past", Slot::I, "ました", &[]),
    ("polite negative", Slot::I, "ません", &[]),
    ("polite past negative", Slot::I, "ませんでした", &[]),
    ("polite volitional", Slot::I, "ましょう", &[]),
    ("desiderative", Slot::I, "たい", &[ADJ_I]),
    ("excess", Slot::I, "すぎる", &[V1]),
    ("masu stem", Slot::I, "", &[]),
    ("potential", Slot::E, "る", &[V1]),
    ("imperative", Slot::E, "", &[]),
    ("provisional", Slot::E, "ば", &[]),
    ("volitional", Slot::O, "う", &[]),
    ("te-form", Slot::Te, "", &[TE]),
    ("past", Slot::Ta, "", &[]),
    ("conditional", Slot::Ta, "ら", &[]),
    ("tari", Slot::Ta, "り", &[]),
];

/// Forms shared by ichidan verbs, する and 来る once their stem is removed:
/// (label, tail, surface class). Ichidan uses them as is; する and 来る go
/// through their own tables because their stems change.
#[rustfmt::skip]
const ICHIDAN_FORMS: &[(&str, &str, &[&str])] = &[
    ("negative", "ない", &[ADJ_I]),
    ("classical negative", "ず", &[]),
    ("passive", "られる", &[V1]),
    ("potential", "られる", &[V1]),
    ("potential", "れる", &[V1]),
    ("causative", "させる", &[V1]),
    ("short causative", "さす", &[V5S]),
    ("polite", "ます", &[]),
    ("polite past", "ました", &[]),
    ("polite negative", "ません", &[]),
    ("polite past negative", "ませんでした", &[]),
    ("polite volitional", "ましょう", &[]),
    ("desiderative", "たい", &[ADJ_I]),
    ("excess", "すぎる", &[V1]),
    ("masu stem", "", &[]),
    ("imperative", "ろ", &[]),
    ("imperative", "よ", &[]),
    ("provisional", "れば", &[]),
    ("volitional", "よう", &[]),
    ("te-form", "て", &[TE]),
    ("past", "た", &[]),
    ("conditional", "たら", &[]),
    ("tari", "たり", &[]),
];

/// (label, kana surface, kanji surface, surface class)
#[rustfmt::skip]
const KURU_FORMS: &[(&str, &str, &str, &[&str])] = &[
    ("negative", "こない", "来ない", &[ADJ_I]),
    ("classical negative", "こず", "来ず", &[]),
    ("passive", "こられる", "来られる", &[V1]),
    ("potential", "こられる", "来られる", &[V1]),
    ("potential", "これる", "来れる", &[V1]),
    ("causative", "こさせる", "来させる", &[V1]),
    ("polite", "きます", "来ます", &[]),
    ("polite past", "きました", "来ました", &[]),
    ("polite negative", "きません", "来ません", &[]),
    ("polite past negative", "きませんでした", "来ませんでした", &[]),
    ("polite volitional", "きましょう", "来ましょう", &[]),
    ("desiderative", "きたい", "来たい", &[ADJ_I]),
    ("excess", "きすぎる", "来すぎる", &[V1]),
    ("masu stem", "き", "来", &[]),
    ("imperative", "こい", "来い", &[]),
    ("provisional", "くれば", "来れば", &[]),
    ("volitional", "こよう", "来よう", &[]),
    ("te-form", "きて", "来て", &[TE]),
    ("past", "きた", "来た", &[]),
    ("conditional", "きたら", "来たら", &[]),
    ("tari", "きたり", "来たり", &[]),
];

/// (label, surface, surface class) for する
#[rustfmt::skip]
const SURU_FORMS: &[(&str, &str, &[&str])] = &[
    ("negative", "しない", &[ADJ_I]),
    ("classical negative", "せず", &[]),
    ("passive", "される", &[V1]),
    ("causative", "させる", &[V1]),
    ("polite", "します", &[]),
    ("polite past", "しました", &[]),
    ("polite negative", "しません", &[]),
    ("polite past negative", "しませんでした", &[]),
    ("polite volitional", "しましょう", &[]),
    ("desiderative", "したい", &[ADJ_I]),
    ("excess", "しすぎる", &[V1]),
    ("masu stem", "し", &[]),
    ("imperative", "しろ", &[]),
    ("imperative", "せよ", &[]),
    ("provisional", "すれば", &[]),
    ("volitional", "しよう", &[]),
    ("te-form", "して", &[TE]),
    ("past", "した", &[]),
    ("conditional", "したら", &[]),
    ("tari", "したり", &[]),
];

/// i-adjective endings replacing the final い: (label, tail, surface class)
#[rustfmt::skip]
const ADJECTIVE_FORMS: &[(&str, &str, &[&str])] = &[
    ("past", "かった", &[]),
    ("negative", "くない", &[ADJ_I]),
    ("te-form", "くて", &[]),
    ("adverbial", "く", &[]),
    ("provisional", "ければ", &[]),
    ("conditional", "かったら", &[]),
    ("tari", "かったり", &[]),
    ("noun", "さ", &[]),
    ("appearance", "そう", &[]),
    ("excess", "すぎる", &[V1]),
];

/// Auxiliaries attached to a te-form: (label, surface, te ending, surface class)
#[rustfmt::skip]
const TE_AUXILIARIES: &[(&str, &str, &str, &[&str])] = &[
    ("progressive", "ている", "て", &[V1]),
    ("progressive", "でいる", "で", &[V1]),
    ("progressive", "てる", "て", &[V1]),
    ("progressive", "でる", "で", &[V1]),
    ("completion", "てしまう", "て", &[V5U]),
    ("completion", "でしまう", "で", &[V5U]),
    ("completion", "ちゃう", "て", &[V5U]),
    ("completion", "じゃう", "で", &[V5U]),
    ("preparation", "ておく", "て", &[V5K]),
    ("preparation", "でおく", "で", &[V5K]),
    ("preparation", "とく", "て", &[V5K]),
    ("preparation", "どく", "で", &[V5K]),
    ("request", "てください", "て", &[]),
    ("request", "でください", "で", &[]),
];

fn default_rules() -> Vec<InflectionRule> {
    let mut rules = Vec::new();

    for row in GODAN_ROWS {
        for &(label, slot, tail, surface_pos) in GODAN_FORMS {
            let base = match slot {
                Slot::A => row.a,
                Slot::I => row.i,
                Slot::E => row.e,
                Slot::O => row.o,
                Slot::Te => row.te,
                Slot::Ta => row.ta,
            };
            let rule = InflectionRule::new(format!("{base}{tail}"), row.u, row.classes, surface_pos, label);
            rules.push(restrict_noisy(rule));
        }
    }

    // くださる and friends use い instead of り before ます and as imperative
    for &(label, slot, tail, surface_pos) in GODAN_FORMS {
        if matches!(slot, Slot::I) && !tail.is_empty() {
            rules.push(InflectionRule::new(format!("い{tail}"), "る", &["v5aru"], surface_pos, label));
        }
    }
    rules.push(InflectionRule::new("い".to_string(), "る", &["v5aru"], &[], "imperative"));

    for &(label, tail, surface_pos) in ICHIDAN_FORMS {
        let rule = InflectionRule::new(tail.to_string(), "る", &[V1, V1_S], surface_pos, label);
        rules.push(restrict_noisy(rule));
    }
    // くれる: imperative くれ rather than くれろ
    rules.push(InflectionRule::new("れ".to_string(), "れる", &[V1_S], &[], "imperative"));

    for &(label, kana, kanji, surface_pos) in KURU_FORMS {
        rules.push(InflectionRule::new(kana.to_string(), "くる", &[VK], surface_pos, label));
        rules.push(InflectionRule::new(kanji.to_string(), "来る", &[VK], surface_pos, label));
    }

    for &(label, surface, surface_pos) in SURU_FORMS {
        let rule = InflectionRule::new(surface.to_string(), "する", &[VS_I, VS_S], surface_pos, label);
        rules.push(restrict_noisy(rule));
    }
    rules.push(InflectionRule::new("する".to_string(), "", &[VS], &[VS_I], "suru verb"));

    for &(label, tail, surface_pos) in ADJECTIVE_FORMS {
        rules.push(InflectionRule::new(tail.to_string(), "い", &[ADJ_I], surface_pos, label));
        rules.push(InflectionRule::new(format!("よ{tail}"), "いい", &[ADJ_IX], surface_pos, label));
    }

    for &(label, surface, te, surface_pos) in TE_AUXILIARIES {
        rules.push(InflectionRule::new(surface.to_string(), te, &[TE], surface_pos, label));
    }

    rules
}

/// Stem-only and short-causative rules match almost anything; keep them to
/// the outermost layers.
fn restrict_noisy(rule: InflectionRule) -> InflectionRule {
    match rule.label.as_str() {
        "masu stem" => rule.at_most(1),
        "short causative" => rule.at_most(2),
        _ => rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_indexed_by_last_char() {
        let table = RuleTable::japanese();
        assert!(table.len() > 300);

        let labels: Vec<&str> = table
            .matching("食べた")
            .filter(|(_, r)| r.stem_pos.iter().any(|p| p == V1))
            .map(|(_, r)| r.label.as_str())
            .collect();
        assert!(labels.contains(&"past"));
    }

    #[test]
    fn growth_covers_longest_polite_form() {
        let table = RuleTable::japanese();
        // きませんでした → くる
        assert!(table.max_growth() >= 5);
    }

    #[test]
    fn external_rules_are_validated_and_normalized() {
        let table = RuleTable::from_json(
            r#"[{"surface": "タ", "stem": "ル", "stem_pos": ["v1"], "label": "past"}]"#,
        )
        .expect("valid table");
        assert_eq!(table.rules()[0].surface, "た");
        assert_eq!(table.rules()[0].stem, "る");
        assert!(table.rules()[0].surface_pos.is_empty());

        let err = RuleTable::from_json(r#"[{"surface": "た", "stem": "る", "stem_pos": [], "label": "past"}]"#)
            .expect_err("stem class is required");
        assert!(matches!(err, RuleError::InvalidRule { position: 0, .. }));
    }
}
