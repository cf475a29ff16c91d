use serde::Deserialize;
use yomu_core::BuildError;
use yomu_core::dictionary::{DictionaryEntry, FormKind, FormRef};

use crate::priority;

/// JMdict dictionary entry, one per `seq`
#[derive(Debug, Clone, PartialEq)]
pub struct JMdictEntry {
    pub seq: u64,
    pub kanji: Vec<KanjiForm>,
    pub readings: Vec<ReadingForm>,
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KanjiForm {
    pub text: String,
    pub priority: Vec<String>,
    pub info: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingForm {
    pub text: String,
    /// Indices into `kanji`; empty means the reading applies to every form
    pub restrict: Vec<usize>,
    pub priority: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sense {
    pub pos: Vec<String>,
    pub glosses: Vec<String>,
    pub xrefs: Vec<String>,
    pub misc: Vec<String>,
    pub dialects: Vec<String>,
    pub info: Vec<String>,
    pub kanji_restrict: Vec<String>,
    pub reading_restrict: Vec<String>,
}

impl JMdictEntry {
    /// Decode one element of the source JSON array. `position` is only used
    /// to identify the element in errors.
    pub fn from_value(position: usize, value: serde_json::Value) -> Result<Self, BuildError> {
        let raw: RawEntry =
            serde_json::from_value(value).map_err(|source| BuildError::Parse { position, source })?;
        Self::from_raw(position, raw)
    }

    fn from_raw(position: usize, raw: RawEntry) -> Result<Self, BuildError> {
        let seq = raw.seq.ok_or(BuildError::MissingField {
            position,
            seq: None,
            field: "seq",
        })?;
        let missing = |field| BuildError::MissingField {
            position,
            seq: Some(seq),
            field,
        };

        if raw.k_ele.is_empty() && raw.r_ele.is_empty() {
            return Err(missing("k_ele/r_ele"));
        }
        if raw.sense.is_empty() {
            return Err(missing("sense"));
        }

        let kanji = raw
            .k_ele
            .into_iter()
            .map(|k| {
                Ok(KanjiForm {
                    text: k.keb.ok_or_else(|| missing("keb"))?,
                    priority: k.pri,
                    info: normalize_tags(k.inf),
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        let readings = raw
            .r_ele
            .into_iter()
            .map(|r| {
                let text = r.reb.ok_or_else(|| missing("reb"))?;
                let restrict = r
                    .restr
                    .into_iter()
                    .map(|restr| {
                        kanji.iter().position(|k| k.text == restr).ok_or_else(|| {
                            BuildError::InvalidRestriction {
                                seq,
                                reading: text.clone(),
                                restr,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, BuildError>>()?;
                Ok(ReadingForm {
                    text,
                    restrict,
                    priority: r.pri,
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        // A sense without pos keeps the classes of the sense before it
        let mut previous_pos: Vec<String> = Vec::new();
        let senses = raw
            .sense
            .into_iter()
            .map(|s| Sense {
                pos: if s.pos.is_empty() {
                    previous_pos.clone()
                } else {
                    previous_pos = normalize_tags(s.pos);
                    previous_pos.clone()
                },
                glosses: s.gloss,
                xrefs: s.xref,
                misc: normalize_tags(s.misc),
                dialects: normalize_tags(s.dial),
                info: s.inf,
                kanji_restrict: s.stagk,
                reading_restrict: s.stagr,
            })
            .collect();

        Ok(Self {
            seq,
            kanji,
            readings,
            senses,
        })
    }

    /// Every form of the entry with its surface text, kanji forms first
    pub fn forms(&self) -> impl Iterator<Item = (FormRef, &str)> {
        let kanji = self
            .kanji
            .iter()
            .enumerate()
            .map(|(i, k)| (FormRef::kanji(i), k.text.as_str()));
        let readings = self
            .readings
            .iter()
            .enumerate()
            .map(|(i, r)| (FormRef::reading(i), r.text.as_str()));
        kanji.chain(readings)
    }

    /// Whether `sense` may be used with `form` (stagk/stagr restrictions)
    pub fn sense_applies(&self, sense: &Sense, form: FormRef) -> bool {
        match form.kind {
            FormKind::Kanji => {
                sense.kanji_restrict.is_empty()
                    || self
                        .kanji
                        .get(form.index)
                        .is_some_and(|k| sense.kanji_restrict.contains(&k.text))
            }
            FormKind::Reading => {
                sense.reading_restrict.is_empty()
                    || self
                        .readings
                        .get(form.index)
                        .is_some_and(|r| sense.reading_restrict.contains(&r.text))
            }
        }
    }

    /// Whether any sense usable with `form` carries one of `classes`
    pub fn has_pos(&self, form: FormRef, classes: &[String]) -> bool {
        self.senses
            .iter()
            .filter(|sense| self.sense_applies(sense, form))
            .any(|sense| sense.pos.iter().any(|pos| classes.contains(pos)))
    }

    pub fn form_priority(&self, form: FormRef) -> u32 {
        let tags = match form.kind {
            FormKind::Kanji => self.kanji.get(form.index).map(|k| &k.priority),
            FormKind::Reading => self.readings.get(form.index).map(|r| &r.priority),
        };
        tags.map_or(0, |tags| priority::tag_score(tags))
    }

    /// Best priority over all forms
    pub fn best_priority(&self) -> u32 {
        self.forms()
            .map(|(form, _)| self.form_priority(form))
            .max()
            .unwrap_or(0)
    }

    /// Readings usable with kanji form `index`
    pub fn readings_for_kanji(&self, index: usize) -> impl Iterator<Item = &ReadingForm> {
        self.readings
            .iter()
            .filter(move |r| r.restrict.is_empty() || r.restrict.contains(&index))
    }

    /// Reading to display next to `form`
    pub fn reading_for(&self, form: FormRef) -> Option<&str> {
        match form.kind {
            FormKind::Kanji => self.readings_for_kanji(form.index).next(),
            FormKind::Reading => self.readings.get(form.index),
        }
        .map(|r| r.text.as_str())
    }

    pub fn is_kana_only(&self) -> bool {
        self.kanji.is_empty()
    }
}

impl DictionaryEntry for JMdictEntry {
    fn id(&self) -> u64 {
        self.seq
    }

    fn headword(&self) -> String {
        self.kanji
            .first()
            .map(|k| k.text.clone())
            .or_else(|| self.readings.first().map(|r| r.text.clone()))
            .unwrap_or_default()
    }

    fn form_text(&self, form: FormRef) -> Option<&str> {
        match form.kind {
            FormKind::Kanji => self.kanji.get(form.index).map(|k| k.text.as_str()),
            FormKind::Reading => self.readings.get(form.index).map(|r| r.text.as_str()),
        }
    }
}

/// Strip the entity wrapper: `&v5u;` → `v5u`
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    let tag = tag.strip_prefix('&').unwrap_or(tag);
    tag.strip_suffix(';').unwrap_or(tag).to_string()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.iter().map(|t| normalize_tag(t)).collect()
}

// JSON structures for the JMdict source format
#[derive(Debug, Deserialize)]
struct RawEntry {
    seq: Option<u64>,
    #[serde(default)]
    k_ele: Vec<RawKanji>,
    #[serde(default)]
    r_ele: Vec<RawReading>,
    #[serde(default)]
    sense: Vec<RawSense>,
}

#[derive(Debug, Deserialize)]
struct RawKanji {
    keb: Option<String>,
    #[serde(default)]
    pri: Vec<String>,
    #[serde(default)]
    inf: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawReading {
    reb: Option<String>,
    #[serde(default)]
    restr: Vec<String>,
    #[serde(default)]
    pri: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSense {
    #[serde(default)]
    pos: Vec<String>,
    #[serde(default)]
    gloss: Vec<String>,
    #[serde(default)]
    xref: Vec<String>,
    #[serde(default)]
    misc: Vec<String>,
    #[serde(default)]
    dial: Vec<String>,
    #[serde(default)]
    stagk: Vec<String>,
    #[serde(default)]
    stagr: Vec<String>,
    #[serde(default)]
    inf: Vec<String>,
}
