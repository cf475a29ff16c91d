use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DictionaryConfig {
    /// JMdict JSON files, merged in order; later files override earlier ones
    pub paths: Vec<String>,
    /// Deinflection rule table replacing the built-in one
    pub rules_path: Option<String>,
    /// Priority list (`[text, reading, score]` triples)
    pub priority_path: Option<String>,
    /// Skip malformed entries instead of failing the build
    pub skip_invalid_entries: bool,
}
