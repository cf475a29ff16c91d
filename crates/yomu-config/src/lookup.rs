use serde::{Deserialize, Serialize};

fn default_max_span_chars() -> usize {
    25
}

fn default_max_alternates() -> usize {
    9
}

fn default_max_chain_depth() -> usize {
    5
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LookupConfig {
    /// Longest span, in characters, tried from the cursor
    #[serde(default = "default_max_span_chars")]
    pub max_span_chars: usize,
    /// Alternates returned after the primary match
    #[serde(default = "default_max_alternates")]
    pub max_alternates: usize,
    /// Deepest stack of conjugations undone for one span
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_span_chars: default_max_span_chars(),
            max_alternates: default_max_alternates(),
            max_chain_depth: default_max_chain_depth(),
        }
    }
}
