/// Raised while building an index from dictionary source data. Fatal to the
/// build unless the caller opted into skipping invalid entries.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("entry #{position}: could not decode: {source}")]
    Parse {
        position: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry #{position} (seq {seq:?}): missing required field `{field}`")]
    MissingField {
        position: usize,
        seq: Option<u64>,
        field: &'static str,
    },

    #[error("entry seq {seq}: reading `{reading}` is restricted to unknown kanji form `{restr}`")]
    InvalidRestriction {
        seq: u64,
        reading: String,
        restr: String,
    },

    #[error("deinflection rules: {0}")]
    Rules(#[from] RuleError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("rule #{position} (`{label}`): {reason}")]
    InvalidRule {
        position: usize,
        label: String,
        reason: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Caller contract violations on the lookup entry point. A miss is not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("offset {offset} is out of bounds for text of {len} characters")]
    OffsetOutOfBounds { offset: usize, len: usize },
}
