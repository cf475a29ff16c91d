use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::log::LogConfig;
use self::lookup::LookupConfig;
use self::ocr::OcrConfig;

pub mod dictionary;
pub mod log;
pub mod lookup;
pub mod ocr;

fn default_channel_capacity() -> usize {
    256
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub lookup: LookupConfig,
    pub ocr: OcrConfig,
    pub log: LogConfig,

    /// Capacity of the event channels between the host tasks
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            lookup: LookupConfig::default(),
            ocr: OcrConfig::default(),
            log: LogConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Read `path` when it exists, fall back to defaults otherwise, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from {}", path.display());
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            Some(path) => {
                tracing::warn!("Config {} not found, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key/value source (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(paths) = var("YOMU_DICTIONARY_PATHS") {
            self.dictionary.paths = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(path) = var("YOMU_RULES_PATH") {
            self.dictionary.rules_path = Some(path);
        }
        if let Some(path) = var("YOMU_PRIORITY_PATH") {
            self.dictionary.priority_path = Some(path);
        }
        if let Some(skip) = parse_var(&var, "YOMU_SKIP_INVALID_ENTRIES") {
            self.dictionary.skip_invalid_entries = skip;
        }
        if let Some(max) = parse_var(&var, "YOMU_MAX_SPAN_CHARS") {
            self.lookup.max_span_chars = max;
        }
        if let Some(max) = parse_var(&var, "YOMU_MAX_ALTERNATES") {
            self.lookup.max_alternates = max;
        }
        if let Some(depth) = parse_var(&var, "YOMU_MAX_CHAIN_DEPTH") {
            self.lookup.max_chain_depth = depth;
        }
        if let Some(filter) = var("YOMU_LOG") {
            self.log.filter = filter;
        }
        if let Some(json) = parse_var(&var, "YOMU_LOG_JSON") {
            self.log.json = json;
        }
    }
}

fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
