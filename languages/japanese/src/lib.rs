pub mod deconjugator;
pub mod dictionary;
pub mod kana;
pub mod lexicon;
pub mod loader;
pub mod priority;
pub mod processor;
pub mod rules;

#[cfg(test)]
mod tests;

pub use deconjugator::{DeconjugationResult, JapaneseDeconjugator};
pub use dictionary::{JMdictEntry, KanjiForm, ReadingForm, Sense};
pub use lexicon::Lexicon;
pub use loader::{JMdictLoader, LoadPolicy, LoadReport};
pub use priority::PriorityList;
pub use processor::{JapaneseProcessor, LookupOptions, ProcessorSources};
pub use rules::{InflectionRule, RuleTable};
