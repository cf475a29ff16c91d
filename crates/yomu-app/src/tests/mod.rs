
use std::sync::Arc;

use yomu_config::Config;
use yomu_lang_japanese::{JMdictLoader, JapaneseProcessor};
use yomu_ocr::{OcrProvider, StaticProvider};
use yomu_types::{BoundingBox, Paragraph, Word};

use crate::state::AppState;

pub(crate) const DICTIONARY: &str = r#"[
    {"seq": 1, "k_ele": [{"keb": "食べる"}], "r_ele": [{"reb": "たべる"}],
     "sense": [{"pos": ["&v1;"], "gloss": ["to eat"]}]},
    {"seq": 2, "k_ele": [{"keb": "橋", "pri": ["ichi1"]}], "r_ele": [{"reb": "はし"}],
     "sense": [{"pos": ["&n;"], "gloss": ["bridge"]}]},
    {"seq": 3, "k_ele": [{"keb": "箸"}], "r_ele": [{"reb": "はし"}],
     "sense": [{"pos": ["&n;"], "gloss": ["chopsticks"]}]}
]"#;

pub(crate) fn processor() -> JapaneseProcessor {
    let (lexicon, _) = JMdictLoader::default()
        .from_json_str(DICTIONARY)
        .expect("fixture dictionary");
    JapaneseProcessor::new(lexicon)
}

/// One horizontal line "食べた" spanning x 0.0..0.3 at y 0.05..0.15
pub(crate) fn ocr_provider() -> Arc<dyn OcrProvider> {
    let bbox = BoundingBox {
        center_x: 0.15,
        center_y: 0.1,
        width: 0.3,
        height: 0.1,
    };
    Arc::new(StaticProvider::new(vec![Paragraph {
        full_text: "食べた".to_string(),
        words: vec![Word {
            text: "食べた".to_string(),
            separator: String::new(),
            bbox,
        }],
        bbox,
        is_vertical: false,
    }]))
}

pub(crate) fn state_with(config: Config) -> Arc<AppState> {
    Arc::new(AppState::with_parts(config, processor(), ocr_provider()))
}
