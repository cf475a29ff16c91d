use serde::{Deserialize, Serialize};
use yomu_types::CaptureRegion;

fn default_provider() -> String {
    "static".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// "static" or "owocr-file"
    #[serde(default = "default_provider")]
    pub provider: String,
    /// owocr JSON result read by the "owocr-file" provider
    pub owocr_dump_path: Option<String>,
    pub capture_region: Option<CaptureRegion>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            owocr_dump_path: None,
            capture_region: None,
        }
    }
}
