use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use yomu_types::{CaptureRegion, Paragraph};

use crate::owocr::paragraphs_from_owocr;

/// Anything that can turn a screen region into positioned text
#[async_trait]
pub trait OcrProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn recognize(&self, region: CaptureRegion) -> Result<Vec<Paragraph>>;
}

/// Returns the same paragraphs for every region
pub struct StaticProvider {
    paragraphs: Vec<Paragraph>,
}

impl StaticProvider {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl OcrProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn recognize(&self, _region: CaptureRegion) -> Result<Vec<Paragraph>> {
        Ok(self.paragraphs.clone())
    }
}

/// Reads the JSON an owocr instance last wrote (`owocr -w ... -of json`).
/// The file is re-read on every call, so it always reflects the latest scan.
pub struct OwocrFileProvider {
    path: PathBuf,
}

impl OwocrFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OcrProvider for OwocrFileProvider {
    fn name(&self) -> &str {
        "owocr-file"
    }

    async fn recognize(&self, region: CaptureRegion) -> Result<Vec<Paragraph>> {
        let start = std::time::Instant::now();

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read owocr output {}", self.path.display()))?;
        let value: serde_json::Value =
            serde_json::from_str(&json).context("Failed to parse owocr output")?;

        let paragraphs = paragraphs_from_owocr(&value);
        tracing::info!(
            "{} found {} paragraphs for {:?} in {:.3}s",
            self.name(),
            paragraphs.len(),
            region,
            start.elapsed().as_secs_f32()
        );
        Ok(paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn file_provider_reads_latest_dump() {
        let path = std::env::temp_dir().join(format!("yomu-owocr-{}.json", std::process::id()));
        let dump = json!({
            "paragraphs": [{
                "lines": [{
                    "words": [{"text": "橋", "bounding_box": {"center_x": 0.5, "center_y": 0.5, "width": 0.1, "height": 0.1}}],
                    "bounding_box": {"center_x": 0.5, "center_y": 0.5, "width": 0.1, "height": 0.1}
                }]
            }]
        });
        tokio::fs::write(&path, dump.to_string()).await.expect("write dump");

        let provider = OwocrFileProvider::new(&path);
        let paragraphs = provider
            .recognize(CaptureRegion::default())
            .await
            .expect("dump parses");
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].full_text, "橋");
    }

    #[tokio::test]
    async fn missing_dump_is_an_error() {
        let provider = OwocrFileProvider::new("/nonexistent/yomu-owocr.json");
        let err = provider
            .recognize(CaptureRegion::default())
            .await
            .expect_err("file does not exist");
        assert!(err.to_string().contains("Failed to read owocr output"));
    }
}
