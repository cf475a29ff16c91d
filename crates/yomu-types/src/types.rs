use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Hover lookup on text the caller already has
    Lookup {
        text: String,
        offset: usize,
        source: TextSource,
        generation: u64,
    },
    /// Hover lookup at a screen point, resolved through OCR
    OcrLookup {
        x: f32,
        y: f32,
        generation: u64,
    },
    ReloadDictionary,
    ShowResults {
        generation: u64,
        results: Vec<DisplayResult>,
    },
    StatusUpdate {
        status: String,
    },
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Ocr,
    Manual,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayResult {
    pub sequence_id: u64,
    pub term: String,
    pub reading: String,
    pub definition: String,
    pub matched: String,
    pub span_len: usize,
    pub conjugation: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Box in normalized (0..1) image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn left(&self) -> f32 {
        self.center_x - self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center_y - self.height / 2.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left()
            && x <= self.left() + self.width
            && y >= self.top()
            && y <= self.top() + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    #[serde(default)]
    pub separator: String,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

/// One recognized line or paragraph, as delivered by an OCR provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub full_text: String,
    pub words: Vec<Word>,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    #[serde(default)]
    pub is_vertical: bool,
}
