use yomu_types::{BoundingBox, Paragraph};

/// Recognized text flattened into one string, with the screen box of every
/// character so a cursor position can be turned into a lookup offset.
///
/// Paragraphs are joined with `\n`. Word separators and the joining newlines
/// have no box and can never be hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrText {
    chars: Vec<char>,
    boxes: Vec<Option<BoundingBox>>,
}

impl OcrText {
    pub fn from_paragraphs(paragraphs: &[Paragraph]) -> Self {
        let mut text = Self::default();

        for (i, paragraph) in paragraphs.iter().enumerate() {
            if i > 0 {
                text.push_unboxed("\n");
            }

            if paragraph.words.is_empty() {
                text.push_split(&paragraph.full_text, paragraph.bbox, paragraph.is_vertical);
                continue;
            }

            for word in &paragraph.words {
                text.push_split(&word.text, word.bbox, paragraph.is_vertical);
                text.push_unboxed(&word.separator);
            }
        }

        text
    }

    /// Spread `bbox` evenly over the characters of `word`
    fn push_split(&mut self, word: &str, bbox: BoundingBox, vertical: bool) {
        let count = word.chars().count();
        if count == 0 {
            return;
        }
        let step = if vertical { bbox.height } else { bbox.width } / count as f32;

        for (i, c) in word.chars().enumerate() {
            let offset = step * i as f32 + step / 2.0;
            let char_box = if vertical {
                BoundingBox {
                    center_y: bbox.top() + offset,
                    height: step,
                    ..bbox
                }
            } else {
                BoundingBox {
                    center_x: bbox.left() + offset,
                    width: step,
                    ..bbox
                }
            };
            self.chars.push(c);
            self.boxes.push(Some(char_box));
        }
    }

    fn push_unboxed(&mut self, text: &str) {
        for c in text.chars() {
            self.chars.push(c);
            self.boxes.push(None);
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Character offset under `(x, y)`, in the same normalized coordinates
    /// as the boxes
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.boxes
            .iter()
            .position(|b| b.is_some_and(|b| b.contains(x, y)))
    }

    pub fn char_box(&self, offset: usize) -> Option<BoundingBox> {
        self.boxes.get(offset).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
