use serde_json::Value;
use yomu_types::{BoundingBox, Paragraph, Word};

/// Convert owocr's JSON result (paragraphs → lines → words) into one
/// [`Paragraph`] per non-blank line. Missing fields read as empty or zero.
pub fn paragraphs_from_owocr(result: &Value) -> Vec<Paragraph> {
    let mut lines = Vec::new();

    for paragraph in array(result, "paragraphs") {
        let top_to_bottom = paragraph
            .get("writing_direction")
            .and_then(Value::as_str)
            .is_some_and(|d| d == "TOP_TO_BOTTOM");

        for line in array(paragraph, "lines") {
            let words: Vec<Word> = array(line, "words")
                .map(|word| Word {
                    text: text(word),
                    separator: String::new(),
                    bbox: bounding_box(word),
                })
                .collect();

            let full_text: String = words.iter().map(|w| w.text.as_str()).collect();
            let full_text = full_text.trim();
            if full_text.is_empty() {
                continue;
            }

            let bbox = bounding_box(line);
            lines.push(Paragraph {
                full_text: full_text.to_string(),
                words,
                bbox,
                is_vertical: top_to_bottom || bbox.height > bbox.width,
            });
        }
    }

    lines
}

fn array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}

fn text(value: &Value) -> String {
    value
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bounding_box(value: &Value) -> BoundingBox {
    let Some(bbox) = value.get("bounding_box") else {
        return BoundingBox::default();
    };
    let field = |name| bbox.get(name).and_then(Value::as_f64).unwrap_or(0.0) as f32;

    BoundingBox {
        center_x: field("center_x"),
        center_y: field("center_y"),
        width: field("width"),
        height: field("height"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lines_become_paragraphs() {
        let result = json!({
            "paragraphs": [{
                "writing_direction": "LEFT_TO_RIGHT",
                "lines": [
                    {
                        "words": [
                            {"text": "食べた", "bounding_box": {"center_x": 0.2, "center_y": 0.1, "width": 0.3, "height": 0.05}},
                            {"text": "昨日", "bounding_box": {"center_x": 0.45, "center_y": 0.1, "width": 0.2, "height": 0.05}}
                        ],
                        "bounding_box": {"center_x": 0.3, "center_y": 0.1, "width": 0.5, "height": 0.05}
                    },
                    {"words": [{"text": "  "}], "bounding_box": {}}
                ]
            }, {
                "lines": [{
                    "words": [{"text": "縦書き"}],
                    "bounding_box": {"center_x": 0.9, "center_y": 0.5, "width": 0.05, "height": 0.4}
                }]
            }]
        });

        let paragraphs = paragraphs_from_owocr(&result);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].full_text, "食べた昨日");
        assert_eq!(paragraphs[0].words.len(), 2);
        assert!(!paragraphs[0].is_vertical);
        assert!(paragraphs[1].is_vertical);
        assert_eq!(paragraphs[1].words[0].bbox, BoundingBox::default());
    }

    #[test]
    fn garbage_is_empty() {
        assert!(paragraphs_from_owocr(&json!(null)).is_empty());
        assert!(paragraphs_from_owocr(&json!({"paragraphs": "nope"})).is_empty());
    }
}
