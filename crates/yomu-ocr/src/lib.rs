mod layout;
mod owocr;
mod provider;

pub use layout::OcrText;
pub use owocr::paragraphs_from_owocr;
pub use provider::{OcrProvider, OwocrFileProvider, StaticProvider};
