//! Plain text and OCR line converter.

use super::{decode_utf8, DocumentConverter};
use crate::error::Result;
use crate::model::{units_from_text, RawUnit};
use crate::recover::RecoverOptions;

/// Converter for plain text and OCR output.
///
/// One unit per line with no style or emphasis information. Wrapped lines
/// are joined back into paragraphs.
#[derive(Debug, Clone, Default)]
pub struct TextConverter;

impl TextConverter {
    /// Create a new text converter.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentConverter for TextConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn read_units(&self, bytes: &[u8]) -> Result<Vec<RawUnit>> {
        Ok(units_from_text(decode_utf8(bytes)?))
    }

    fn default_recover_options(&self) -> RecoverOptions {
        RecoverOptions::ocr()
    }
}
