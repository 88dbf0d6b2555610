//! Converter for loosely structured markdown.

use super::{decode_utf8, DocumentConverter};
use crate::error::Result;
use crate::model::{units_from_text, RawUnit};
use crate::recover::RecoverOptions;

/// Converter for markdown produced by word-processor exports.
///
/// Such markdown mixes real `#` headings with bold paragraphs standing in
/// for headings. A line wholly wrapped in `**…**` or `__…__` is handed over
/// with a bold emphasis hint, which the markdown preset reads as a heading
/// signal even when body text follows without a blank line.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    /// Create a new markdown converter.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentConverter for MarkdownConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn read_units(&self, bytes: &[u8]) -> Result<Vec<RawUnit>> {
        let units = units_from_text(decode_utf8(bytes)?)
            .into_iter()
            .map(|unit| {
                if is_bold_line(&unit.text) {
                    unit.with_emphasis(true, false)
                } else {
                    unit
                }
            })
            .collect();
        Ok(units)
    }

    fn default_recover_options(&self) -> RecoverOptions {
        RecoverOptions::markdown()
    }
}

/// `**Key Features**` or `__Key Features__`, with nothing outside the pair.
fn is_bold_line(text: &str) -> bool {
    let text = text.trim();
    ["**", "__"].iter().any(|marker| {
        text.len() > marker.len() * 2
            && text.starts_with(marker)
            && text.ends_with(marker)
            && !text[marker.len()..text.len() - marker.len()].contains(marker)
    })
}
