//! Converter for unit streams produced by external adapters.

use super::{decode_utf8, DocumentConverter};
use crate::error::Result;
use crate::model::RawUnit;

/// Converter for a JSON array of [`RawUnit`]s.
///
/// Word-processor adapters hand over paragraphs with their style names and
/// emphasis flags this way. Missing `source_order` values are filled in
/// from array position.
#[derive(Debug, Clone, Default)]
pub struct UnitsConverter;

impl UnitsConverter {
    /// Create a new unit-stream converter.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentConverter for UnitsConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "units"
    }

    fn read_units(&self, bytes: &[u8]) -> Result<Vec<RawUnit>> {
        let mut units: Vec<RawUnit> = serde_json::from_str(decode_utf8(bytes)?)?;
        if units.iter().all(|u| u.source_order == 0) {
            for (i, unit) in units.iter_mut().enumerate() {
                unit.source_order = i;
            }
        }
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertOptions;
    use crate::error::Error;

    #[test]
    fn test_read_units_fills_order() {
        let json = r#"[{"text": "Intro", "style_hint": "Heading 1"}, {"text": "Body."}]"#;
        let units = UnitsConverter::new().read_units(json.as_bytes()).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].style_hint.as_deref(), Some("Heading 1"));
        assert_eq!(units[1].source_order, 1);
    }

    #[test]
    fn test_style_hints_drive_headings() {
        let json = r#"[
            {"text": "Product Guide", "style_hint": "Title"},
            {"text": "Installation", "style_hint": "Heading 2"},
            {"text": "Run the installer.", "style_hint": "Normal"}
        ]"#;
        let result = UnitsConverter::new()
            .convert_bytes(json.as_bytes(), &ConvertOptions::default())
            .unwrap();
        assert_eq!(
            result.content,
            "# Product Guide\n\n## Installation\n\nRun the installer.\n"
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = UnitsConverter::new().read_units(b"[{\"txt\": 1}]").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
