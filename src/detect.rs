//! Document-type and source-format detection.
//!
//! Both run once per document before classification: profile detection scans
//! every unit for template marker phrases, format sniffing looks at the raw
//! bytes of a source whose extension is unknown.

use crate::model::{DocTypeProfile, ProfileSet, RawUnit};

/// Select the profile whose markers appear in the document.
///
/// Profiles are tried in set order; the first one with a marker anywhere in
/// the units wins. Returns `None` when no profile matches.
///
/// # Example
/// ```
/// use mdshape::detect::detect_profile;
/// use mdshape::model::{units_from_lines, ProfileSet};
///
/// let profiles = ProfileSet::builtin();
/// let units = units_from_lines(["商业需求文档", "产品属性"]);
/// let profile = detect_profile(&units, &profiles).unwrap();
/// assert_eq!(profile.type_name, "BRD");
/// ```
pub fn detect_profile<'a>(units: &[RawUnit], profiles: &'a ProfileSet) -> Option<&'a DocTypeProfile> {
    let detected = profiles
        .profiles
        .iter()
        .find(|profile| units.iter().any(|u| profile.is_marked_by(&u.text)));

    match detected {
        Some(profile) => log::debug!("detected document profile {}", profile.type_name),
        None => log::debug!("no document profile detected"),
    }
    detected
}

/// Source format guessed from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Pre-existing markdown
    Markdown,
    /// JSON array of raw units
    Units,
    /// Plain or OCR text lines
    PlainText,
}

impl SourceFormat {
    /// Canonical file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Markdown => "md",
            SourceFormat::Units => "json",
            SourceFormat::PlainText => "txt",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceFormat::Markdown => "Markdown",
            SourceFormat::Units => "unit stream (JSON)",
            SourceFormat::PlainText => "plain text",
        };
        f.write_str(name)
    }
}

/// Number of leading lines inspected when sniffing markdown.
const SNIFF_LINES: usize = 64;

/// Guess the source format from raw bytes.
///
/// A JSON array is a unit stream; text with at least two markdown block
/// signals (ATX headings, fences, pipe-table separators, `- ` items) in its
/// first lines is markdown; everything else is plain text.
pub fn detect_format_from_bytes(data: &[u8]) -> SourceFormat {
    let text = String::from_utf8_lossy(data);
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();

    if trimmed.starts_with('[') && serde_json::from_str::<Vec<RawUnit>>(trimmed).is_ok() {
        return SourceFormat::Units;
    }

    let signals = trimmed
        .lines()
        .take(SNIFF_LINES)
        .filter(|line| is_markdown_signal(line.trim_start()))
        .count();

    if signals >= 2 {
        SourceFormat::Markdown
    } else {
        SourceFormat::PlainText
    }
}

fn is_markdown_signal(line: &str) -> bool {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        return true;
    }
    if line.starts_with("```") || line.starts_with("- ") || line.starts_with("> ") {
        return true;
    }
    line.starts_with('|') && line.contains("---")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::units_from_lines;

    #[test]
    fn test_detect_brd() {
        let profiles = ProfileSet::builtin();
        let units = units_from_lines(["封面", "某某商业需求文档", "产品属性"]);
        let profile = detect_profile(&units, &profiles).unwrap();
        assert_eq!(profile.type_name, "BRD");
    }

    #[test]
    fn test_detect_priority_order() {
        let profiles = ProfileSet::builtin();
        let units = units_from_lines(["PRD 附录", "参见 MRD"]);
        assert_eq!(detect_profile(&units, &profiles).unwrap().type_name, "MRD");
    }

    #[test]
    fn test_detect_none() {
        let units = units_from_lines(["Meeting notes", "Agenda"]);
        assert!(detect_profile(&units, &ProfileSet::builtin()).is_none());
        assert!(detect_profile(&units, &ProfileSet::empty()).is_none());
    }

    #[test]
    fn test_format_markdown() {
        let data = b"# Title\n\nSome text.\n\n- item\n";
        assert_eq!(detect_format_from_bytes(data), SourceFormat::Markdown);
    }

    #[test]
    fn test_format_units() {
        let data = br#"[{"text": "Hello", "source_order": 0}]"#;
        assert_eq!(detect_format_from_bytes(data), SourceFormat::Units);
    }

    #[test]
    fn test_format_plain_text() {
        let data = "市场分析\n随着可穿戴设备的普及\n".as_bytes();
        assert_eq!(detect_format_from_bytes(data), SourceFormat::PlainText);
        assert_eq!(detect_format_from_bytes(b""), SourceFormat::PlainText);
        assert_eq!(SourceFormat::PlainText.extension(), "txt");
    }
}
