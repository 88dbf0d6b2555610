//! Raw input units handed over by source adapters.

use serde::{Deserialize, Serialize};

/// Visual emphasis observed on a unit by its source adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisHint {
    /// Whole unit is bold
    #[serde(default)]
    pub bold: bool,

    /// Unit is set noticeably larger than body text
    #[serde(default)]
    pub large: bool,
}

impl EmphasisHint {
    /// Create an emphasis hint.
    pub fn new(bold: bool, large: bool) -> Self {
        Self { bold, large }
    }

    /// Bold and large together, the visual signature of an unstyled title.
    pub fn is_title_like(&self) -> bool {
        self.bold && self.large
    }
}

/// One candidate line or paragraph from a source adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUnit {
    /// Unit text, possibly carrying markdown-like markers
    pub text: String,

    /// Paragraph style name from a word processor (e.g. "Heading 2", "标题 1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_hint: Option<String>,

    /// Emphasis flags, if the adapter can see them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<EmphasisHint>,

    /// Position in the source stream
    #[serde(default)]
    pub source_order: usize,
}

impl RawUnit {
    /// Create a unit with no style or emphasis information.
    pub fn new(text: impl Into<String>, source_order: usize) -> Self {
        Self {
            text: text.into(),
            style_hint: None,
            emphasis: None,
            source_order,
        }
    }

    /// Attach a style hint.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style_hint = Some(style.into());
        self
    }

    /// Attach emphasis flags.
    pub fn with_emphasis(mut self, bold: bool, large: bool) -> Self {
        self.emphasis = Some(EmphasisHint::new(bold, large));
        self
    }

    /// Check if the unit carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check if the adapter marked the whole unit as bold.
    pub fn is_bold(&self) -> bool {
        self.emphasis.is_some_and(|e| e.bold)
    }

    /// Check if the adapter marked the unit as bold and large.
    pub fn is_title_like(&self) -> bool {
        self.emphasis.is_some_and(|e| e.is_title_like())
    }
}

/// Build units from plain lines, numbering them in order.
pub fn units_from_lines<I, S>(lines: I) -> Vec<RawUnit>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| RawUnit::new(line, i))
        .collect()
}

/// Split text into one unit per line.
pub fn units_from_text(text: &str) -> Vec<RawUnit> {
    units_from_lines(text.lines())
}
