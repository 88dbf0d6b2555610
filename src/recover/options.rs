//! Recovery options and tuning thresholds.

use crate::data::{self, ReplacementTable};
use crate::model::{HeadingKeywords, ProfileSet};
use serde::{Deserialize, Serialize};

/// Longest line (in code points) that may be a heuristic heading.
pub const HEADING_MAX_CHARS: usize = 60;

/// Longest bold+large unit promoted to a heading without blank-line context.
pub const EMPHASIS_HEADING_MAX_CHARS: usize = 100;

/// Headings shorter than this are estimated at level 2.
pub const SHORT_HEADING_CHARS: usize = 10;

/// Headings shorter than this (but not short) are estimated at level 3.
pub const MEDIUM_HEADING_CHARS: usize = 20;

/// Profile keywords ranked below this map to level 2.
pub const KEYWORD_TIER_ONE: usize = 3;

/// Profile keywords ranked below this (but not tier one) map to level 3.
pub const KEYWORD_TIER_TWO: usize = 10;

/// Deepest level a heuristic heading can receive.
pub const MAX_INFERRED_LEVEL: u8 = 4;

/// Lines shorter than this start a new paragraph when joining wrapped lines.
pub const PARAGRAPH_BREAK_CHARS: usize = 30;

/// Numeric cut-offs used by the classifier, inferencer and aggregator.
///
/// The defaults come from sample documents; they are tuning constants, not
/// derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// See [`HEADING_MAX_CHARS`]
    pub heading_max_chars: usize,
    /// See [`EMPHASIS_HEADING_MAX_CHARS`]
    pub emphasis_heading_max_chars: usize,
    /// See [`SHORT_HEADING_CHARS`]
    pub short_heading_chars: usize,
    /// See [`MEDIUM_HEADING_CHARS`]
    pub medium_heading_chars: usize,
    /// See [`KEYWORD_TIER_ONE`]
    pub keyword_tier_one: usize,
    /// See [`KEYWORD_TIER_TWO`]
    pub keyword_tier_two: usize,
    /// See [`MAX_INFERRED_LEVEL`]
    pub max_inferred_level: u8,
    /// See [`PARAGRAPH_BREAK_CHARS`]
    pub paragraph_break_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            heading_max_chars: HEADING_MAX_CHARS,
            emphasis_heading_max_chars: EMPHASIS_HEADING_MAX_CHARS,
            short_heading_chars: SHORT_HEADING_CHARS,
            medium_heading_chars: MEDIUM_HEADING_CHARS,
            keyword_tier_one: KEYWORD_TIER_ONE,
            keyword_tier_two: KEYWORD_TIER_TWO,
            max_inferred_level: MAX_INFERRED_LEVEL,
            paragraph_break_chars: PARAGRAPH_BREAK_CHARS,
        }
    }
}

/// Options for structure recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoverOptions {
    /// Numeric cut-offs
    pub thresholds: Thresholds,

    /// Document-type profiles consulted by the detection pre-pass
    pub profiles: ProfileSet,

    /// Chapter and section keywords fixing heading depth (empty by default)
    pub heading_keywords: HeadingKeywords,

    /// Section names that are headings wherever they appear
    pub known_sections: Vec<String>,

    /// Typo corrections applied to unit text before classification
    pub corrections: ReplacementTable,

    /// Promote short, unterminated, blank-separated lines to headings
    pub heuristic_headings: bool,

    /// Treat a bold-only unit opening a block as a heading candidate even
    /// when the next unit is not blank
    pub bold_headings: bool,

    /// Join wrapped paragraph lines (line-oriented sources such as OCR)
    pub join_wrapped_lines: bool,

    /// Append marker-less lines after a list item to that item
    pub list_continuation: bool,
}

impl RecoverOptions {
    /// Create new recovery options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for OCR and plain text lines: wrapped lines are joined.
    pub fn ocr() -> Self {
        Self {
            join_wrapped_lines: true,
            ..Self::default()
        }
    }

    /// Preset for loosely structured markdown (e.g. converted from a word
    /// processor) where bold paragraphs and real headings are mixed.
    pub fn markdown() -> Self {
        Self {
            bold_headings: true,
            ..Self::default()
        }
    }

    /// Preset that trusts explicit markers only.
    ///
    /// No heuristic headings, no profiles, no data tables. Used to read back
    /// markdown this crate emitted.
    pub fn strict_markdown() -> Self {
        Self {
            profiles: ProfileSet::empty(),
            heading_keywords: HeadingKeywords::default(),
            known_sections: Vec::new(),
            corrections: ReplacementTable::new(),
            heuristic_headings: false,
            join_wrapped_lines: false,
            ..Self::default()
        }
    }

    /// Set thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the profile set.
    pub fn with_profiles(mut self, profiles: ProfileSet) -> Self {
        self.profiles = profiles;
        self
    }

    /// Set the chapter and section keyword table.
    pub fn with_heading_keywords(mut self, keywords: HeadingKeywords) -> Self {
        self.heading_keywords = keywords;
        self
    }

    /// Set the known section names.
    pub fn with_known_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Set the correction table.
    pub fn with_corrections(mut self, corrections: ReplacementTable) -> Self {
        self.corrections = corrections;
        self
    }

    /// Enable or disable heuristic headings.
    pub fn with_heuristic_headings(mut self, enabled: bool) -> Self {
        self.heuristic_headings = enabled;
        self
    }

    /// Enable or disable bold-run headings.
    pub fn with_bold_headings(mut self, enabled: bool) -> Self {
        self.bold_headings = enabled;
        self
    }

    /// Enable or disable wrapped-line joining.
    pub fn with_line_joining(mut self, enabled: bool) -> Self {
        self.join_wrapped_lines = enabled;
        self
    }

    /// Enable or disable list continuation.
    pub fn with_list_continuation(mut self, enabled: bool) -> Self {
        self.list_continuation = enabled;
        self
    }

    /// Check if the text exactly matches a known section name.
    pub fn is_known_section(&self, text: &str) -> bool {
        self.known_sections.iter().any(|s| s == text)
    }
}

impl Default for RecoverOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            profiles: ProfileSet::builtin(),
            heading_keywords: HeadingKeywords::default(),
            known_sections: data::known_sections(),
            corrections: ReplacementTable::new(),
            heuristic_headings: true,
            bold_headings: false,
            join_wrapped_lines: false,
            list_continuation: true,
        }
    }
}
