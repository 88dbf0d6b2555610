//! Normalization presets and options.

use crate::data::ReplacementTable;
use serde::{Deserialize, Serialize};

/// Normalization preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizePreset {
    /// Whitespace cleanup, empty-block removal, adjacent heading dedup and
    /// heading-sequence repair only
    Minimal,
    /// Minimal + terminology casing, document-wide heading dedup and list
    /// promotion
    #[default]
    Standard,
    /// Standard + Unicode NFC, ligature repair and punctuation unification
    Aggressive,
}

/// Options for block normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Replace typographic ligatures (ﬁ, ﬂ, ...) with their letters
    pub fix_ligatures: bool,

    /// Remove the Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Map full-width punctuation through `punctuation`
    pub unify_punctuation: bool,

    /// Punctuation mapping
    pub punctuation: ReplacementTable,

    /// Apply `terminology` casing on word boundaries
    pub apply_terminology: bool,

    /// Terminology mapping, matched case-insensitively
    pub terminology: ReplacementTable,

    /// Collapse whitespace runs and trim block text
    pub collapse_whitespace: bool,

    /// Drop empty headings, paragraphs, quotes, list items, lists and tables
    pub remove_empty: bool,

    /// Drop headings whose text already appeared anywhere earlier
    pub dedupe_headings: bool,

    /// Lift headings that skip levels after the previous heading
    pub enforce_heading_sequence: bool,

    /// Tokens that turn an unordered list into an ordered one when any item
    /// contains them (empty disables promotion)
    pub promote_ordered_markers: Vec<String>,
}

impl NormalizeOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        match preset {
            NormalizePreset::Minimal => Self::minimal(),
            NormalizePreset::Standard => Self::standard(),
            NormalizePreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal normalization options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            fix_ligatures: false,
            remove_replacement_char: false,
            unify_punctuation: false,
            punctuation: ReplacementTable::punctuation(),
            apply_terminology: false,
            terminology: ReplacementTable::terminology(),
            collapse_whitespace: true,
            remove_empty: true,
            dedupe_headings: false,
            enforce_heading_sequence: true,
            promote_ordered_markers: Vec::new(),
        }
    }

    /// Standard normalization options.
    pub fn standard() -> Self {
        Self {
            apply_terminology: true,
            dedupe_headings: true,
            promote_ordered_markers: vec!["模式".to_string()],
            ..Self::minimal()
        }
    }

    /// Aggressive normalization options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
            unify_punctuation: true,
            ..Self::standard()
        }
    }

    /// Set the terminology table.
    pub fn with_terminology(mut self, terminology: ReplacementTable) -> Self {
        self.terminology = terminology;
        self.apply_terminology = true;
        self
    }

    /// Set the punctuation table.
    pub fn with_punctuation(mut self, punctuation: ReplacementTable) -> Self {
        self.punctuation = punctuation;
        self.unify_punctuation = true;
        self
    }

    /// Set the list promotion markers.
    pub fn with_promote_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.promote_ordered_markers = markers.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}
