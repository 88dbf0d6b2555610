//! Bundled reference tables and JSON table loading.
//!
//! Every corpus-specific list the pipeline consults (document profiles,
//! terminology casing, punctuation mapping, known section names, OCR typo
//! corrections) is plain JSON so it can be versioned and swapped without
//! touching the classifier or the inferencer.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Bundled document-type profiles (BRD / MRD / PRD).
pub const PROFILES_JSON: &str = include_str!("../data/profiles.json");

/// Bundled terminology casing table.
pub const TERMINOLOGY_JSON: &str = include_str!("../data/terminology.json");

/// Bundled full-width to ASCII punctuation table.
pub const PUNCTUATION_JSON: &str = include_str!("../data/punctuation.json");

/// Bundled section names that are always headings.
pub const KNOWN_SECTIONS_JSON: &str = include_str!("../data/known_sections.json");

/// Chapter and section keywords that fix heading depth. Not enabled by
/// default.
pub const HEADING_KEYWORDS_JSON: &str = include_str!("../data/heading_keywords.json");

/// Sample OCR typo corrections. Not enabled by default.
pub const OCR_CORRECTIONS_JSON: &str = include_str!("../data/ocr_corrections.json");

/// Read and deserialize a JSON table from disk.
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Parse a bundled table, falling back to the type's default if it is
/// somehow malformed.
pub(crate) fn bundled<T: DeserializeOwned + Default>(name: &str, json: &str) -> T {
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::warn!("bundled table '{}' failed to parse: {}", name, e);
        T::default()
    })
}

/// Bundled known section names.
pub fn known_sections() -> Vec<String> {
    bundled("known_sections", KNOWN_SECTIONS_JSON)
}

/// A `from → to` string mapping.
///
/// Stored as a JSON object. Entries are kept longest-key-first so that a
/// longer pattern wins over any shorter pattern it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ReplacementTable {
    entries: Vec<(String, String)>,
}

impl ReplacementTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from a JSON object string.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::from_map(map)
    }

    /// Load a table from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let map: BTreeMap<String, String> = load_json(&path)?;
        Self::from_map(map).map_err(|e| match e {
            Error::InvalidTable { reason, .. } => {
                Error::invalid_table(path.as_ref().display().to_string(), reason)
            }
            other => other,
        })
    }

    fn from_map(map: BTreeMap<String, String>) -> Result<Self> {
        if map.keys().any(|k| k.is_empty()) {
            return Err(Error::invalid_table("replacements", "empty key"));
        }
        Ok(map.into())
    }

    /// Add or replace a single entry.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if from.is_empty() {
            return;
        }
        self.entries.retain(|(f, _)| *f != from);
        self.entries.push((from, to.into()));
        sort_longest_first(&mut self.entries);
    }

    /// Iterate over `(from, to)` pairs, longest key first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, t)| (f.as_str(), t.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry as a plain substring replacement.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (from, to) in self.iter() {
            if result.contains(from) {
                result = result.replace(from, to);
            }
        }
        result
    }

    /// Bundled punctuation table.
    pub fn punctuation() -> Self {
        bundled("punctuation", PUNCTUATION_JSON)
    }

    /// Bundled terminology table.
    pub fn terminology() -> Self {
        bundled("terminology", TERMINOLOGY_JSON)
    }

    /// Bundled sample OCR corrections.
    pub fn ocr_corrections() -> Self {
        bundled("ocr_corrections", OCR_CORRECTIONS_JSON)
    }
}

impl From<BTreeMap<String, String>> for ReplacementTable {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut entries: Vec<(String, String)> =
            map.into_iter().filter(|(k, _)| !k.is_empty()).collect();
        sort_longest_first(&mut entries);
        Self { entries }
    }
}

impl From<ReplacementTable> for BTreeMap<String, String> {
    fn from(table: ReplacementTable) -> Self {
        table.entries.into_iter().collect()
    }
}

fn sort_longest_first(entries: &mut [(String, String)]) {
    entries.sort_by(|a, b| {
        b.0.chars()
            .count()
            .cmp(&a.0.chars().count())
            .then_with(|| a.0.cmp(&b.0))
    });
}
