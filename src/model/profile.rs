//! Document-type profiles.
//!
//! A profile describes a known document template: the phrases that identify
//! it and the order in which its section keywords usually appear. Keyword
//! position predicts heading depth.

use crate::data::{self, HEADING_KEYWORDS_JSON, PROFILES_JSON};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A known document template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTypeProfile {
    /// Short type name (e.g. "BRD")
    pub type_name: String,

    /// Phrases whose presence selects this profile
    #[serde(default)]
    pub markers: Vec<String>,

    /// Section keywords in canonical outline order
    #[serde(default)]
    pub keyword_order: Vec<String>,
}

impl DocTypeProfile {
    /// Create a profile.
    pub fn new<M, K>(type_name: impl Into<String>, markers: M, keyword_order: K) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            markers: markers.into_iter().map(Into::into).collect(),
            keyword_order: keyword_order.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if any marker appears in the text.
    pub fn is_marked_by(&self, text: &str) -> bool {
        self.markers.iter().any(|m| !m.is_empty() && text.contains(m))
    }

    /// Check if the text names this document type.
    pub fn names_self(&self, text: &str) -> bool {
        (!self.type_name.is_empty() && text.contains(&self.type_name)) || self.is_marked_by(text)
    }

    /// Rank of the first keyword (in outline order) contained in the text.
    pub fn keyword_rank(&self, text: &str) -> Option<usize> {
        self.keyword_order
            .iter()
            .position(|k| !k.is_empty() && text.contains(k.as_str()))
    }

    /// Check if the text contains any keyword.
    pub fn contains_keyword(&self, text: &str) -> bool {
        self.keyword_rank(text).is_some()
    }
}

/// The set of profiles a pipeline can choose from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSet {
    /// Phrases that mark a document title for any detected profile
    #[serde(default)]
    pub generic_titles: Vec<String>,

    /// Profiles in detection priority order
    #[serde(default)]
    pub profiles: Vec<DocTypeProfile>,
}

impl ProfileSet {
    /// An empty set: no profile is ever detected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled BRD / MRD / PRD profiles.
    pub fn builtin() -> Self {
        data::bundled("profiles", PROFILES_JSON)
    }

    /// Parse and validate a profile set from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let set: ProfileSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Load and validate a profile set from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check every profile has a name and a marker.
    pub fn validate(&self) -> Result<()> {
        for (i, profile) in self.profiles.iter().enumerate() {
            if profile.type_name.trim().is_empty() {
                return Err(Error::invalid_table(
                    "profiles",
                    format!("profile #{} has an empty type_name", i),
                ));
            }
            if profile.markers.iter().all(|m| m.trim().is_empty()) {
                return Err(Error::invalid_table(
                    "profiles",
                    format!("profile '{}' has no markers", profile.type_name),
                ));
            }
        }
        Ok(())
    }

    /// Look up a profile by type name (case-insensitive).
    pub fn get(&self, type_name: &str) -> Option<&DocTypeProfile> {
        self.profiles
            .iter()
            .find(|p| p.type_name.eq_ignore_ascii_case(type_name))
    }

    /// Add a profile at the lowest priority.
    pub fn push(&mut self, profile: DocTypeProfile) {
        self.profiles.push(profile);
    }

    /// Check if the text contains a generic document-title phrase.
    pub fn is_generic_title(&self, text: &str) -> bool {
        self.generic_titles
            .iter()
            .any(|p| !p.is_empty() && text.contains(p.as_str()))
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if there are no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Keyword lists that fix the depth of a heading whatever the document type.
///
/// Chapter prefixes mark level 1, section keywords level 2 and subsection
/// keywords level 3. An empty table changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingKeywords {
    /// Prefixes of chapter titles, matched case-insensitively
    pub chapter_prefixes: Vec<String>,

    /// Keywords of top-level sections
    pub section: Vec<String>,

    /// Keywords of subsections
    pub subsection: Vec<String>,
}

impl HeadingKeywords {
    /// The bundled chapter and section keywords.
    pub fn builtin() -> Self {
        data::bundled("heading_keywords", HEADING_KEYWORDS_JSON)
    }

    /// Parse a keyword table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a keyword table from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Heading level the text's keywords call for.
    pub fn level_of(&self, text: &str) -> Option<u8> {
        let lower = text.trim_start().to_lowercase();
        if self
            .chapter_prefixes
            .iter()
            .any(|p| !p.is_empty() && lower.starts_with(&p.to_lowercase()))
        {
            return Some(1);
        }

        if contains_any(&self.section, text) {
            Some(2)
        } else if contains_any(&self.subsection, text) {
            Some(3)
        } else {
            None
        }
    }

    /// Check if the table has no keywords at all.
    pub fn is_empty(&self) -> bool {
        self.chapter_prefixes.is_empty() && self.section.is_empty() && self.subsection.is_empty()
    }
}

fn contains_any(keywords: &[String], text: &str) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && text.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles() {
        let set = ProfileSet::builtin();
        assert_eq!(set.len(), 3);
        assert!(set.validate().is_ok());

        let brd = set.get("brd").unwrap();
        assert_eq!(brd.keyword_rank("产品属性"), Some(1));
        assert_eq!(brd.keyword_rank("风险分析与对策"), Some(11));
        assert_eq!(brd.keyword_rank("无关内容"), None);
    }

    #[test]
    fn test_names_self() {
        let set = ProfileSet::builtin();
        let prd = set.get("PRD").unwrap();
        assert!(prd.names_self("XX产品需求文档"));
        assert!(prd.names_self("PRD v2"));
        assert!(!prd.names_self("功能说明"));
        assert!(set.is_generic_title("Product Requirements Document"));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let json = r#"{"profiles": [{"type_name": "", "markers": ["x"]}]}"#;
        assert!(matches!(
            ProfileSet::from_json(json),
            Err(Error::InvalidTable { .. })
        ));

        let json = r#"{"profiles": [{"type_name": "SPEC", "markers": []}]}"#;
        assert!(ProfileSet::from_json(json).is_err());
    }

    #[test]
    fn test_custom_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(
            &path,
            r#"{"profiles": [{"type_name": "SRS", "markers": ["Software Requirements"], "keyword_order": ["Introduction", "Scope"]}]}"#,
        )
        .unwrap();

        let set = ProfileSet::from_path(&path).unwrap();
        assert_eq!(set.get("srs").unwrap().keyword_rank("2. Scope"), Some(1));
        assert!(set.generic_titles.is_empty());
    }

    #[test]
    fn test_heading_keyword_levels() {
        let keywords = HeadingKeywords::builtin();
        assert!(!keywords.is_empty());
        assert_eq!(keywords.level_of("Chapter 3 Power"), Some(1));
        assert_eq!(keywords.level_of("第二章 硬件"), Some(1));
        assert_eq!(keywords.level_of("传感器配置"), Some(2));
        assert_eq!(keywords.level_of("LED 驱动"), Some(3));
        assert_eq!(keywords.level_of("续航"), None);
        assert_eq!(HeadingKeywords::default().level_of("传感器配置"), None);
    }

    #[test]
    fn test_partial_heading_keywords_json() {
        let keywords = HeadingKeywords::from_json(r#"{"section": ["Power"]}"#).unwrap();
        assert_eq!(keywords.level_of("Power budget"), Some(2));
        assert!(keywords.chapter_prefixes.is_empty());
    }
}
