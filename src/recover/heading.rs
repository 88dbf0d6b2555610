//! Heading level inference.
//!
//! Explicit headings keep their authored level. Heuristic candidates get a
//! level from the detected document profile or from their length, clamped
//! against the running section path so a level is never skipped.

use super::options::{RecoverOptions, Thresholds};
use crate::model::{ContentBlock, DocTypeProfile, HeadingKeywords, ProfileSet};

/// Stack of currently open sections, strictly increasing in level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingHistory {
    stack: Vec<(u8, String)>,
}

impl HeadingHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// The innermost open section.
    pub fn top(&self) -> Option<(u8, &str)> {
        self.stack.last().map(|(l, t)| (*l, t.as_str()))
    }

    /// Open a section, closing every section at the same or a deeper level.
    pub fn push(&mut self, level: u8, text: impl Into<String>) {
        while self.stack.last().is_some_and(|(l, _)| *l >= level) {
            self.stack.pop();
        }
        self.stack.push((level, text.into()));
    }

    /// Levels on the current section path, outermost first.
    pub fn levels(&self) -> Vec<u8> {
        self.stack.iter().map(|(l, _)| *l).collect()
    }

    /// Depth of the section path.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Check if no section is open.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Where a heading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingSource {
    /// Authored level (`#` run or heading style)
    Explicit(u8),
    /// Level must be inferred
    Heuristic,
}

/// Normalize heading text for duplicate comparison.
///
/// Case-folded, trimmed, with a trailing ASCII or full-width colon removed.
pub fn normalize_heading_text(text: &str) -> String {
    text.trim()
        .trim_end_matches([':', '：'])
        .trim()
        .to_lowercase()
}

/// Per-document heading inferencer.
pub struct HeadingInferencer<'a> {
    thresholds: Thresholds,
    profiles: &'a ProfileSet,
    profile: Option<&'a DocTypeProfile>,
    keywords: &'a HeadingKeywords,
    title: Option<String>,
    dedupe: bool,
    history: HeadingHistory,
    emitted: usize,
}

impl<'a> HeadingInferencer<'a> {
    /// Create an inferencer for one document.
    pub fn new(
        options: &'a RecoverOptions,
        profile: Option<&'a DocTypeProfile>,
        title_hint: Option<&str>,
    ) -> Self {
        Self {
            thresholds: options.thresholds,
            profiles: &options.profiles,
            profile,
            keywords: &options.heading_keywords,
            title: title_hint
                .map(normalize_heading_text)
                .filter(|t| !t.is_empty()),
            dedupe: options.heuristic_headings,
            history: HeadingHistory::new(),
            emitted: 0,
        }
    }

    /// Estimate the level of a heuristic heading before clamping.
    pub fn estimate_level(&self, text: &str) -> u8 {
        let t = &self.thresholds;

        if let Some(profile) = self.profile {
            if profile.names_self(text) || self.profiles.is_generic_title(text) {
                return 1;
            }
            if let Some(rank) = profile.keyword_rank(text) {
                return if rank < t.keyword_tier_one {
                    2
                } else if rank < t.keyword_tier_two {
                    3
                } else {
                    4
                };
            }
        }

        if let Some(level) = self.keywords.level_of(text) {
            return level;
        }

        let len = text.chars().count();
        if len < t.short_heading_chars {
            2
        } else if len < t.medium_heading_chars {
            3
        } else {
            4
        }
    }

    /// Assign a level to a heading, or drop it as a duplicate.
    ///
    /// `previous` is the last block already emitted for this document.
    pub fn infer(
        &mut self,
        source: HeadingSource,
        text: &str,
        previous: Option<&ContentBlock>,
    ) -> Option<ContentBlock> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let level = match source {
            HeadingSource::Explicit(level) => level.clamp(1, 6),
            HeadingSource::Heuristic => self.clamp(self.estimate_level(text)),
        };

        if self.is_duplicate(text, previous) {
            log::debug!("dropping duplicate heading '{}'", text);
            return None;
        }

        if source == HeadingSource::Heuristic
            && level == 1
            && previous.and_then(|b| b.heading_level()) == Some(1)
        {
            log::debug!("dropping second consecutive level-1 heading '{}'", text);
            return None;
        }

        if self.title.is_none() {
            self.title = Some(normalize_heading_text(text));
        }
        self.history.push(level, text);
        self.emitted += 1;
        log::debug!("heading '{}' assigned level {}", text, level);

        Some(ContentBlock::heading(level, text))
    }

    fn clamp(&self, estimated: u8) -> u8 {
        let mut level = estimated.max(1);
        if let Some((top, _)) = self.history.top() {
            level = level.min(top + 1);
        }
        level.min(self.thresholds.max_inferred_level.max(1))
    }

    /// Repeats are only dropped when headings are inferred; markers-only
    /// reading keeps every authored heading.
    fn is_duplicate(&self, text: &str, previous: Option<&ContentBlock>) -> bool {
        if !self.dedupe {
            return false;
        }
        let normalized = normalize_heading_text(text);

        if let Some(ContentBlock::Heading { text: prev, .. }) = previous {
            if normalize_heading_text(prev) == normalized {
                return true;
            }
        }

        self.emitted == 1 && self.title.as_deref() == Some(normalized.as_str())
    }

    /// The running section path.
    pub fn history(&self) -> &HeadingHistory {
        &self.history
    }

    /// Number of headings emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RecoverOptions {
        RecoverOptions::default()
    }

    #[test]
    fn test_history_pops_same_or_deeper() {
        let mut history = HeadingHistory::new();
        history.push(1, "A");
        history.push(2, "B");
        history.push(3, "C");
        history.push(2, "D");
        assert_eq!(history.levels(), vec![1, 2]);
        assert_eq!(history.top(), Some((2, "D")));
    }

    #[test]
    fn test_length_estimate() {
        let opts = options();
        let inferencer = HeadingInferencer::new(&opts, None, None);
        assert_eq!(inferencer.estimate_level("概述"), 2);
        assert_eq!(inferencer.estimate_level("Market Overview"), 3);
        assert_eq!(inferencer.estimate_level("A rather long section heading text"), 4);
    }

    #[test]
    fn test_profile_estimate() {
        let opts = options();
        let profile = opts.profiles.get("BRD");
        let inferencer = HeadingInferencer::new(&opts, profile, None);
        assert_eq!(inferencer.estimate_level("商业需求文档"), 1);
        assert_eq!(inferencer.estimate_level("Requirements Document"), 1);
        assert_eq!(inferencer.estimate_level("产品属性"), 2);
        assert_eq!(inferencer.estimate_level("宏观行业趋势"), 3);
        assert_eq!(inferencer.estimate_level("收入来源和渠道"), 3);
        assert_eq!(inferencer.estimate_level("风险分析"), 4);
    }

    #[test]
    fn test_keyword_table_estimate() {
        let opts = options().with_heading_keywords(HeadingKeywords::builtin());
        let inferencer = HeadingInferencer::new(&opts, None, None);
        assert_eq!(inferencer.estimate_level("第三章 硬件设计"), 1);
        assert_eq!(inferencer.estimate_level("传感器"), 2);
        assert_eq!(inferencer.estimate_level("加速度计与陀螺仪的标定"), 3);
        assert_eq!(inferencer.estimate_level("续航"), 2);
    }

    #[test]
    fn test_generic_title_needs_profile() {
        let opts = options();
        let inferencer = HeadingInferencer::new(&opts, None, None);
        assert_eq!(inferencer.estimate_level("需求文档"), 2);
    }

    #[test]
    fn test_clamp_against_history() {
        let opts = options();
        let mut inferencer = HeadingInferencer::new(&opts, None, None);

        let first = inferencer.infer(HeadingSource::Explicit(1), "Guide", None).unwrap();
        let para = ContentBlock::paragraph("intro");
        let next = inferencer
            .infer(HeadingSource::Heuristic, "A rather long section heading text", Some(&para))
            .unwrap();

        assert_eq!(first.heading_level(), Some(1));
        assert_eq!(next.heading_level(), Some(2));
    }

    #[test]
    fn test_explicit_level_not_clamped() {
        let opts = options();
        let mut inferencer = HeadingInferencer::new(&opts, None, None);
        inferencer.infer(HeadingSource::Explicit(1), "Top", None);
        let deep = inferencer
            .infer(HeadingSource::Explicit(4), "Deep", Some(&ContentBlock::paragraph("x")))
            .unwrap();
        assert_eq!(deep.heading_level(), Some(4));
    }

    #[test]
    fn test_adjacent_duplicate_dropped() {
        let opts = options();
        let mut inferencer = HeadingInferencer::new(&opts, None, None);
        let first = inferencer.infer(HeadingSource::Heuristic, "息屏显", None).unwrap();
        assert!(inferencer
            .infer(HeadingSource::Heuristic, "息屏显：", Some(&first))
            .is_none());
        assert_eq!(inferencer.emitted(), 1);
    }

    #[test]
    fn test_title_duplicate_dropped() {
        let opts = options();
        let mut inferencer = HeadingInferencer::new(&opts, None, Some("Annual Report"));
        let title = inferencer
            .infer(HeadingSource::Explicit(1), "Annual Report", None)
            .unwrap();
        let para = ContentBlock::paragraph("Prepared by finance.");
        assert!(inferencer
            .infer(HeadingSource::Heuristic, "annual report", Some(&para))
            .is_none());
        assert_eq!(title.heading_level(), Some(1));
    }

    #[test]
    fn test_markers_only_keeps_repeats() {
        let opts = RecoverOptions::strict_markdown();
        let mut inferencer = HeadingInferencer::new(&opts, None, Some("Guide"));
        let first = inferencer.infer(HeadingSource::Explicit(1), "Guide", None).unwrap();
        let para = ContentBlock::paragraph("x");
        assert!(inferencer.infer(HeadingSource::Explicit(2), "Guide", Some(&para)).is_some());
        assert!(inferencer.infer(HeadingSource::Explicit(2), "Scope", Some(&first)).is_some());
        assert_eq!(inferencer.emitted(), 3);
    }

    #[test]
    fn test_consecutive_level_one_collapses() {
        let opts = options();
        let profile = opts.profiles.get("PRD");
        let mut inferencer = HeadingInferencer::new(&opts, profile, None);
        let first = inferencer
            .infer(HeadingSource::Heuristic, "智能手表产品需求文档", None)
            .unwrap();
        assert_eq!(first.heading_level(), Some(1));
        assert!(inferencer
            .infer(HeadingSource::Heuristic, "PRD 正式版", Some(&first))
            .is_none());
    }

    #[test]
    fn test_normalize_heading_text() {
        assert_eq!(normalize_heading_text("  Scope: "), "scope");
        assert_eq!(normalize_heading_text("范围："), "范围");
    }
}
