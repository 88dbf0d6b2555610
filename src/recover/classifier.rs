//! Line classification.
//!
//! Tags each raw unit with a provisional kind. Rules are tried in a fixed
//! order and the first match wins; the classifier keeps just enough state
//! (previous line blank / heading, open table, open code fence) to apply the
//! contextual rules.

use super::options::RecoverOptions;
use crate::model::{DocTypeProfile, RawUnit};
use regex::Regex;

/// Provisional classification of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only
    Blank,

    /// Heading with an authored level (`#` run or heading style)
    Heading {
        /// Explicit level, clamped to 1-6
        level: u8,
        /// Heading text, marker removed
        text: String,
    },

    /// Heading whose level must be inferred
    HeadingCandidate {
        /// Heading text
        text: String,
    },

    /// List item, marker stripped
    ListItem {
        /// Numeric marker
        ordered: bool,
        /// Item text
        text: String,
    },

    /// Opening code fence
    FenceOpen {
        /// Language tag (may be empty)
        language: String,
    },

    /// Verbatim line inside a code fence
    CodeLine(String),

    /// Closing code fence
    FenceClose,

    /// Pipe-delimited table row
    TableRow {
        /// Cell texts, unescaped and trimmed
        cells: Vec<String>,
        /// Row consists of dashes, colons and pipes only
        separator: bool,
    },

    /// Block quote line
    Quote {
        /// Text after the `>` marker
        text: String,
    },

    /// Thematic break
    Rule,

    /// Whole-line image
    Image {
        /// Alternative text
        alt: String,
        /// Image location
        src: String,
    },

    /// Whole-line link
    Link {
        /// Link text
        text: String,
        /// Link target
        href: String,
    },

    /// Plain text
    Paragraph {
        /// Paragraph text, trimmed
        text: String,
    },
}

impl LineKind {
    /// Short lowercase name of the kind, for logs and debug dumps.
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::Blank => "blank",
            LineKind::Heading { .. } => "heading",
            LineKind::HeadingCandidate { .. } => "heading-candidate",
            LineKind::ListItem { .. } => "list-item",
            LineKind::FenceOpen { .. } => "fence-open",
            LineKind::CodeLine(_) => "code",
            LineKind::FenceClose => "fence-close",
            LineKind::TableRow { .. } => "table-row",
            LineKind::Quote { .. } => "quote",
            LineKind::Rule => "rule",
            LineKind::Image { .. } => "image",
            LineKind::Link { .. } => "link",
            LineKind::Paragraph { .. } => "paragraph",
        }
    }

    /// Check if this is an explicit heading or a heading candidate.
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            LineKind::Heading { .. } | LineKind::HeadingCandidate { .. }
        )
    }
}

/// What a word-processor style name says about a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleSignal {
    Heading(u8),
    HeadingCandidate,
    ListItem { ordered: bool },
}

/// Sentence terminators that disqualify a heuristic heading.
const TERMINATORS: &[char] = &['.', ',', ';', '?', '!', '。', '，', '；', '？', '！'];

struct Patterns {
    image: Regex,
    link: Regex,
    closing_hashes: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            image: Regex::new(r"^!\[((?:\\.|[^\]\\])*)\]\(((?:\\.|[^)\\])*)\)$").unwrap(),
            link: Regex::new(r"^\[((?:\\.|[^\]\\])*)\]\(((?:\\.|[^)\\])*)\)$").unwrap(),
            closing_hashes: Regex::new(r"\s+#+$").unwrap(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ClassifierState {
    at_start: bool,
    prev_blank: bool,
    prev_heading: bool,
    in_table: bool,
    in_code: bool,
}

impl Default for ClassifierState {
    fn default() -> Self {
        Self {
            at_start: true,
            prev_blank: false,
            prev_heading: false,
            in_table: false,
            in_code: false,
        }
    }
}

/// Stateful line classifier for one document.
pub struct LineClassifier<'a> {
    options: &'a RecoverOptions,
    profile: Option<&'a DocTypeProfile>,
    patterns: Patterns,
    state: ClassifierState,
}

impl<'a> LineClassifier<'a> {
    /// Create a classifier for one document.
    pub fn new(options: &'a RecoverOptions, profile: Option<&'a DocTypeProfile>) -> Self {
        Self {
            options,
            profile,
            patterns: Patterns::new(),
            state: ClassifierState::default(),
        }
    }

    /// Classify a unit given one unit of lookahead.
    pub fn classify(&mut self, unit: &RawUnit, next: Option<&RawUnit>) -> LineKind {
        let kind = self.classify_inner(unit, next);

        self.state.at_start = false;
        self.state.prev_blank = matches!(kind, LineKind::Blank);
        self.state.prev_heading = kind.is_heading();
        self.state.in_table = matches!(kind, LineKind::TableRow { .. });
        match kind {
            LineKind::FenceOpen { .. } => self.state.in_code = true,
            LineKind::FenceClose => self.state.in_code = false,
            _ => {}
        }

        log::debug!("unit {} classified as {}", unit.source_order, kind.name());
        kind
    }

    fn classify_inner(&self, unit: &RawUnit, next: Option<&RawUnit>) -> LineKind {
        if self.state.in_code {
            if unit.text.trim_start().starts_with("```") {
                return LineKind::FenceClose;
            }
            return LineKind::CodeLine(unit.text.trim_end_matches(['\r', '\n']).to_string());
        }

        let text = unit.text.trim();

        // Rule 1: blank
        if text.is_empty() {
            return LineKind::Blank;
        }

        // Rule 2: explicit heading (style hint or `#` run)
        let style = unit.style_hint.as_deref().and_then(parse_style_hint);
        if let Some(StyleSignal::Heading(level)) = style {
            return LineKind::Heading {
                level,
                text: self.strip_heading_markers(text),
            };
        }
        if let Some((level, rest)) = self.parse_atx_heading(text) {
            return LineKind::Heading { level, text: rest };
        }

        // Markdown block signals
        if is_thematic_break(text) {
            return LineKind::Rule;
        }
        if let Some(rest) = text.strip_prefix('>') {
            return LineKind::Quote {
                text: rest.trim().to_string(),
            };
        }
        if let Some(caps) = self.patterns.image.captures(text) {
            return LineKind::Image {
                alt: unescape_inline(&caps[1]),
                src: unescape_inline(&caps[2]),
            };
        }
        if let Some(caps) = self.patterns.link.captures(text) {
            return LineKind::Link {
                text: unescape_inline(&caps[1]),
                href: unescape_inline(&caps[2]),
            };
        }

        // Rule 3: list marker, explicit or from the style name
        if let Some((ordered, rest)) = parse_list_marker(text) {
            return LineKind::ListItem {
                ordered,
                text: rest.to_string(),
            };
        }
        if let Some(StyleSignal::ListItem { ordered }) = style {
            return LineKind::ListItem {
                ordered,
                text: text.to_string(),
            };
        }

        // Rule 4: code fence
        if let Some(lang) = text.strip_prefix("```") {
            return LineKind::FenceOpen {
                language: lang.trim().to_string(),
            };
        }

        // Rule 5: table row
        if self.is_table_row(text, next) {
            return LineKind::TableRow {
                cells: split_cells(text),
                separator: is_separator_row(text),
            };
        }

        // Rule 6: heuristic heading
        if style == Some(StyleSignal::HeadingCandidate) || self.is_heading_candidate(text, next) {
            return LineKind::HeadingCandidate {
                text: self.strip_heading_markers(text),
            };
        }

        // Emphasis promotion
        if self.options.heuristic_headings
            && char_len(text) < self.options.thresholds.emphasis_heading_max_chars
            && (unit.is_title_like() || self.is_bold_heading(unit, text))
        {
            return LineKind::HeadingCandidate {
                text: self.strip_heading_markers(text),
            };
        }

        // Rule 7
        LineKind::Paragraph {
            text: text.to_string(),
        }
    }

    fn parse_atx_heading(&self, text: &str) -> Option<(u8, String)> {
        let hashes = text.chars().take_while(|c| *c == '#').count();
        if hashes == 0 {
            return None;
        }
        let rest = self.strip_heading_markers(&text[hashes..]);
        if rest.is_empty() {
            return None;
        }
        Some((hashes.min(6) as u8, rest))
    }

    /// Remove leftover `#` residue, a closing `#` sequence and a wrapping
    /// emphasis pair from heading text.
    fn strip_heading_markers(&self, text: &str) -> String {
        let text = text.trim_start_matches('#').trim();
        let text = self.patterns.closing_hashes.replace(text, "");
        strip_wrapping_emphasis(text.trim()).to_string()
    }

    fn is_table_row(&self, text: &str, next: Option<&RawUnit>) -> bool {
        if self.state.in_table {
            return count_unescaped_pipes(text) > 0;
        }
        if count_unescaped_pipes(text) == 0 || is_separator_row(text) {
            return false;
        }
        let next = next.map(|u| u.text.trim()).unwrap_or("");
        is_separator_row(next) || (is_bordered(text) && is_pipe_row(next))
    }

    /// A bold-only unit opening a block, when the options trust bold runs.
    fn is_bold_heading(&self, unit: &RawUnit, text: &str) -> bool {
        self.options.bold_headings
            && unit.is_bold()
            && (self.state.at_start || self.state.prev_blank)
            && !ends_with_terminator(text)
    }

    fn is_heading_candidate(&self, text: &str, next: Option<&RawUnit>) -> bool {
        if !self.options.heuristic_headings {
            return false;
        }
        if self.options.is_known_section(text) {
            return true;
        }
        if char_len(text) > self.options.thresholds.heading_max_chars
            || ends_with_terminator(text)
            || !text.chars().any(char::is_alphabetic)
        {
            return false;
        }

        let keyword = self.profile.is_some_and(|p| p.contains_keyword(text))
            || self.options.heading_keywords.level_of(text).is_some();
        let prev_clear = self.state.at_start || self.state.prev_blank;
        let next_clear = next.map_or(true, |u| u.is_blank());

        (prev_clear && (next_clear || keyword)) || (self.state.prev_heading && keyword)
    }
}

/// Classify a whole unit sequence without aggregating it.
pub fn classify_units(
    units: &[RawUnit],
    options: &RecoverOptions,
    profile: Option<&DocTypeProfile>,
) -> Vec<LineKind> {
    let mut classifier = LineClassifier::new(options, profile);
    units
        .iter()
        .enumerate()
        .map(|(i, unit)| classifier.classify(unit, units.get(i + 1)))
        .collect()
}

fn parse_style_hint(style: &str) -> Option<StyleSignal> {
    let lower = style.trim().to_lowercase();
    match lower.as_str() {
        "title" => return Some(StyleSignal::Heading(1)),
        "subtitle" => return Some(StyleSignal::Heading(2)),
        _ => {}
    }

    let rest = lower
        .strip_prefix("heading")
        .or_else(|| lower.strip_prefix("标题"));
    if let Some(rest) = rest {
        let digits: String = rest
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        return match digits.parse::<u8>() {
            Ok(level) => Some(StyleSignal::Heading(level.clamp(1, 6))),
            Err(_) => Some(StyleSignal::HeadingCandidate),
        };
    }

    if lower.contains("list") || lower.contains("列表") {
        let ordered = lower.contains("number") || lower.contains("编号");
        return Some(StyleSignal::ListItem { ordered });
    }
    None
}

/// Split a list marker off the text: `(ordered, rest)`.
pub(crate) fn parse_list_marker(text: &str) -> Option<(bool, &str)> {
    let mut chars = text.chars();
    let first = chars.next()?;

    match first {
        '-' | '*' | '+' => {
            let rest = chars.as_str();
            if rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() {
                return Some((false, rest.trim()));
            }
            None
        }
        '•' | '·' => {
            let rest = chars.as_str().trim();
            if rest.is_empty() {
                None
            } else {
                Some((false, rest))
            }
        }
        c if c.is_ascii_digit() => {
            let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits > 9 {
                return None;
            }
            let after = &text[digits..];
            let rest = after.strip_prefix('.').or_else(|| after.strip_prefix(')'))?;
            if rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() {
                Some((true, rest.trim()))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// A thematic break: three or more `-`, `*` or `_`, spaces allowed.
pub(crate) fn is_thematic_break(text: &str) -> bool {
    let compact: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && matches!(compact[0], '-' | '*' | '_')
        && compact.iter().all(|c| *c == compact[0])
}

fn count_unescaped_pipes(text: &str) -> usize {
    let mut count = 0;
    let mut escaped = false;
    for c in text.chars() {
        match c {
            '\\' if !escaped => escaped = true,
            '|' if !escaped => count += 1,
            _ => escaped = false,
        }
    }
    count
}

fn is_bordered(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('|') && text.ends_with('|') && !text.ends_with("\\|")
}

fn is_pipe_row(text: &str) -> bool {
    is_bordered(text) || count_unescaped_pipes(text) >= 2
}

/// A separator row: pipes, dashes, colons and spaces only.
pub(crate) fn is_separator_row(text: &str) -> bool {
    !text.is_empty()
        && text.contains('|')
        && text.contains('-')
        && text.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Split a pipe row into trimmed, unescaped cells.
pub(crate) fn split_cells(text: &str) -> Vec<String> {
    let mut inner = text.trim();
    if let Some(rest) = inner.strip_prefix('|') {
        inner = rest;
    }
    if inner.ends_with('|') && !inner.ends_with("\\|") {
        inner = &inner[..inner.len() - 1];
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Check if the text ends in a sentence terminator. A trailing colon is
/// tolerated.
pub(crate) fn ends_with_terminator(text: &str) -> bool {
    text.trim_end()
        .chars()
        .last()
        .is_some_and(|c| TERMINATORS.contains(&c))
}

fn strip_wrapping_emphasis(text: &str) -> &str {
    for marker in ["**", "__"] {
        if let Some(inner) = text
            .strip_prefix(marker)
            .and_then(|t| t.strip_suffix(marker))
        {
            if !inner.trim().is_empty() && !inner.contains(marker) {
                return inner.trim();
            }
        }
    }
    text
}

/// Remove backslash escapes from link/image fields.
fn unescape_inline(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                result.push(next);
                continue;
            }
        }
        result.push(c);
    }
    result
}

/// Length in code points.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{units_from_lines, HeadingKeywords, ProfileSet};

    fn kinds(lines: &[&str]) -> Vec<LineKind> {
        let options = RecoverOptions::default().with_known_sections(Vec::<String>::new());
        let units = units_from_lines(lines.iter().copied());
        classify_units(&units, &options, None)
    }

    #[test]
    fn test_blank_and_paragraph() {
        let k = kinds(&["   ", "This is a complete sentence."]);
        assert_eq!(k[0], LineKind::Blank);
        assert_eq!(
            k[1],
            LineKind::Paragraph {
                text: "This is a complete sentence.".into()
            }
        );
    }

    #[test]
    fn test_atx_headings() {
        let k = kinds(&["## Scope", "#NoSpace", "######## Deep", "# Closed ##"]);
        assert_eq!(k[0], LineKind::Heading { level: 2, text: "Scope".into() });
        assert_eq!(k[1], LineKind::Heading { level: 1, text: "NoSpace".into() });
        assert_eq!(k[2], LineKind::Heading { level: 6, text: "Deep".into() });
        assert_eq!(k[3], LineKind::Heading { level: 1, text: "Closed".into() });
    }

    #[test]
    fn test_style_hints() {
        let options = RecoverOptions::default();
        let units = vec![
            RawUnit::new("Overview", 0).with_style("Heading 2"),
            RawUnit::new("概述", 1).with_style("标题 3"),
            RawUnit::new("My Report", 2).with_style("Title"),
            RawUnit::new("first step", 3).with_style("List Number"),
            RawUnit::new("a bullet", 4).with_style("List Paragraph"),
        ];
        let k = classify_units(&units, &options, None);
        assert_eq!(k[0], LineKind::Heading { level: 2, text: "Overview".into() });
        assert_eq!(k[1], LineKind::Heading { level: 3, text: "概述".into() });
        assert_eq!(k[2], LineKind::Heading { level: 1, text: "My Report".into() });
        assert_eq!(k[3], LineKind::ListItem { ordered: true, text: "first step".into() });
        assert_eq!(k[4], LineKind::ListItem { ordered: false, text: "a bullet".into() });
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(parse_list_marker("- item"), Some((false, "item")));
        assert_eq!(parse_list_marker("• 要点"), Some((false, "要点")));
        assert_eq!(parse_list_marker("·要点"), Some((false, "要点")));
        assert_eq!(parse_list_marker("12. step"), Some((true, "step")));
        assert_eq!(parse_list_marker("3) step"), Some((true, "step")));
        assert_eq!(parse_list_marker("1.5倍速度"), None);
        assert_eq!(parse_list_marker("-5 degrees"), None);
        assert_eq!(parse_list_marker("*emphasis*"), None);
    }

    #[test]
    fn test_code_fence_consumes_lines() {
        let k = kinds(&["```rust", "# not a heading", "", "```", "after."]);
        assert_eq!(k[0], LineKind::FenceOpen { language: "rust".into() });
        assert_eq!(k[1], LineKind::CodeLine("# not a heading".into()));
        assert_eq!(k[2], LineKind::CodeLine(String::new()));
        assert_eq!(k[3], LineKind::FenceClose);
        assert!(matches!(k[4], LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_table_rows() {
        let k = kinds(&["| A | B |", "|---|:-:|", "| 1 | 2 |", "plain text here."]);
        assert_eq!(
            k[0],
            LineKind::TableRow { cells: vec!["A".into(), "B".into()], separator: false }
        );
        assert!(matches!(k[1], LineKind::TableRow { separator: true, .. }));
        assert!(matches!(k[2], LineKind::TableRow { separator: false, .. }));
        assert!(matches!(k[3], LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_table_without_separator() {
        let k = kinds(&["| Name | Value |", "| a | 1 |"]);
        assert!(matches!(k[0], LineKind::TableRow { .. }));
        assert!(matches!(k[1], LineKind::TableRow { .. }));
    }

    #[test]
    fn test_table_separator_without_outer_pipes() {
        let k = kinds(&["| a | b |", "--- | ---", "| 1 | 2 |"]);
        assert!(matches!(k[0], LineKind::TableRow { separator: false, .. }));
        assert!(matches!(k[1], LineKind::TableRow { separator: true, .. }));
        assert!(matches!(k[2], LineKind::TableRow { separator: false, .. }));

        let k = kinds(&["a | b", "--- | ---", "1 | 2"]);
        assert_eq!(
            k[0],
            LineKind::TableRow { cells: vec!["a".into(), "b".into()], separator: false }
        );
        assert!(matches!(k[1], LineKind::TableRow { separator: true, .. }));
        assert_eq!(
            k[2],
            LineKind::TableRow { cells: vec!["1".into(), "2".into()], separator: false }
        );
    }

    #[test]
    fn test_stray_separator_is_not_table() {
        let k = kinds(&["Some text here.", "--- | ---", "More text here."]);
        assert!(!matches!(k[1], LineKind::TableRow { .. }));
    }

    #[test]
    fn test_lone_pipe_line_is_not_table() {
        let k = kinds(&["", "a | b | c", ""]);
        assert!(!matches!(k[1], LineKind::TableRow { .. }));
    }

    #[test]
    fn test_split_cells_escaped_pipe() {
        assert_eq!(split_cells(r"| a \| b | c |"), vec!["a | b", "c"]);
        assert_eq!(split_cells("x | y"), vec!["x", "y"]);
    }

    #[test]
    fn test_heuristic_heading_needs_context() {
        let k = kinds(&["", "Market Overview", "", "Market Overview", "continues here"]);
        assert!(matches!(k[1], LineKind::HeadingCandidate { .. }));
        assert!(matches!(k[3], LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_terminated_line_is_not_heading() {
        let k = kinds(&["", "Short sentence.", ""]);
        assert!(matches!(k[1], LineKind::Paragraph { .. }));
        let k = kinds(&["", "Contact:", ""]);
        assert!(matches!(k[1], LineKind::HeadingCandidate { .. }));
        let k = kinds(&["", "2024", ""]);
        assert!(matches!(k[1], LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_profile_keyword_bypasses_next_line() {
        let options = RecoverOptions::default();
        let profiles = ProfileSet::builtin();
        let profile = profiles.get("BRD");
        let units = units_from_lines(["商业需求文档", "产品属性", "这是一段正文"]);
        let k = classify_units(&units, &options, profile);
        assert!(matches!(k[0], LineKind::HeadingCandidate { .. }));
        assert!(matches!(k[1], LineKind::HeadingCandidate { .. }));
        assert!(matches!(k[2], LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_heading_keywords_act_as_context() {
        let units = units_from_lines(["", "传感器配置", "采样率为 25 Hz"]);

        let k = classify_units(&units, &RecoverOptions::default(), None);
        assert!(matches!(k[1], LineKind::Paragraph { .. }));

        let options = RecoverOptions::default().with_heading_keywords(HeadingKeywords::builtin());
        let k = classify_units(&units, &options, None);
        assert_eq!(k[1], LineKind::HeadingCandidate { text: "传感器配置".into() });
    }

    #[test]
    fn test_known_section_without_context() {
        let options = RecoverOptions::default();
        let units = units_from_lines(["介绍文字", "息屏显", "正文"]);
        let k = classify_units(&units, &options, None);
        assert_eq!(k[1], LineKind::HeadingCandidate { text: "息屏显".into() });
    }

    #[test]
    fn test_emphasis_promotion() {
        let options = RecoverOptions::default();
        let units = vec![
            RawUnit::new("intro line", 0),
            RawUnit::new("Product Overview", 1).with_emphasis(true, true),
            RawUnit::new("Bold but body sized", 2).with_emphasis(true, false),
            RawUnit::new("more text", 3),
        ];
        let k = classify_units(&units, &options, None);
        assert!(matches!(k[1], LineKind::HeadingCandidate { .. }));
        assert!(matches!(k[2], LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_bold_line_in_markdown_preset() {
        let units = vec![
            RawUnit::new("", 0),
            RawUnit::new("Key Features", 1).with_emphasis(true, false),
            RawUnit::new("Fast start-up and low power draw.", 2),
        ];

        let k = classify_units(&units, &RecoverOptions::default(), None);
        assert!(matches!(k[1], LineKind::Paragraph { .. }));

        let k = classify_units(&units, &RecoverOptions::markdown(), None);
        assert_eq!(k[1], LineKind::HeadingCandidate { text: "Key Features".into() });
    }

    #[test]
    fn test_bold_sentence_stays_paragraph() {
        let units = vec![
            RawUnit::new("Note: keep the strap dry.", 0).with_emphasis(true, false),
            RawUnit::new("The sensor is not sealed.", 1),
        ];
        let k = classify_units(&units, &RecoverOptions::markdown(), None);
        assert!(matches!(k[0], LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_markdown_signals() {
        let k = kinds(&["---", "> quoted", "![logo \\[x\\]](img/a\\(1\\).png)", "[docs](https://x.io)"]);
        assert_eq!(k[0], LineKind::Rule);
        assert_eq!(k[1], LineKind::Quote { text: "quoted".into() });
        assert_eq!(
            k[2],
            LineKind::Image { alt: "logo [x]".into(), src: "img/a(1).png".into() }
        );
        assert_eq!(
            k[3],
            LineKind::Link { text: "docs".into(), href: "https://x.io".into() }
        );
    }

    #[test]
    fn test_heading_text_cleanup() {
        let k = kinds(&["", "**Key Features**", ""]);
        assert_eq!(k[1], LineKind::HeadingCandidate { text: "Key Features".into() });
    }

    #[test]
    fn test_strict_mode_has_no_heuristics() {
        let options = RecoverOptions::strict_markdown();
        let units = units_from_lines(["", "Standalone", ""]);
        let k = classify_units(&units, &options, None);
        assert!(matches!(k[1], LineKind::Paragraph { .. }));
    }
}
