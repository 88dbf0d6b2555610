//! Reader for the markdown this crate emits.
//!
//! Reads markdown back into a [`DocumentModel`] trusting explicit markers
//! only, so that `recover → normalize → emit → read` can be checked for
//! structural round-trips.

use crate::model::{units_from_text, ContentBlock, DocumentModel};
use crate::normalize::{NormalizePreset, Normalizer};
use crate::recover::{document_title, recover, RecoverOptions};
use crate::render::is_escapable_lead;

/// Parse markdown into a document model.
///
/// A leading YAML frontmatter block is skipped; its `title` becomes the
/// document title. Block-start escapes written by the emitter are removed.
///
/// # Example
/// ```
/// use mdshape::model::ContentBlock;
/// use mdshape::read_markdown;
///
/// let doc = read_markdown("# Guide\n\n\\- not a list\n");
/// assert_eq!(doc.title, "Guide");
/// assert_eq!(doc.blocks[1], ContentBlock::paragraph("- not a list"));
/// ```
pub fn read_markdown(text: &str) -> DocumentModel {
    let (title, body) = split_frontmatter(text);
    let units = units_from_text(body);

    let mut doc = recover(&units, title.as_deref(), &RecoverOptions::strict_markdown());
    for block in doc.blocks.iter_mut() {
        unescape_block(block);
    }
    if title.is_none() {
        doc.title = document_title(None, &doc.blocks);
    }

    Normalizer::from_preset(NormalizePreset::Minimal).normalize_document(&mut doc);
    doc
}

/// Split off a `---` delimited frontmatter block, returning its title.
fn split_frontmatter(text: &str) -> (Option<String>, &str) {
    let text = text.trim_start_matches('\u{feff}');
    let Some(stripped) = text.strip_prefix("---\n") else {
        return (None, text);
    };
    let end = stripped
        .find("\n---\n")
        .or_else(|| stripped.strip_suffix("\n---").map(str::len));
    let Some(end) = end else {
        return (None, text);
    };
    // A leading thematic break is followed by a blank line or body text,
    // never by `key: value` lines only.
    let span = &stripped[..end];
    if span.is_empty() || !span.lines().all(is_yaml_entry) {
        return (None, text);
    }

    let title = span
        .lines()
        .find_map(|line| line.strip_prefix("title:"))
        .map(|value| unquote_yaml(value.trim()))
        .filter(|t| !t.is_empty());

    let body_start = (end + "\n---\n".len()).min(stripped.len());
    (title, &stripped[body_start..])
}

/// `key: value` with a plain identifier key.
fn is_yaml_entry(line: &str) -> bool {
    line.split_once(':').is_some_and(|(key, _)| {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    })
}

fn unquote_yaml(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_string();
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some(other) => result.push(other),
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn unescape_block(block: &mut ContentBlock) {
    match block {
        ContentBlock::Paragraph { text } => unescape_lead(text),
        ContentBlock::List(list) => list.items.iter_mut().for_each(unescape_lead),
        ContentBlock::Heading { text, .. } => {
            unescape_lead(text);
            unescape_closing_hashes(text);
        }
        _ => {}
    }
}

/// Drop a backslash that escapes the first character of a block.
fn unescape_lead(text: &mut String) {
    let mut chars = text.chars();
    if chars.next() == Some('\\') && chars.next().is_some_and(is_escapable_lead) {
        text.remove(0);
    }
}

/// `Issue \#` → `Issue #`
fn unescape_closing_hashes(text: &mut String) {
    let stem_len = text.trim_end_matches('#').len();
    if stem_len == text.len() {
        return;
    }
    let stem = &text[..stem_len];
    if let Some(before) = stem.strip_suffix('\\') {
        if before.ends_with(char::is_whitespace) {
            text.remove(stem_len - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableBlock;

    #[test]
    fn test_read_basic_blocks() {
        let doc = read_markdown("# Title\n\nIntro.\n\n- a\n- b\n\n| A | B |\n| --- | --- |\n| 1 | 2 |\n");
        assert_eq!(
            doc.blocks,
            vec![
                ContentBlock::heading(1, "Title"),
                ContentBlock::paragraph("Intro."),
                ContentBlock::list(false, ["a", "b"]),
                ContentBlock::Table(TableBlock::from_rows(vec![
                    vec!["A".to_string(), "B".to_string()],
                    vec!["1".to_string(), "2".to_string()],
                ])),
            ]
        );
    }

    #[test]
    fn test_no_heuristic_headings() {
        let doc = read_markdown("Standalone\n\n息屏显\n");
        assert!(doc.blocks.iter().all(|b| !b.is_heading()));
    }

    #[test]
    fn test_unescape() {
        let doc = read_markdown("## \\#tag\n\n## Issue \\#\n\n\\1. not a list\n\n- \\---\n\n\\d+ stays\n");
        assert_eq!(doc.blocks[0], ContentBlock::heading(2, "#tag"));
        assert_eq!(doc.blocks[1], ContentBlock::heading(2, "Issue #"));
        assert_eq!(doc.blocks[2], ContentBlock::paragraph("1. not a list"));
        assert_eq!(doc.blocks[3], ContentBlock::list(false, ["---"]));
        assert_eq!(doc.blocks[4], ContentBlock::paragraph("\\d+ stays"));
    }

    #[test]
    fn test_frontmatter_title() {
        let doc = read_markdown("---\ntitle: \"A \\\"quoted\\\" title\"\nblocks: 1\n---\n\nBody.\n");
        assert_eq!(doc.title, "A \"quoted\" title");
        assert_eq!(doc.blocks, vec![ContentBlock::paragraph("Body.")]);
    }

    #[test]
    fn test_leading_rule_is_not_frontmatter() {
        let doc = read_markdown("---\n\nBody text.\n\n---\n\nTail.\n");
        assert!(doc.title.is_empty());
        assert_eq!(
            doc.blocks,
            vec![
                ContentBlock::Rule,
                ContentBlock::paragraph("Body text."),
                ContentBlock::Rule,
                ContentBlock::paragraph("Tail."),
            ]
        );
    }

    #[test]
    fn test_rule_around_key_like_text_is_not_frontmatter() {
        let doc = read_markdown("---\nNote: charge first\nthen pair the phone\n---\n");
        assert!(doc.title.is_empty());
        assert_eq!(doc.blocks[0], ContentBlock::Rule);
    }

    #[test]
    fn test_repeated_heading_survives() {
        let doc = read_markdown("# Guide\n\nIntro.\n\n## Guide\n");
        assert_eq!(
            doc.blocks,
            vec![
                ContentBlock::heading(1, "Guide"),
                ContentBlock::paragraph("Intro."),
                ContentBlock::heading(2, "Guide"),
            ]
        );
        assert_eq!(doc.title, "Guide");
    }

    #[test]
    fn test_frontmatter_only() {
        let doc = read_markdown("---\ntitle: \"T\"\n---\n");
        assert_eq!(doc.title, "T");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_code_and_quote() {
        let doc = read_markdown("```sh\necho hi\n```\n\n> one\n> two\n");
        assert_eq!(
            doc.blocks,
            vec![
                ContentBlock::Code {
                    language: "sh".into(),
                    code: "echo hi".into()
                },
                ContentBlock::Quote {
                    text: "one\ntwo".into()
                },
            ]
        );
    }
}
