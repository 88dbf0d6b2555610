//! Content block types.

use super::TableBlock;
use serde::{Deserialize, Serialize};

/// A structurally classified unit of the recovered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A heading
    Heading {
        /// Nesting depth (1-6)
        level: u8,
        /// Heading text
        text: String,
    },

    /// A paragraph of text
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// An ordered or unordered list
    List(ListBlock),

    /// A table
    Table(TableBlock),

    /// A fenced code block
    Code {
        /// Language tag (may be empty)
        language: String,
        /// Verbatim code lines joined by `\n`
        code: String,
    },

    /// A standalone image
    Image {
        /// Alternative text
        alt: String,
        /// Image location
        src: String,
    },

    /// A standalone link
    Link {
        /// Link text
        text: String,
        /// Link target
        href: String,
    },

    /// A block quote
    Quote {
        /// Quoted text, lines joined by `\n`
        text: String,
    },

    /// A horizontal rule / separator
    Rule,
}

impl ContentBlock {
    /// Create a heading block. The level is clamped to 1-6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        ContentBlock::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    /// Create a list block.
    pub fn list<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentBlock::List(ListBlock {
            ordered,
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    /// Get the kind of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Heading { .. } => BlockKind::Heading,
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::List(_) => BlockKind::List,
            ContentBlock::Table(_) => BlockKind::Table,
            ContentBlock::Code { .. } => BlockKind::Code,
            ContentBlock::Image { .. } => BlockKind::Image,
            ContentBlock::Link { .. } => BlockKind::Link,
            ContentBlock::Quote { .. } => BlockKind::Quote,
            ContentBlock::Rule => BlockKind::Rule,
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, ContentBlock::Heading { .. })
    }

    /// Get the heading level (1-6) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ContentBlock::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Primary text of the block, if it has a single one.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Heading { text, .. }
            | ContentBlock::Paragraph { text }
            | ContentBlock::Quote { text }
            | ContentBlock::Link { text, .. } => Some(text),
            ContentBlock::Image { alt, .. } => Some(alt),
            ContentBlock::Code { code, .. } => Some(code),
            ContentBlock::List(_) | ContentBlock::Table(_) | ContentBlock::Rule => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::List(list) => list.items.join("\n"),
            ContentBlock::Table(table) => table.plain_text(),
            ContentBlock::Rule => String::new(),
            other => other.text().unwrap_or_default().to_string(),
        }
    }
}

/// Block kinds, for statistics and structural comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Heading
    Heading,
    /// Paragraph
    Paragraph,
    /// List block
    List,
    /// Table block
    Table,
    /// Fenced code
    Code,
    /// Image
    Image,
    /// Link
    Link,
    /// Block quote
    Quote,
    /// Horizontal rule
    Rule,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::List => "list",
            BlockKind::Table => "table",
            BlockKind::Code => "code",
            BlockKind::Image => "image",
            BlockKind::Link => "link",
            BlockKind::Quote => "quote",
            BlockKind::Rule => "rule",
        };
        f.write_str(name)
    }
}

/// A list of items sharing one marker style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Numbered (`1.`) rather than bulleted (`-`)
    pub ordered: bool,

    /// Item texts, markers stripped
    pub items: Vec<String>,
}

impl ListBlock {
    /// Create an empty list.
    pub fn new(ordered: bool) -> Self {
        Self {
            ordered,
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Append text to the last item, separated by one space.
    ///
    /// Returns false when the list has no item to continue.
    pub fn continue_last(&mut self, text: &str) -> bool {
        match self.items.last_mut() {
            Some(last) => {
                if !last.is_empty() {
                    last.push(' ');
                }
                last.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(ContentBlock::heading(9, "x").heading_level(), Some(6));
        assert_eq!(ContentBlock::heading(0, "x").heading_level(), Some(1));
    }

    #[test]
    fn test_block_kind() {
        assert_eq!(ContentBlock::paragraph("p").kind(), BlockKind::Paragraph);
        assert_eq!(ContentBlock::list(true, ["a"]).kind(), BlockKind::List);
        assert_eq!(ContentBlock::Rule.kind(), BlockKind::Rule);
        assert_eq!(BlockKind::Quote.to_string(), "quote");
    }

    #[test]
    fn test_list_continuation() {
        let mut list = ListBlock::new(false);
        assert!(!list.continue_last("orphan"));
        list.push("first line");
        assert!(list.continue_last("wrapped"));
        assert_eq!(list.items, vec!["first line wrapped"]);
    }

    #[test]
    fn test_block_json_tagging() {
        let json = serde_json::to_string(&ContentBlock::heading(2, "Scope")).unwrap();
        assert_eq!(json, r#"{"type":"heading","level":2,"text":"Scope"}"#);

        let back: ContentBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ContentBlock::heading(2, "Scope"));
    }
}
