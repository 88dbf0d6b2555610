//! Document-level types.

use super::{BlockKind, ContentBlock};
use serde::{Deserialize, Serialize};

/// A recovered document: a title and an ordered block sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Document title (may be empty)
    pub title: String,

    /// Blocks in source order
    pub blocks: Vec<ContentBlock>,
}

impl DocumentModel {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a title and blocks.
    pub fn with_blocks(title: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            title: title.into(),
            blocks,
        }
    }

    /// Add a block to the document.
    pub fn push(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Iterate over `(level, text)` of every heading.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            ContentBlock::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    /// Count blocks of one kind.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind() == kind).count()
    }

    /// Block kinds in order.
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|b| b.kind()).collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Convert document metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if !self.title.is_empty() {
            lines.push(format!("title: \"{}\"", escape_yaml(&self.title)));
        }
        lines.push(format!("blocks: {}", self.blocks.len()));
        lines.push(format!("headings: {}", self.count(BlockKind::Heading)));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
