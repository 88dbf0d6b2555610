//! Rendering result with statistics.

use crate::model::{ContentBlock, DocumentModel};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document title (copied from the model)
    pub title: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, title: impl Into<String>, stats: ExtractionStats) -> Self {
        Self {
            content,
            title: title.into(),
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            title: String::new(),
            stats: ExtractionStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics about a recovered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of list blocks
    pub list_count: u32,

    /// Number of list items across all lists
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of fenced code blocks
    pub code_block_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of standalone links
    pub link_count: u32,

    /// Number of block quotes
    pub quote_count: u32,

    /// Number of horizontal rules
    pub horizontal_rule_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect block counts from a document.
    pub fn from_document(doc: &DocumentModel) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Count one block.
    pub fn add_block(&mut self, block: &ContentBlock) {
        match block {
            ContentBlock::Heading { .. } => self.heading_count += 1,
            ContentBlock::Paragraph { .. } => self.paragraph_count += 1,
            ContentBlock::List(list) => {
                self.list_count += 1;
                self.list_item_count += list.len() as u32;
            }
            ContentBlock::Table(_) => self.table_count += 1,
            ContentBlock::Code { .. } => self.code_block_count += 1,
            ContentBlock::Image { .. } => self.image_count += 1,
            ContentBlock::Link { .. } => self.link_count += 1,
            ContentBlock::Quote { .. } => self.quote_count += 1,
            ContentBlock::Rule => self.horizontal_rule_count += 1,
        }
    }

    /// Total number of blocks counted.
    pub fn block_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.list_count
            + self.table_count
            + self.code_block_count
            + self.image_count
            + self.link_count
            + self.quote_count
            + self.horizontal_rule_count
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.code_block_count += other.code_block_count;
        self.image_count += other.image_count;
        self.link_count += other.link_count;
        self.quote_count += other.quote_count;
        self.horizontal_rule_count += other.horizontal_rule_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_stats_from_document() {
        let doc = DocumentModel::with_blocks(
            "Doc",
            vec![
                ContentBlock::heading(1, "Doc"),
                ContentBlock::list(true, ["a", "b", "c"]),
                ContentBlock::Rule,
            ],
        );
        let stats = ExtractionStats::from_document(&doc);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.list_count, 1);
        assert_eq!(stats.list_item_count, 3);
        assert_eq!(stats.horizontal_rule_count, 1);
        assert_eq!(stats.block_count(), 3);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats {
            paragraph_count: 5,
            table_count: 2,
            ..Default::default()
        };
        let stats2 = ExtractionStats {
            paragraph_count: 3,
            table_count: 1,
            image_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.image_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("# Hello".to_string());
        assert_eq!(result.content, "# Hello");
        assert_eq!(result.stats.paragraph_count, 0);
        assert!(result.title.is_empty());
    }
}
