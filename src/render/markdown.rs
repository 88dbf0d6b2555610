//! Markdown rendering for recovered documents.

use crate::model::{ContentBlock, DocumentModel, ListBlock, TableBlock};
use crate::recover::{is_thematic_break, normalize_heading_text, parse_list_marker};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert a document to Markdown with default options.
///
/// Deterministic: the same model always yields the same text. Blocks are
/// separated by exactly one blank line, no line carries trailing whitespace
/// and non-empty output ends with exactly one newline.
pub fn emit_markdown(doc: &DocumentModel) -> String {
    to_markdown(doc, &RenderOptions::default())
}

/// Convert a document to Markdown.
pub fn to_markdown(doc: &DocumentModel, options: &RenderOptions) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &DocumentModel, options: &RenderOptions) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &DocumentModel) -> String {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, doc: &DocumentModel) -> RenderResult {
        self.options.collect_stats = true;
        let content = self.render_internal(doc);

        // Count words and characters in final content
        self.stats.count_text(&content);

        RenderResult::new(content, doc.title.clone(), self.stats)
    }

    fn render_internal(&mut self, doc: &DocumentModel) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(doc.blocks.len() + 1);

        if self.options.title_heading && self.title_missing(doc) {
            parts.push(self.render_block(&ContentBlock::heading(1, doc.title.trim())));
        }

        for block in &doc.blocks {
            let rendered = self.render_block(block);
            if !rendered.is_empty() {
                parts.push(rendered);
            }
        }

        let body = parts
            .join("\n\n")
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");

        let mut output = String::new();
        if self.options.include_frontmatter {
            output.push_str(&doc.to_yaml_frontmatter());
            if !body.is_empty() {
                output.push('\n');
            }
        }
        if !body.is_empty() {
            output.push_str(&body);
            output.push('\n');
        }
        output
    }

    fn title_missing(&self, doc: &DocumentModel) -> bool {
        let title = normalize_heading_text(&doc.title);
        !title.is_empty() && !doc.headings().any(|(_, text)| normalize_heading_text(text) == title)
    }

    fn render_block(&mut self, block: &ContentBlock) -> String {
        if self.options.collect_stats {
            self.stats.add_block(block);
        }

        match block {
            ContentBlock::Heading { level, text } => {
                let text = one_line(text);
                if text.is_empty() {
                    return String::new();
                }
                let level = (*level).clamp(1, self.options.max_heading_level.clamp(1, 6));
                format!("{} {}", "#".repeat(level as usize), self.escape_heading(&text))
            }
            ContentBlock::Paragraph { text } => {
                let text = one_line(text);
                if text.is_empty() {
                    return String::new();
                }
                self.escape_block_start(&text)
            }
            ContentBlock::List(list) => self.render_list(list),
            ContentBlock::Table(table) => render_table(table),
            ContentBlock::Code { language, code } => {
                if code.is_empty() {
                    format!("```{}\n```", language.trim())
                } else {
                    format!("```{}\n{}\n```", language.trim(), code)
                }
            }
            ContentBlock::Image { alt, src } => {
                format!("![{}]({})", escape_brackets(alt), escape_parens(src))
            }
            ContentBlock::Link { text, href } => {
                format!("[{}]({})", escape_brackets(text), escape_parens(href))
            }
            ContentBlock::Quote { text } => text
                .lines()
                .map(|line| format!("> {}", line.trim()))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentBlock::Rule => "---".to_string(),
        }
    }

    fn render_list(&self, list: &ListBlock) -> String {
        let bullet = self.options.bullet();
        list.items
            .iter()
            .map(|item| one_line(item))
            .filter(|item| !item.is_empty())
            .enumerate()
            .map(|(i, item)| {
                let marker = if list.ordered {
                    format!("{}.", i + 1)
                } else {
                    bullet.to_string()
                };
                let line = format!("{} {}", marker, item);
                if self.options.escape_special_chars && (item.starts_with('\\') || is_thematic_break(&line)) {
                    format!("{} \\{}", marker, item)
                } else {
                    line
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Escape text that would read back as a different block kind.
    fn escape_block_start(&self, text: &str) -> String {
        if self.options.escape_special_chars && needs_block_escape(text) {
            format!("\\{}", text)
        } else {
            text.to_string()
        }
    }

    /// Escape a leading `#`/emphasis and a trailing closing `#` run.
    fn escape_heading(&self, text: &str) -> String {
        if !self.options.escape_special_chars {
            return text.to_string();
        }

        let mut result = if text.starts_with(['#', '\\', '*', '_']) {
            format!("\\{}", text)
        } else {
            text.to_string()
        };

        let stem = result.trim_end_matches('#');
        if stem.len() < result.len() && stem.ends_with(char::is_whitespace) {
            let hashes = result[stem.len()..].to_string();
            result = format!("{}\\{}", stem, hashes);
        }
        result
    }
}

/// Characters that can follow an escaping backslash at the start of a block.
pub(crate) fn is_escapable_lead(c: char) -> bool {
    matches!(
        c,
        '\\' | '#' | '>' | '-' | '*' | '+' | '_' | '`' | '[' | '!' | '|' | '•' | '·'
    ) || c.is_ascii_digit()
}

fn needs_block_escape(text: &str) -> bool {
    text.starts_with(['\\', '#', '>', '[', '|'])
        || text.starts_with("![")
        || text.starts_with("```")
        || is_thematic_break(text)
        || parse_list_marker(text).is_some()
}

fn render_table(table: &TableBlock) -> String {
    let columns = table.column_count();
    if columns == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(table.row_count() + 1);
    for (i, row) in table.rows.iter().enumerate() {
        let mut line = String::from("|");
        for col in 0..columns {
            let cell = row.get(col).map(|c| one_line(c)).unwrap_or_default();
            line.push_str(&format!(" {} |", cell.replace('|', "\\|")));
        }
        lines.push(line);

        // Separator after the header row, always re-rendered left-aligned
        if i == 0 {
            lines.push(format!("|{}", " --- |".repeat(columns)));
        }
    }
    lines.join("\n")
}

fn escape_brackets(text: &str) -> String {
    escape_chars(&one_line(text), &['\\', '[', ']'])
}

fn escape_parens(text: &str) -> String {
    escape_chars(text.trim(), &['\\', '(', ')'])
}

fn escape_chars(text: &str, special: &[char]) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Fold a multi-line text into one line.
fn one_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
