//! Block normalization.
//!
//! Runs once over an aggregated block sequence. Each stage only ever moves
//! blocks toward a fixed point, so normalizing twice gives the same result
//! as normalizing once.

mod options;

pub use options::{NormalizeOptions, NormalizePreset};

use crate::model::{ContentBlock, DocumentModel, TableBlock};
use crate::recover::normalize_heading_text;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

const LIGATURES: &[(&str, &str)] = &[
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// A terminology entry with its compiled, case-insensitive pattern.
struct Term {
    pattern: Regex,
    replacement: String,
}

/// Block normalizer.
pub struct Normalizer {
    options: NormalizeOptions,
    terms: Vec<Term>,
    whitespace: Regex,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        let terms = options
            .terminology
            .iter()
            .filter_map(|(from, to)| {
                match Regex::new(&format!("(?i){}", regex::escape(from))) {
                    Ok(pattern) => Some(Term {
                        pattern,
                        replacement: to.to_string(),
                    }),
                    Err(e) => {
                        log::warn!("skipping terminology entry '{}': {}", from, e);
                        None
                    }
                }
            })
            .collect();

        Self {
            options,
            terms,
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Create a normalizer from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        Self::new(NormalizeOptions::from_preset(preset))
    }

    /// Normalize a document in place.
    pub fn normalize_document(&self, doc: &mut DocumentModel) {
        let blocks = std::mem::take(&mut doc.blocks);
        doc.blocks = self.normalize(blocks);
        doc.title = self.clean_inline(&doc.title);
    }

    /// Normalize a block sequence.
    pub fn normalize(&self, blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
        let before = blocks.len();

        let mut blocks: Vec<ContentBlock> = blocks.into_iter().map(|b| self.clean_block(b)).collect();
        if self.options.remove_empty {
            blocks.retain_mut(keep_non_empty);
        }
        let mut blocks = self.dedupe_headings(blocks);
        if self.options.enforce_heading_sequence {
            repair_heading_sequence(&mut blocks);
        }
        if !self.options.promote_ordered_markers.is_empty() {
            self.promote_lists(&mut blocks);
        }

        log::debug!("normalized {} blocks into {}", before, blocks.len());
        blocks
    }

    /// Stage 1: inline text cleanup on every text field.
    fn clean_block(&self, block: ContentBlock) -> ContentBlock {
        match block {
            ContentBlock::Heading { level, text } => ContentBlock::Heading {
                level,
                text: self.clean_inline(&text),
            },
            ContentBlock::Paragraph { text } => ContentBlock::Paragraph {
                text: self.clean_inline(&text),
            },
            ContentBlock::List(mut list) => {
                for item in list.items.iter_mut() {
                    *item = self.clean_inline(item);
                }
                ContentBlock::List(list)
            }
            ContentBlock::Table(mut table) => {
                table.map_cells(|cell| self.clean_inline(cell));
                ContentBlock::Table(table)
            }
            ContentBlock::Quote { text } => ContentBlock::Quote {
                text: text
                    .lines()
                    .map(|line| self.clean_inline(line))
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
            ContentBlock::Code { language, code } => ContentBlock::Code {
                language: language.trim().to_string(),
                code: clean_code(&code),
            },
            ContentBlock::Image { alt, src } => ContentBlock::Image {
                alt: self.clean_inline(&alt),
                src: src.trim().to_string(),
            },
            ContentBlock::Link { text, href } => ContentBlock::Link {
                text: self.clean_inline(&text),
                href: href.trim().to_string(),
            },
            ContentBlock::Rule => ContentBlock::Rule,
        }
    }

    /// Clean one piece of inline text.
    pub fn clean_inline(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                if result.contains(ligature) {
                    result = result.replace(ligature, replacement);
                }
            }
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.unify_punctuation {
            result = self.options.punctuation.apply(&result);
        }

        if self.options.apply_terminology {
            for term in &self.terms {
                result = replace_on_word_boundary(&result, term);
            }
        }

        if self.options.collapse_whitespace {
            result = self.whitespace.replace_all(result.trim(), " ").into_owned();
        }

        result
    }

    /// Stage 3: drop repeated headings.
    ///
    /// A heading equal to the heading right before it is always dropped;
    /// with `dedupe_headings` any heading seen earlier is dropped.
    fn dedupe_headings(&self, blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut result: Vec<ContentBlock> = Vec::with_capacity(blocks.len());

        for block in blocks {
            if let ContentBlock::Heading { text, .. } = &block {
                let key = normalize_heading_text(text);
                let adjacent = matches!(
                    result.last(),
                    Some(ContentBlock::Heading { text: prev, .. }) if normalize_heading_text(prev) == key
                );
                if adjacent || (self.options.dedupe_headings && seen.contains(&key)) {
                    log::debug!("removing repeated heading '{}'", text);
                    continue;
                }
                seen.insert(key);
            }
            result.push(block);
        }
        result
    }

    /// Stage 5: number lists that enumerate modes.
    fn promote_lists(&self, blocks: &mut [ContentBlock]) {
        for block in blocks.iter_mut() {
            if let ContentBlock::List(list) = block {
                if !list.ordered
                    && list.items.iter().any(|item| {
                        self.options
                            .promote_ordered_markers
                            .iter()
                            .any(|m| !m.is_empty() && item.contains(m.as_str()))
                    })
                {
                    log::debug!("promoting list of {} items to ordered", list.len());
                    list.ordered = true;
                }
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Replace every case-insensitive match whose neighbours are not ASCII word
/// characters. CJK text around a Latin term counts as a boundary.
fn replace_on_word_boundary(text: &str, term: &Term) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for m in term.pattern.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if before.is_some_and(is_ascii_word) || after.is_some_and(is_ascii_word) {
            continue;
        }
        result.push_str(&text[last..m.start()]);
        result.push_str(&term.replacement);
        last = m.end();
    }

    result.push_str(&text[last..]);
    result
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Trailing whitespace and surrounding empty lines cannot survive emission.
fn clean_code(code: &str) -> String {
    let lines: Vec<&str> = code.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Stage 2 predicate. Empty list items are dropped from their list first.
fn keep_non_empty(block: &mut ContentBlock) -> bool {
    match block {
        ContentBlock::Heading { text, .. }
        | ContentBlock::Paragraph { text }
        | ContentBlock::Quote { text } => !text.trim().is_empty(),
        ContentBlock::List(list) => {
            list.items.retain(|item| !item.trim().is_empty());
            !list.is_empty()
        }
        ContentBlock::Table(table) => !is_blank_table(table),
        ContentBlock::Image { src, .. } => !src.trim().is_empty(),
        ContentBlock::Link { text, href } => !(text.trim().is_empty() && href.trim().is_empty()),
        ContentBlock::Code { .. } | ContentBlock::Rule => true,
    }
}

fn is_blank_table(table: &TableBlock) -> bool {
    table.is_empty() || table.rows.iter().flatten().all(|cell| cell.trim().is_empty())
}

/// Stage 4: lift any heading deeper than the previous heading plus one.
fn repair_heading_sequence(blocks: &mut [ContentBlock]) {
    let mut previous: Option<u8> = None;
    for block in blocks.iter_mut() {
        if let ContentBlock::Heading { level, text } = block {
            if let Some(prev) = previous {
                if *level > prev + 1 {
                    log::debug!("lifting heading '{}' from level {} to {}", text, level, prev + 1);
                    *level = prev + 1;
                }
            }
            previous = Some(*level);
        }
    }
}

/// Normalize blocks with the standard preset.
pub fn normalize(blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
    Normalizer::default().normalize(blocks)
}
