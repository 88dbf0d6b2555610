//! List / table aggregation.
//!
//! A small state machine that turns a stream of classified lines into
//! blocks: consecutive list items become one list, consecutive table rows one
//! table, quote lines one quote, fenced lines one code block. Headings are
//! placed by the caller through [`Aggregator::push_block`] after inference.

use super::classifier::{char_len, LineKind};
use super::options::RecoverOptions;
use crate::model::{ContentBlock, ListBlock, TableBlock};

/// Paragraph endings that stop wrapped-line joining.
const PARAGRAPH_ENDINGS: &[char] = &['?', '!', '.', ':', '？', '！', '。', '：'];

/// Aggregation state.
#[derive(Debug, Clone, PartialEq)]
enum State {
    Idle,
    InList(ListBlock),
    InTable { table: TableBlock, rows_seen: usize },
    InParagraph(String),
    InQuote(Vec<String>),
    InCode { language: String, lines: Vec<String> },
}

/// Block aggregator for one document.
#[derive(Debug)]
pub struct Aggregator {
    state: State,
    blocks: Vec<ContentBlock>,
    join_wrapped_lines: bool,
    list_continuation: bool,
    paragraph_break_chars: usize,
}

impl Aggregator {
    /// Create an aggregator.
    pub fn new(options: &RecoverOptions) -> Self {
        Self {
            state: State::Idle,
            blocks: Vec::new(),
            join_wrapped_lines: options.join_wrapped_lines,
            list_continuation: options.list_continuation,
            paragraph_break_chars: options.thresholds.paragraph_break_chars,
        }
    }

    /// Feed one classified line.
    ///
    /// Heading kinds are not accepted here; they close any open block and
    /// are otherwise ignored, since the caller emits them after inference.
    pub fn accept(&mut self, kind: LineKind) {
        match kind {
            LineKind::Blank => self.flush(),
            LineKind::ListItem { ordered, text } => self.accept_list_item(ordered, text),
            LineKind::Paragraph { text } => self.accept_paragraph(text),
            LineKind::TableRow { cells, separator } => self.accept_table_row(cells, separator),
            LineKind::Quote { text } => match &mut self.state {
                State::InQuote(lines) => lines.push(text),
                _ => {
                    self.flush();
                    self.state = State::InQuote(vec![text]);
                }
            },
            LineKind::FenceOpen { language } => {
                self.flush();
                self.state = State::InCode {
                    language,
                    lines: Vec::new(),
                };
            }
            LineKind::CodeLine(line) => match &mut self.state {
                State::InCode { lines, .. } => lines.push(line),
                _ => self.accept_paragraph(line),
            },
            LineKind::FenceClose => self.flush(),
            LineKind::Rule => self.push_block(ContentBlock::Rule),
            LineKind::Image { alt, src } => self.push_block(ContentBlock::Image { alt, src }),
            LineKind::Link { text, href } => self.push_block(ContentBlock::Link { text, href }),
            LineKind::Heading { .. } | LineKind::HeadingCandidate { .. } => self.flush(),
        }
    }

    /// Close any open block, then append a finished block.
    pub fn push_block(&mut self, block: ContentBlock) {
        self.flush();
        self.blocks.push(block);
    }

    /// The last block already emitted (open blocks are not visible).
    pub fn last_block(&self) -> Option<&ContentBlock> {
        self.blocks.last()
    }

    /// Close the open block, if any.
    pub fn flush(&mut self) {
        let state = std::mem::replace(&mut self.state, State::Idle);
        match state {
            State::Idle => {}
            State::InList(list) => {
                if !list.is_empty() {
                    log::debug!("closing list with {} items", list.len());
                    self.blocks.push(ContentBlock::List(list));
                }
            }
            State::InTable { table, .. } => {
                if !table.is_empty() {
                    log::debug!("closing table with {} rows", table.row_count());
                    self.blocks.push(ContentBlock::Table(table));
                }
            }
            State::InParagraph(text) => self.blocks.push(ContentBlock::Paragraph { text }),
            State::InQuote(lines) => self.blocks.push(ContentBlock::Quote {
                text: lines.join("\n"),
            }),
            State::InCode { language, lines } => self.blocks.push(ContentBlock::Code {
                language,
                code: lines.join("\n"),
            }),
        }
    }

    /// Close the open block (an unterminated fence included) and return the
    /// blocks.
    pub fn finish(mut self) -> Vec<ContentBlock> {
        self.flush();
        self.blocks
    }

    fn accept_list_item(&mut self, ordered: bool, text: String) {
        if let State::InList(list) = &mut self.state {
            if list.ordered == ordered {
                list.push(text);
                return;
            }
        }
        self.flush();
        let mut list = ListBlock::new(ordered);
        list.push(text);
        self.state = State::InList(list);
    }

    fn accept_paragraph(&mut self, text: String) {
        match &mut self.state {
            State::InList(list) if self.list_continuation => {
                log::debug!("continuing list item with '{}'", text);
                list.continue_last(&text);
                return;
            }
            State::InParagraph(current) if self.join_wrapped_lines => {
                let starts_new = char_len(&text) < self.paragraph_break_chars
                    || current.trim_end().ends_with(PARAGRAPH_ENDINGS);
                if !starts_new {
                    join_wrapped(current, &text);
                    return;
                }
            }
            _ => {}
        }

        self.flush();
        if self.join_wrapped_lines {
            self.state = State::InParagraph(text);
        } else {
            self.blocks.push(ContentBlock::Paragraph { text });
        }
    }

    fn accept_table_row(&mut self, cells: Vec<String>, separator: bool) {
        if let State::InTable { table, rows_seen } = &mut self.state {
            *rows_seen += 1;
            if separator && *rows_seen == 2 {
                return;
            }
            table.push_row(cells);
            return;
        }

        self.flush();
        if separator {
            // A separator cannot be a header.
            return;
        }
        let mut table = TableBlock::new();
        table.push_row(cells);
        self.state = State::InTable {
            table,
            rows_seen: 1,
        };
    }
}

/// Join a wrapped line onto a paragraph. CJK ideographs and kana join
/// without a space; everything else (Hangul included) with one.
fn join_wrapped(current: &mut String, next: &str) {
    let glue = match (current.chars().last(), next.chars().next()) {
        (Some(a), Some(b)) if is_spaceless_script(a) && is_spaceless_script(b) => "",
        _ => " ",
    };
    current.push_str(glue);
    current.push_str(next);
}

fn is_spaceless_script(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'   // Hiragana, Katakana
        | '\u{3400}'..='\u{4DBF}' // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
        | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
        | '\u{FF66}'..='\u{FF9F}' // Halfwidth Katakana
    )
}
